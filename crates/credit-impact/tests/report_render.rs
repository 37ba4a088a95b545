use credit_impact::report::layout::{
    text_width_mm, BREAK_AT_MM, FOOTER_LINES_MM, TEXT_WIDTH_MM, TOP_MM,
};
use credit_impact::report::{currency, paginate, render_credit_report, CreditReport};

#[test]
fn report_renders_three_pdf_pages() {
    let bytes = render_credit_report("Morgan Ellis").expect("report renders");
    assert!(bytes.starts_with(b"%PDF-"));
    assert!(bytes.windows(5).any(|window| window == b"%%EOF"));

    let layout = paginate(&CreditReport::personalized("Morgan Ellis").blocks);
    assert_eq!(layout.len(), 3);
}

#[test]
fn every_page_carries_the_footer_and_stays_inside_the_margins() {
    let report = CreditReport::personalized("Morgan Ellis");
    for page in paginate(&report.blocks) {
        assert!(page.contains("(c) 2024 InterestRateCalculators.com"));
        assert!(page.contains("Visit: https://interestratecalculators.com"));
        for line in &page.lines {
            let footer = FOOTER_LINES_MM.contains(&line.y_mm);
            assert!(footer || (line.y_mm >= TOP_MM && line.y_mm <= BREAK_AT_MM));
            assert!(line.x_mm >= 20.0);
        }
    }
}

#[test]
fn long_names_wrap_instead_of_running_off_the_page() {
    let name = "Alexandria Montgomery-Worthington ".repeat(6);
    let report = CreditReport::personalized(&name);
    let pages = paginate(&report.blocks);
    let personalized: Vec<_> = pages[0]
        .lines
        .iter()
        .filter(|line| line.style.size == 16.0)
        .collect();
    assert!(personalized.len() > 1);
    assert!(render_credit_report(&name).is_ok());
}

#[test]
fn unbroken_names_are_split_to_the_text_width() {
    let name = "Montgomery".repeat(30);
    let pages = paginate(&CreditReport::personalized(&name).blocks);
    let header: Vec<_> = pages[0]
        .lines
        .iter()
        .filter(|line| line.style.size == 16.0)
        .collect();
    assert!(header.len() > 1);
    for line in header {
        assert!(
            text_width_mm(&line.text, line.style.size) <= TEXT_WIDTH_MM + 0.01,
            "{}",
            line.text
        );
    }
}

#[test]
fn non_ascii_names_still_render() {
    let bytes = render_credit_report("Zoë Ñúñez").expect("report renders");
    assert!(bytes.starts_with(b"%PDF-"));
}

#[test]
fn savings_headline_matches_the_calculator_figures() {
    let report = CreditReport::personalized("Morgan");
    let pages = paginate(&report.blocks);
    assert!(pages[0].contains(&format!("{}+ extra over 30 years", currency(123_840.0))));
    assert!(pages[2].contains("Total Savings: $9,960 over 5 years"));
}
