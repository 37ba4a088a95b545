//! HTML bodies for the lead emails. Every user-supplied value is escaped.

use super::domain::{ContactSubmission, CreditReportRequest};
pub use crate::report::content::SITE_NAME;

pub const REPORT_FILENAME: &str = "Credit-Improvement-Report.pdf";

pub fn contact_subject(contact: &ContactSubmission) -> String {
    format!("New Contact Form Message - {}", contact.subject_label())
}

pub const LEAD_SUBJECT: &str = "New Credit Report Request - Lead Notification";
pub const DELIVERY_SUBJECT: &str =
    "Your Free Credit Improvement Report - InterestRateCalculators.com";

const REPORT_CONTENTS: [&str; 6] = [
    "Step-by-step credit improvement strategies",
    "Timeline for seeing results (30, 60, 90 days)",
    "Common credit mistakes to avoid",
    "How to dispute errors on your credit report",
    "Debt payoff strategies that boost your score",
    "Potential savings calculator",
];

pub fn contact_notification(contact: &ContactSubmission, received_at: &str) -> String {
    let mut details = String::new();
    details.push_str(&detail_row("Name", &contact.full_name()));
    details.push_str(&detail_row("Email", &contact.email));
    if let Some(phone) = &contact.phone {
        details.push_str(&detail_row("Phone", phone));
    }
    details.push_str(&detail_row("Subject", contact.subject_label()));
    details.push_str(&detail_row("Date", received_at));

    let mut body = String::new();
    body.push_str("<h2 style=\"color: #1f2937;\">Contact Details</h2>");
    body.push_str(&panel(&details));
    body.push_str("<h3 style=\"color: #1f2937;\">Message:</h3>");
    body.push_str(&format!(
        "<div style=\"background: #f9fafb; padding: 20px; border-left: 4px solid #2563eb;\">\
         <p style=\"margin: 0; white-space: pre-wrap;\">{}</p></div>",
        escape_html(&contact.message)
    ));
    body.push_str(
        "<p style=\"color: #1e40af; font-size: 14px;\"><strong>Action Required:</strong> \
         Please respond to this inquiry within 24 hours.</p>",
    );

    document(
        "New Contact Message",
        Some(SITE_NAME),
        &body,
        "This message was sent from the contact form on your website.",
    )
}

pub fn lead_notification(request: &CreditReportRequest, received_at: &str) -> String {
    let mut details = String::new();
    details.push_str(&detail_row("Name", &request.name));
    details.push_str(&detail_row("Email", &request.email));
    details.push_str(&detail_row("Date", received_at));
    details.push_str(&detail_row("Source", SITE_NAME));

    let mut body = String::new();
    body.push_str("<h2 style=\"color: #1f2937;\">New Credit Report Request</h2>");
    body.push_str(&panel(&details));
    body.push_str(
        "<p style=\"color: #4b5563;\">This lead has requested the free credit improvement report. \
         The PDF report has been generated and delivery to their email address was attempted.</p>",
    );

    document(&format!("New Lead - {SITE_NAME}"), None, &body, "")
}

pub fn report_delivery(name: &str, site_url: &str) -> String {
    let site_url = escape_html(site_url);
    let mut body = String::new();
    body.push_str(&format!(
        "<h2 style=\"color: #1f2937;\">Hi {},</h2>",
        escape_html(name)
    ));
    body.push_str(
        "<p style=\"color: #4b5563;\">Thank you for requesting your free credit improvement report! \
         Attached is your guide to boosting your credit score and saving thousands on loans, \
         insurance, and more.</p>",
    );

    let mut contents = String::from("<h3 style=\"margin-top: 0;\">What's Inside Your Report:</h3><ul>");
    for item in REPORT_CONTENTS {
        contents.push_str(&format!("<li>{item}</li>"));
    }
    contents.push_str("</ul>");
    body.push_str(&panel(&contents));

    body.push_str(&format!(
        "<p style=\"text-align: center;\"><a href=\"{site_url}\" style=\"background: #2563eb; \
         color: white; padding: 12px 24px; text-decoration: none;\">Visit Our Calculators</a></p>"
    ));

    document(
        SITE_NAME,
        Some("Your Financial Education Resource"),
        &body,
        "All rights reserved.",
    )
}

fn detail_row(label: &str, value: &str) -> String {
    format!(
        "<p style=\"margin: 10px 0 0 0; color: #4b5563;\"><strong>{label}:</strong> {}</p>",
        escape_html(value)
    )
}

fn panel(inner: &str) -> String {
    format!(
        "<div style=\"background: #f3f4f6; padding: 20px; border-radius: 8px; margin: 20px 0;\">{inner}</div>"
    )
}

fn document(heading: &str, tagline: Option<&str>, body: &str, footer_note: &str) -> String {
    let mut html = String::from(
        "<div style=\"font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;\">",
    );
    html.push_str(
        "<div style=\"background: linear-gradient(135deg, #2563eb, #1d4ed8); padding: 30px; text-align: center;\">",
    );
    html.push_str(&format!(
        "<h1 style=\"color: white; margin: 0; font-size: 28px;\">{heading}</h1>"
    ));
    if let Some(tagline) = tagline {
        html.push_str(&format!(
            "<p style=\"color: #bfdbfe; margin: 10px 0 0 0;\">{tagline}</p>"
        ));
    }
    html.push_str("</div>");
    html.push_str(&format!(
        "<div style=\"padding: 30px; background: white;\">{body}</div>"
    ));
    html.push_str(&format!(
        "<div style=\"background: #f9fafb; padding: 20px; text-align: center;\">\
         <p style=\"color: #6b7280; font-size: 12px; margin: 0;\">&copy; 2024 {SITE_NAME}. {footer_note}</p></div>"
    ));
    html.push_str("</div>");
    html
}

pub fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
