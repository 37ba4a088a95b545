use printpdf::{BuiltinFont, Color, IndirectFontRef, Mm, PdfDocument, PdfLayerReference, Rgb};

use super::layout::{LaidOutPage, PlacedText, PAGE_HEIGHT_MM, PAGE_WIDTH_MM};
use super::ReportError;

const LAYER: &str = "Layer 1";

/// Headings at or above this size use the bold face.
const BOLD_FROM_PT: f32 = 14.0;

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

impl Fonts {
    fn for_size(&self, size: f32) -> &IndirectFontRef {
        if size >= BOLD_FROM_PT {
            &self.bold
        } else {
            &self.regular
        }
    }
}

/// Writes laid-out pages to PDF bytes using the built-in Helvetica faces.
pub fn render(title: &str, pages: &[LaidOutPage]) -> Result<Vec<u8>, ReportError> {
    let (first, rest) = pages.split_first().ok_or(ReportError::Empty)?;

    let (doc, page, layer) = PdfDocument::new(
        pdf_safe(title),
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        LAYER.to_string(),
    );
    let fonts = Fonts {
        regular: doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|err| ReportError::Pdf(err.to_string()))?,
        bold: doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|err| ReportError::Pdf(err.to_string()))?,
    };

    draw_page(&doc.get_page(page).get_layer(layer), first, &fonts);
    for laid_out in rest {
        let (page, layer) = doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), LAYER);
        draw_page(&doc.get_page(page).get_layer(layer), laid_out, &fonts);
    }

    doc.save_to_bytes()
        .map_err(|err| ReportError::Pdf(err.to_string()))
}

fn draw_page(layer: &PdfLayerReference, page: &LaidOutPage, fonts: &Fonts) {
    for line in &page.lines {
        draw_line(layer, line, fonts);
    }
}

fn draw_line(layer: &PdfLayerReference, line: &PlacedText, fonts: &Fonts) {
    let (r, g, b) = line.style.tone.rgb();
    layer.set_fill_color(Color::Rgb(Rgb::new(r, g, b, None)));
    layer.use_text(
        pdf_safe(&line.text),
        line.style.size,
        Mm(line.x_mm),
        Mm(PAGE_HEIGHT_MM - line.y_mm),
        fonts.for_size(line.style.size),
    );
}

/// Built-in fonts only cover ASCII reliably; anything else becomes `?`.
fn pdf_safe(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_ascii() && !c.is_ascii_control() { c } else { '?' })
        .collect()
}
