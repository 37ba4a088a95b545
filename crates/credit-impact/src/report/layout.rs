//! Places content blocks on A4 pages. Coordinates are millimetres measured
//! from the top-left corner; conversion to PDF space happens at render time.

use super::content::{footer_lines, Block, TextStyle, FOOTER};

pub const PAGE_WIDTH_MM: f32 = 210.0;
pub const PAGE_HEIGHT_MM: f32 = 297.0;
pub const MARGIN_LEFT_MM: f32 = 20.0;
pub const TOP_MM: f32 = 20.0;
pub const TEXT_WIDTH_MM: f32 = 170.0;
/// Content placed below this line moves to a fresh page.
pub const BREAK_AT_MM: f32 = 270.0;
pub const FOOTER_LINES_MM: [f32; 2] = [285.0, 292.0];

const POINT_MM: f32 = 0.3528;
const LINE_HEIGHT_FACTOR: f32 = 1.15;

#[derive(Debug, Clone, PartialEq)]
pub struct PlacedText {
    pub text: String,
    pub style: TextStyle,
    pub x_mm: f32,
    pub y_mm: f32,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct LaidOutPage {
    pub lines: Vec<PlacedText>,
}

impl LaidOutPage {
    pub fn contains(&self, needle: &str) -> bool {
        self.lines.iter().any(|line| line.text.contains(needle))
    }
}

struct Cursor {
    pages: Vec<LaidOutPage>,
    current: LaidOutPage,
    y: f32,
    /// Lowest baseline used so far on the current page.
    floor: f32,
}

impl Cursor {
    fn new() -> Self {
        Self {
            pages: Vec::new(),
            current: LaidOutPage::default(),
            y: TOP_MM,
            floor: 0.0,
        }
    }

    fn page_has_content(&self) -> bool {
        !self.current.lines.is_empty()
    }

    fn new_page(&mut self) {
        let finished = std::mem::take(&mut self.current);
        self.pages.push(finished);
        self.y = TOP_MM;
        self.floor = 0.0;
    }

    /// Moves down by `gap`, never landing on or above a previous line.
    fn advance(&mut self, gap: f32, style: TextStyle) {
        if !self.page_has_content() {
            return;
        }
        self.y = (self.y + gap).max(self.floor + line_height(style));
        if self.y > BREAK_AT_MM {
            self.new_page();
        }
    }

    fn place(&mut self, text: String, style: TextStyle, x_mm: f32, y_mm: f32) {
        self.floor = self.floor.max(y_mm);
        self.current.lines.push(PlacedText {
            text,
            style,
            x_mm,
            y_mm,
        });
    }

    fn finish(mut self) -> Vec<LaidOutPage> {
        if self.page_has_content() || self.pages.is_empty() {
            self.pages.push(self.current);
        }
        self.pages
    }
}

/// Lays out blocks page by page and stamps the footer on every page.
pub fn paginate(blocks: &[Block]) -> Vec<LaidOutPage> {
    let mut cursor = Cursor::new();

    for block in blocks {
        match block {
            Block::PageBreak => {
                if cursor.page_has_content() {
                    cursor.new_page();
                }
            }
            Block::Line {
                text,
                style,
                indent,
                gap,
            } => {
                cursor.advance(*gap, *style);
                let y = cursor.y;
                cursor.place(text.clone(), *style, MARGIN_LEFT_MM + indent, y);
            }
            Block::Paragraph { text, style, gap } => {
                cursor.advance(*gap, *style);
                let anchor = cursor.y;
                let step = line_height(*style);
                let mut y = anchor;
                for (index, line) in wrap(text, style.size, TEXT_WIDTH_MM)
                    .into_iter()
                    .enumerate()
                {
                    if index > 0 {
                        y += step;
                        if y > BREAK_AT_MM {
                            cursor.new_page();
                            y = TOP_MM;
                        }
                    }
                    cursor.place(line, *style, MARGIN_LEFT_MM, y);
                }
                // Following gaps are measured from the paragraph's first line
                // unless it moved to another page while wrapping.
                cursor.y = if y < anchor { y } else { anchor };
            }
        }
    }

    let mut pages = cursor.finish();
    let footer = footer_lines();
    for page in &mut pages {
        for (text, y_mm) in footer.iter().zip(FOOTER_LINES_MM) {
            page.lines.push(PlacedText {
                text: text.clone(),
                style: FOOTER,
                x_mm: MARGIN_LEFT_MM,
                y_mm,
            });
        }
    }
    pages
}

pub fn line_height(style: TextStyle) -> f32 {
    style.size * POINT_MM * LINE_HEIGHT_FACTOR
}

/// Approximate Helvetica advance width in em units.
fn glyph_em(c: char) -> f32 {
    match c {
        'i' | 'j' | 'l' | '.' | ',' | '\'' | '!' | '|' | ':' | ';' => 0.25,
        ' ' | 'f' | 't' | 'r' | 'I' | '(' | ')' | '-' | '/' => 0.32,
        'm' | 'w' | 'M' | 'W' | '%' | '@' => 0.86,
        '0'..='9' | '$' | '+' => 0.556,
        c if c.is_ascii_uppercase() => 0.68,
        _ => 0.52,
    }
}

pub fn text_width_mm(text: &str, size: f32) -> f32 {
    let em: f32 = text.chars().map(glyph_em).sum();
    em * size * POINT_MM
}

/// Greedy word wrap. A word wider than the line is split between characters.
pub fn wrap(text: &str, size: f32, width_mm: f32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{current} {word}")
        };
        if text_width_mm(&candidate, size) <= width_mm {
            current = candidate;
            continue;
        }
        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        let mut pieces = split_word(word, size, width_mm);
        current = pieces.pop().unwrap_or_default();
        lines.extend(pieces);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

fn split_word(word: &str, size: f32, width_mm: f32) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut piece = String::new();
    let mut piece_mm = 0.0;
    for c in word.chars() {
        let glyph_mm = glyph_em(c) * size * POINT_MM;
        if !piece.is_empty() && piece_mm + glyph_mm > width_mm {
            pieces.push(std::mem::take(&mut piece));
            piece_mm = 0.0;
        }
        piece.push(c);
        piece_mm += glyph_mm;
    }
    if !piece.is_empty() {
        pieces.push(piece);
    }
    pieces
}
