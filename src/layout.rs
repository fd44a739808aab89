use crate::settings::{FontFamily, PageDimensions, Settings};

/// Horizontal anchor for a text draw. The x coordinate is the left edge, the
/// center, or the right edge of the rendered string.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

const BLACK: [u8; 3] = [0, 0, 0];
const HEADER_GRAY: [u8; 3] = [100, 100, 100];
const LINE_NUMBER_GRAY: [u8; 3] = [150, 150, 150];

/// Page margin on all four sides, in mm.
pub const MARGIN: f32 = 20.0;

/// Drawing capability the layout engine is written against. Coordinates are
/// millimeters measured from the top-left page corner; font sizes are points.
/// Any PDF-producing backend implementing this set is substitutable.
pub trait DocumentRenderer {
    fn set_font(&mut self, family: FontFamily);
    fn set_font_size(&mut self, size: f32);
    fn set_text_color(&mut self, rgb: [u8; 3]);
    /// Draw a single line of text with its baseline at y.
    fn text(&mut self, text: &str, x: f32, y: f32, align: Align);
    /// Draw a straight line segment.
    fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32);
    /// Break text into lines that fit max_width mm at the current font and size.
    fn split_text_to_size(&self, text: &str, max_width: f32) -> Vec<String>;
    /// Append a fresh page and make it current.
    fn add_page(&mut self);
    fn page_count(&self) -> usize;
    /// Make an existing page current again, 1-based.
    fn select_page(&mut self, page: usize);
}

/// Lay the document out onto the renderer: optional first-page header, wrapped
/// body text with greedy line-by-line pagination, optional line numbers, then a
/// page-number pass once the total page count is known.
pub fn compose<R: DocumentRenderer>(doc: &mut R, text: &str, settings: &Settings) {
    let dims = settings.page_dimensions();
    let max_width = dims.width - MARGIN * 2.0;
    let mut y = MARGIN;

    // The header is drawn once, before the body font is selected, and is not
    // repeated on later pages.
    if !settings.header_text.is_empty() {
        doc.set_font_size(10.0);
        doc.set_text_color(HEADER_GRAY);
        doc.text(&settings.header_text, MARGIN, y, Align::Left);
        y += 10.0;
        doc.line(MARGIN, y, dims.width - MARGIN, y);
        y += 10.0;
    }

    doc.set_font(settings.font);
    doc.set_font_size(settings.font_size);
    doc.set_text_color(BLACK);

    let lines = doc.split_text_to_size(text, max_width);

    for (index, line) in lines.iter().enumerate() {
        if y > dims.height - MARGIN {
            doc.add_page();
            y = MARGIN;
        }

        // The label counts wrapped output lines across the whole document, not
        // source lines, and does not reset per page.
        if settings.line_numbers {
            doc.set_text_color(LINE_NUMBER_GRAY);
            doc.set_font_size(8.0);
            doc.text(&(index + 1).to_string(), MARGIN - 5.0, y, Align::Right);
            doc.set_text_color(BLACK);
            doc.set_font_size(settings.font_size);
        }

        doc.text(line, MARGIN, y, Align::Left);
        y += settings.font_size * 0.5;
    }

    annotate_page_numbers(doc, settings, dims);
}

/// Second pass: revisit every page and stamp "Page i of N" near the bottom.
/// Runs after layout because N is only known once layout is complete.
fn annotate_page_numbers<R: DocumentRenderer>(
    doc: &mut R,
    settings: &Settings,
    dims: PageDimensions,
) {
    if !settings.page_numbers {
        return;
    }
    let total = doc.page_count();
    for page in 1..=total {
        doc.select_page(page);
        doc.set_font_size(10.0);
        doc.set_text_color(HEADER_GRAY);
        doc.text(
            &format!("Page {page} of {total}"),
            dims.width / 2.0,
            dims.height - 10.0,
            Align::Center,
        );
    }
}
