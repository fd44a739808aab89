use textide_pdf::{Align, DocumentRenderer, FontFamily};

/// One recorded drawing call.
#[derive(Clone, Debug, PartialEq)]
pub enum Op {
    SetFont(FontFamily),
    SetFontSize(f32),
    SetTextColor([u8; 3]),
    Text {
        text: String,
        x: f32,
        y: f32,
        align: Align,
    },
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
    },
}

/// Capability-complete renderer that records every call per page instead of
/// drawing. Wrapping is newline-only, so each input line maps to exactly one
/// wrapped line and tests control line counts directly.
pub struct RecordingRenderer {
    pub pages: Vec<Vec<Op>>,
    current: usize,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        RecordingRenderer {
            pages: vec![Vec::new()],
            current: 0,
        }
    }

    fn push(&mut self, op: Op) {
        self.pages[self.current].push(op);
    }

    /// Text ops on a page (0-based), in draw order.
    pub fn texts(&self, page: usize) -> Vec<(&str, f32, f32, Align)> {
        self.pages[page]
            .iter()
            .filter_map(|op| match op {
                Op::Text { text, x, y, align } => Some((text.as_str(), *x, *y, *align)),
                _ => None,
            })
            .collect()
    }
}

impl DocumentRenderer for RecordingRenderer {
    fn set_font(&mut self, family: FontFamily) {
        self.push(Op::SetFont(family));
    }

    fn set_font_size(&mut self, size: f32) {
        self.push(Op::SetFontSize(size));
    }

    fn set_text_color(&mut self, rgb: [u8; 3]) {
        self.push(Op::SetTextColor(rgb));
    }

    fn text(&mut self, text: &str, x: f32, y: f32, align: Align) {
        self.push(Op::Text {
            text: text.to_string(),
            x,
            y,
            align,
        });
    }

    fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32) {
        self.push(Op::Line { x1, y1, x2, y2 });
    }

    fn split_text_to_size(&self, text: &str, _max_width: f32) -> Vec<String> {
        text.split('\n').map(|s| s.to_string()).collect()
    }

    fn add_page(&mut self) {
        self.pages.push(Vec::new());
        self.current = self.pages.len() - 1;
    }

    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn select_page(&mut self, page: usize) {
        self.current = page - 1;
    }
}
