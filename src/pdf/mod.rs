use std::collections::HashMap;

use pdf_writer::{Content, Filter, Name, Pdf, Rect, Ref, Str};

use crate::error::Error;
use crate::fonts::LoadedFont;
use crate::layout::{Align, DocumentRenderer};
use crate::settings::{FontFamily, PageDimensions, Settings};

const MM_TO_PT: f32 = 72.0 / 25.4;

/// Concrete drawing surface over pdf-writer content streams. Takes layout
/// coordinates in mm from the top-left corner and converts to PDF points
/// (bottom-left origin) at draw time. Pages are kept as open content streams
/// so a later pass can revisit any of them; assembly into the final object
/// graph happens in `finish`.
pub struct PdfRenderer {
    dims: PageDimensions,
    pages: Vec<Content>,
    current_page: usize,
    /// Registered fonts as (resource name, font), F1 first.
    fonts: Vec<(String, LoadedFont)>,
    builtin_index: HashMap<FontFamily, usize>,
    /// Index of the embedded body font when a font file was supplied.
    embedded_body: Option<usize>,
    current_font: usize,
    font_size: f32,
    fill: [u8; 3],
}

impl PdfRenderer {
    /// The renderer starts out with Helvetica current, like the default font
    /// of the drawing surface it models; the body font takes over at
    /// `set_font`. A configured font file is loaded eagerly so a bad path
    /// fails before any layout work.
    pub fn new(settings: &Settings) -> Result<Self, Error> {
        let mut fonts = vec![(
            "F1".to_string(),
            LoadedFont::builtin(FontFamily::Helvetica),
        )];
        let mut builtin_index = HashMap::new();
        builtin_index.insert(FontFamily::Helvetica, 0);

        let embedded_body = match &settings.font_file {
            Some(path) => {
                fonts.push(("F2".to_string(), LoadedFont::from_file(path)?));
                Some(1)
            }
            None => None,
        };

        Ok(PdfRenderer {
            dims: settings.page_dimensions(),
            pages: vec![Content::new()],
            current_page: 0,
            fonts,
            builtin_index,
            embedded_body,
            current_font: 0,
            font_size: 16.0,
            fill: [0, 0, 0],
        })
    }

    fn ensure_builtin(&mut self, family: FontFamily) -> usize {
        if let Some(&i) = self.builtin_index.get(&family) {
            return i;
        }
        let name = format!("F{}", self.fonts.len() + 1);
        self.fonts.push((name, LoadedFont::builtin(family)));
        let i = self.fonts.len() - 1;
        self.builtin_index.insert(family, i);
        i
    }

    /// Serialize: compress each page's content stream, write font objects
    /// (subsetting the embedded font down to the glyphs actually shown), and
    /// assemble the page tree.
    pub fn finish(self) -> Result<Vec<u8>, Error> {
        let mut pdf = Pdf::new();
        let mut next_id = 1i32;
        let mut alloc = || {
            let r = Ref::new(next_id);
            next_id += 1;
            r
        };

        let catalog_id = alloc();
        let pages_id = alloc();

        let font_names: Vec<String> = self.fonts.iter().map(|(n, _)| n.clone()).collect();
        let font_refs: Vec<Ref> = self.fonts.iter().map(|_| alloc()).collect();

        let n = self.pages.len();
        let page_ids: Vec<Ref> = (0..n).map(|_| alloc()).collect();
        let content_ids: Vec<Ref> = (0..n).map(|_| alloc()).collect();

        for (i, (_, font)) in self.fonts.into_iter().enumerate() {
            font.write_into(&mut pdf, font_refs[i], &mut alloc)?;
        }

        for (i, content) in self.pages.into_iter().enumerate() {
            let raw = content.finish();
            let compressed = miniz_oxide::deflate::compress_to_vec_zlib(raw.as_slice(), 6);
            pdf.stream(content_ids[i], &compressed)
                .filter(Filter::FlateDecode);
        }

        pdf.catalog(catalog_id).pages(pages_id);
        pdf.pages(pages_id)
            .kids(page_ids.iter().copied())
            .count(n as i32);

        let media_box = Rect::new(
            0.0,
            0.0,
            self.dims.width * MM_TO_PT,
            self.dims.height * MM_TO_PT,
        );
        for i in 0..n {
            let mut page = pdf.page(page_ids[i]);
            page.media_box(media_box)
                .parent(pages_id)
                .contents(content_ids[i]);
            let mut resources = page.resources();
            let mut resource_fonts = resources.fonts();
            for (name, font_ref) in font_names.iter().zip(&font_refs) {
                resource_fonts.pair(Name(name.as_bytes()), *font_ref);
            }
        }

        Ok(pdf.finish())
    }
}

impl DocumentRenderer for PdfRenderer {
    fn set_font(&mut self, family: FontFamily) {
        // A user-supplied font file overrides the family choice for the body.
        self.current_font = match self.embedded_body {
            Some(i) => i,
            None => self.ensure_builtin(family),
        };
    }

    fn set_font_size(&mut self, size: f32) {
        self.font_size = size;
    }

    fn set_text_color(&mut self, rgb: [u8; 3]) {
        self.fill = rgb;
    }

    fn text(&mut self, text: &str, x: f32, y: f32, align: Align) {
        let (name, font) = &mut self.fonts[self.current_font];
        let width_pt = font.text_width_pt(text, self.font_size);
        let encoded = font.encode(text);
        if encoded.is_empty() {
            return;
        }
        let font_name = name.clone();

        let x_pt = x * MM_TO_PT
            - match align {
                Align::Left => 0.0,
                Align::Center => width_pt / 2.0,
                Align::Right => width_pt,
            };
        let y_pt = (self.dims.height - y) * MM_TO_PT;

        let [r, g, b] = self.fill;
        let content = &mut self.pages[self.current_page];
        if r == g && g == b {
            content.set_fill_gray(r as f32 / 255.0);
        } else {
            content.set_fill_rgb(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0);
        }
        content
            .begin_text()
            .set_font(Name(font_name.as_bytes()), self.font_size)
            .next_line(x_pt, y_pt)
            .show(Str(&encoded))
            .end_text();
    }

    fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32) {
        let h = self.dims.height;
        let content = &mut self.pages[self.current_page];
        content.save_state();
        content.set_line_width(0.5);
        content.move_to(x1 * MM_TO_PT, (h - y1) * MM_TO_PT);
        content.line_to(x2 * MM_TO_PT, (h - y2) * MM_TO_PT);
        content.stroke();
        content.restore_state();
    }

    fn split_text_to_size(&self, text: &str, max_width: f32) -> Vec<String> {
        let font = &self.fonts[self.current_font].1;
        let max_pt = max_width * MM_TO_PT;
        let space_w = font.text_width_pt(" ", self.font_size);

        let mut out = Vec::new();
        for segment in text.split('\n') {
            let segment = segment.strip_suffix('\r').unwrap_or(segment);

            let mut words = segment.split_whitespace().peekable();
            if words.peek().is_none() {
                out.push(String::new());
                continue;
            }

            let mut current = String::new();
            let mut current_w = 0.0f32;
            for word in words {
                let word_w = font.text_width_pt(word, self.font_size);

                // A word wider than the line gets hard-broken by characters;
                // the last fragment stays open so following words join it.
                if word_w > max_pt {
                    if !current.is_empty() {
                        out.push(std::mem::take(&mut current));
                    }
                    let mut piece_w = 0.0f32;
                    for ch in word.chars() {
                        let ch_w =
                            font.text_width_pt(ch.encode_utf8(&mut [0; 4]), self.font_size);
                        if !current.is_empty() && piece_w + ch_w > max_pt {
                            out.push(std::mem::take(&mut current));
                            piece_w = 0.0;
                        }
                        current.push(ch);
                        piece_w += ch_w;
                    }
                    current_w = piece_w;
                    continue;
                }

                if current.is_empty() {
                    current.push_str(word);
                    current_w = word_w;
                } else if current_w + space_w + word_w > max_pt {
                    out.push(std::mem::take(&mut current));
                    current.push_str(word);
                    current_w = word_w;
                } else {
                    current.push(' ');
                    current.push_str(word);
                    current_w += space_w + word_w;
                }
            }
            if !current.is_empty() {
                out.push(current);
            }
        }

        if out.is_empty() {
            out.push(String::new());
        }
        out
    }

    fn add_page(&mut self) {
        self.pages.push(Content::new());
        self.current_page = self.pages.len() - 1;
    }

    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn select_page(&mut self, page: usize) {
        self.current_page = page - 1;
    }
}
