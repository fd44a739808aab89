use std::path::{Path, PathBuf};

pub const DEFAULT_FILENAME: &str = "document";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum FontFamily {
    Helvetica,
    Times,
    Courier,
}

impl FontFamily {
    /// Base-14 PostScript name used in the PDF font dictionary.
    pub fn base_font_name(self) -> &'static str {
        match self {
            FontFamily::Helvetica => "Helvetica",
            FontFamily::Times => "Times-Roman",
            FontFamily::Courier => "Courier",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum PageSize {
    A4,
    Letter,
    Legal,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum Orientation {
    Portrait,
    Landscape,
}

/// Page width and height in millimeters, orientation already applied.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PageDimensions {
    pub width: f32,
    pub height: f32,
}

/// Document options, built once per invocation and read-only during rendering.
#[derive(Clone, Debug)]
pub struct Settings {
    pub filename: String,
    pub font: FontFamily,
    /// User-supplied TTF/OTF body font, embedded and subset into the output.
    pub font_file: Option<PathBuf>,
    pub font_size: f32,
    pub page_size: PageSize,
    pub orientation: Orientation,
    pub header_text: String,
    pub page_numbers: bool,
    pub line_numbers: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            filename: DEFAULT_FILENAME.to_string(),
            font: FontFamily::Helvetica,
            font_file: None,
            font_size: 12.0,
            page_size: PageSize::A4,
            orientation: Orientation::Portrait,
            header_text: String::new(),
            page_numbers: false,
            line_numbers: false,
        }
    }
}

impl Settings {
    /// Resolved page dimensions in mm. Landscape swaps width and height of the
    /// portrait lookup values.
    pub fn page_dimensions(&self) -> PageDimensions {
        let (width, height) = match self.page_size {
            PageSize::A4 => (210.0, 297.0),
            PageSize::Letter => (215.9, 279.4),
            PageSize::Legal => (215.9, 355.6),
        };
        match self.orientation {
            Orientation::Portrait => PageDimensions { width, height },
            Orientation::Landscape => PageDimensions {
                width: height,
                height: width,
            },
        }
    }

    /// Output filename is never empty: blank or whitespace-only values fall back
    /// to the default.
    pub fn set_filename(&mut self, name: &str) {
        let trimmed = name.trim();
        self.filename = if trimmed.is_empty() {
            DEFAULT_FILENAME.to_string()
        } else {
            trimmed.to_string()
        };
    }

    /// Adopt the input file's stem as the output filename, but only while the
    /// filename is still the default. A customized filename is left untouched.
    pub fn apply_input_stem(&mut self, input: &Path) {
        if self.filename != DEFAULT_FILENAME {
            return;
        }
        if let Some(stem) = input.file_stem().and_then(|s| s.to_str())
            && !stem.is_empty()
        {
            self.filename = stem.to_string();
        }
    }

    pub fn output_path(&self) -> PathBuf {
        PathBuf::from(format!("{}.pdf", self.filename))
    }
}
