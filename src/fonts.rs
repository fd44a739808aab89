use std::collections::HashMap;
use std::path::Path;

use pdf_writer::{Name, Pdf, Rect, Ref};
use subsetter::GlyphRemapper;
use ttf_parser::Face;

use crate::error::Error;
use crate::settings::FontFamily;

/// A font usable for measuring, encoding, and (at serialization time) writing
/// into the PDF. Base-14 fonts carry approximate width tables and need no font
/// program; a user-supplied font carries its parsed metrics plus the glyph
/// remapping state that drives subsetting.
pub(crate) enum LoadedFont {
    Builtin {
        base_font: &'static str,
        widths_1000: Vec<f32>,
    },
    Embedded {
        ps_name: String,
        data: Vec<u8>,
        widths_1000: Vec<f32>,
        /// WinAnsi-repertoire chars present in the font, original glyph ids.
        char_to_gid: HashMap<char, u16>,
        remapper: GlyphRemapper,
        /// Chars actually shown, with their remapped glyph ids.
        used: HashMap<char, u16>,
    },
}

impl LoadedFont {
    pub(crate) fn builtin(family: FontFamily) -> Self {
        let widths_1000 = match family {
            FontFamily::Helvetica => helvetica_widths(),
            FontFamily::Times => times_widths(),
            FontFamily::Courier => courier_widths(),
        };
        LoadedFont::Builtin {
            base_font: family.base_font_name(),
            widths_1000,
        }
    }

    /// Parse a TTF/OTF file and prepare it for on-demand glyph remapping.
    pub(crate) fn from_file(path: &Path) -> Result<Self, Error> {
        let data = std::fs::read(path)
            .map_err(|e| Error::Font(format!("{}: {e}", path.display())))?;
        let face = Face::parse(&data, 0)
            .map_err(|e| Error::Font(format!("{}: {e}", path.display())))?;

        let units = face.units_per_em() as f32;
        let widths_1000: Vec<f32> = (32u8..=255u8)
            .map(|byte| {
                face.glyph_index(winansi_to_char(byte))
                    .and_then(|gid| face.glyph_hor_advance(gid))
                    .map(|adv| adv as f32 / units * 1000.0)
                    .unwrap_or(0.0)
            })
            .collect();

        let mut char_to_gid = HashMap::new();
        for byte in 32u8..=255u8 {
            let ch = winansi_to_char(byte);
            if let Some(gid) = face.glyph_index(ch) {
                char_to_gid.insert(ch, gid.0);
            }
        }

        let ps_name = postscript_name(&face).unwrap_or_else(|| {
            path.file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("Embedded")
                .replace(' ', "")
        });

        Ok(LoadedFont::Embedded {
            ps_name,
            data,
            widths_1000,
            char_to_gid,
            remapper: GlyphRemapper::new(),
            used: HashMap::new(),
        })
    }

    fn char_width_1000(&self, ch: char) -> f32 {
        let widths = match self {
            LoadedFont::Builtin { widths_1000, .. } => widths_1000,
            LoadedFont::Embedded { widths_1000, .. } => widths_1000,
        };
        let byte = char_to_winansi(ch);
        if byte >= 32 {
            widths[(byte - 32) as usize]
        } else {
            0.0
        }
    }

    /// Width of a string in points at the given font size.
    pub(crate) fn text_width_pt(&self, text: &str, font_size: f32) -> f32 {
        text.chars()
            .map(|ch| self.char_width_1000(ch) * font_size / 1000.0)
            .sum()
    }

    /// Encode text for a content-stream show operator: WinAnsi bytes for
    /// base-14 fonts, big-endian remapped glyph ids for embedded fonts.
    /// Remapping records every glyph so the subset pass knows what to keep.
    pub(crate) fn encode(&mut self, text: &str) -> Vec<u8> {
        match self {
            LoadedFont::Builtin { .. } => to_winansi_bytes(text),
            LoadedFont::Embedded {
                char_to_gid,
                remapper,
                used,
                ..
            } => {
                let mut out = Vec::with_capacity(text.len() * 2);
                for ch in text.chars() {
                    let new_gid = match char_to_gid.get(&ch) {
                        Some(&gid) => {
                            let new_gid = remapper.remap(gid);
                            used.insert(ch, new_gid);
                            new_gid
                        }
                        None => 0,
                    };
                    out.push((new_gid >> 8) as u8);
                    out.push((new_gid & 0xFF) as u8);
                }
                out
            }
        }
    }

    /// Write this font's PDF objects. Embedded fonts are subset down to the
    /// glyphs recorded by `encode` and written as Type0/CIDFont with a
    /// ToUnicode CMap; base-14 fonts are a bare Type1 dictionary.
    pub(crate) fn write_into(
        self,
        pdf: &mut Pdf,
        font_ref: Ref,
        alloc: &mut impl FnMut() -> Ref,
    ) -> Result<(), Error> {
        match self {
            LoadedFont::Builtin { base_font, .. } => {
                pdf.type1_font(font_ref)
                    .base_font(Name(base_font.as_bytes()))
                    .encoding_predefined(Name(b"WinAnsiEncoding"));
                Ok(())
            }
            LoadedFont::Embedded {
                ps_name,
                data,
                remapper,
                used,
                ..
            } => embed_truetype(pdf, font_ref, &ps_name, &data, &remapper, &used, alloc),
        }
    }
}

fn postscript_name(face: &Face) -> Option<String> {
    for name in face.names() {
        if name.name_id == ttf_parser::name_id::POST_SCRIPT_NAME
            && name.is_unicode()
            && let Some(s) = name.to_string()
        {
            return Some(s.replace(' ', ""));
        }
    }
    None
}

/// Write the full Type0 pipeline for a subset TrueType font: font program
/// stream, descriptor, CIDFont with per-glyph widths, ToUnicode CMap.
fn embed_truetype(
    pdf: &mut Pdf,
    font_ref: Ref,
    ps_name: &str,
    data: &[u8],
    remapper: &GlyphRemapper,
    used: &HashMap<char, u16>,
    alloc: &mut impl FnMut() -> Ref,
) -> Result<(), Error> {
    let face = Face::parse(data, 0).map_err(|e| Error::Font(format!("{ps_name}: {e}")))?;
    let units = face.units_per_em() as f32;
    let ascent = face.ascender() as f32 / units * 1000.0;
    let descent = face.descender() as f32 / units * 1000.0;
    let cap_height = face
        .capital_height()
        .map(|h| h as f32 / units * 1000.0)
        .unwrap_or(700.0);
    let bb = face.global_bounding_box();
    let bbox = Rect::new(
        bb.x_min as f32 / units * 1000.0,
        bb.y_min as f32 / units * 1000.0,
        bb.x_max as f32 / units * 1000.0,
        bb.y_max as f32 / units * 1000.0,
    );

    let subset_data = subsetter::subset(data, 0, remapper)
        .map_err(|e| Error::Font(format!("subsetting {ps_name} failed: {e}")))?;
    let data_len = i32::try_from(subset_data.len())
        .map_err(|_| Error::Font(format!("{ps_name}: font program too large")))?;

    let descriptor_ref = alloc();
    let data_ref = alloc();
    let cid_font_ref = alloc();
    let tounicode_ref = alloc();

    pdf.stream(data_ref, &subset_data)
        .pair(Name(b"Length1"), data_len);

    pdf.font_descriptor(descriptor_ref)
        .name(Name(ps_name.as_bytes()))
        .flags(pdf_writer::types::FontFlags::NON_SYMBOLIC)
        .bbox(bbox)
        .italic_angle(0.0)
        .ascent(ascent)
        .descent(descent)
        .cap_height(cap_height)
        .stem_v(80.0)
        .font_file2(data_ref);

    {
        let mut cid = pdf.cid_font(cid_font_ref);
        cid.subtype(pdf_writer::types::CidFontType::Type2);
        cid.base_font(Name(ps_name.as_bytes()));
        cid.system_info(pdf_writer::types::SystemInfo {
            registry: pdf_writer::Str(b"Adobe"),
            ordering: pdf_writer::Str(b"Identity"),
            supplement: 0,
        });
        cid.font_descriptor(descriptor_ref);
        cid.default_width(0.0);
        cid.cid_to_gid_map_predefined(Name(b"Identity"));

        let mut gid_widths: Vec<(u16, f32)> = used
            .iter()
            .filter_map(|(&ch, &new_gid)| {
                face.glyph_index(ch)
                    .and_then(|gid| face.glyph_hor_advance(gid))
                    .map(|adv| (new_gid, adv as f32 / units * 1000.0))
            })
            .collect();
        gid_widths.sort_by_key(|&(gid, _)| gid);
        if !gid_widths.is_empty() {
            let mut w = cid.widths();
            for &(gid, width) in &gid_widths {
                w.consecutive(gid, [width]);
            }
        }
    }

    let cmap_name = format!("{ps_name}-UTF16");
    let mut cmap = pdf_writer::types::UnicodeCmap::new(
        Name(cmap_name.as_bytes()),
        pdf_writer::types::SystemInfo {
            registry: pdf_writer::Str(b"Adobe"),
            ordering: pdf_writer::Str(b"Identity"),
            supplement: 0,
        },
    );
    for (&ch, &new_gid) in used {
        cmap.pair(new_gid, ch);
    }
    let cmap_data = cmap.finish();
    pdf.stream(tounicode_ref, cmap_data.as_slice());

    pdf.type0_font(font_ref)
        .base_font(Name(ps_name.as_bytes()))
        .encoding_predefined(Name(b"Identity-H"))
        .descendant_font(cid_font_ref)
        .to_unicode(tounicode_ref);

    Ok(())
}

/// Windows-1252 (WinAnsi) byte to Unicode char. Bytes 0x80-0x9F are remapped;
/// all others map directly to their codepoint.
fn winansi_to_char(byte: u8) -> char {
    match byte {
        0x80 => '\u{20AC}',
        0x82 => '\u{201A}',
        0x83 => '\u{0192}',
        0x84 => '\u{201E}',
        0x85 => '\u{2026}',
        0x86 => '\u{2020}',
        0x87 => '\u{2021}',
        0x88 => '\u{02C6}',
        0x89 => '\u{2030}',
        0x8A => '\u{0160}',
        0x8B => '\u{2039}',
        0x8C => '\u{0152}',
        0x8E => '\u{017D}',
        0x91 => '\u{2018}',
        0x92 => '\u{2019}',
        0x93 => '\u{201C}',
        0x94 => '\u{201D}',
        0x95 => '\u{2022}',
        0x96 => '\u{2013}',
        0x97 => '\u{2014}',
        0x98 => '\u{02DC}',
        0x99 => '\u{2122}',
        0x9A => '\u{0161}',
        0x9B => '\u{203A}',
        0x9C => '\u{0153}',
        0x9E => '\u{017E}',
        0x9F => '\u{0178}',
        _ => byte as char,
    }
}

/// Map a single Unicode char to its WinAnsi byte, or 0 if unmappable.
fn char_to_winansi(c: char) -> u8 {
    match c as u32 {
        0x0020..=0x007F => c as u8,
        0x00A0..=0x00FF => c as u8,
        0x20AC => 0x80,
        0x201A => 0x82,
        0x0192 => 0x83,
        0x201E => 0x84,
        0x2026 => 0x85,
        0x2020 => 0x86,
        0x2021 => 0x87,
        0x02C6 => 0x88,
        0x2030 => 0x89,
        0x0160 => 0x8A,
        0x2039 => 0x8B,
        0x0152 => 0x8C,
        0x017D => 0x8E,
        0x2018 => 0x91,
        0x2019 => 0x92,
        0x201C => 0x93,
        0x201D => 0x94,
        0x2022 => 0x95,
        0x2013 => 0x96,
        0x2014 => 0x97,
        0x02DC => 0x98,
        0x2122 => 0x99,
        0x0161 => 0x9A,
        0x203A => 0x9B,
        0x0153 => 0x9C,
        0x017E => 0x9E,
        0x0178 => 0x9F,
        _ => 0,
    }
}

/// Convert a UTF-8 string to WinAnsi bytes for PDF Str encoding. Characters
/// outside the repertoire are dropped.
pub(crate) fn to_winansi_bytes(s: &str) -> Vec<u8> {
    s.chars()
        .filter_map(|c| {
            let byte = char_to_winansi(c);
            (byte >= 32).then_some(byte)
        })
        .collect()
}

/// Approximate Helvetica widths at 1000 units/em for WinAnsi chars 32..=255.
fn helvetica_widths() -> Vec<f32> {
    (32u8..=255u8)
        .map(|b| match b {
            32 => 278.0,                          // space
            33..=47 => 333.0,                     // punctuation
            48..=57 => 556.0,                     // digits
            58..=64 => 333.0,                     // more punctuation
            73 | 74 => 278.0,                     // I J (narrow uppercase)
            77 => 833.0,                          // M (wide)
            65..=90 => 667.0,                     // uppercase A-Z (average)
            91..=96 => 333.0,                     // brackets etc.
            102 | 105 | 106 | 108 | 116 => 278.0, // narrow lowercase: f i j l t
            109 | 119 => 833.0,                   // m w (wide)
            97..=122 => 556.0,                    // lowercase a-z (average)
            _ => 556.0,
        })
        .collect()
}

/// Approximate Times-Roman widths at 1000 units/em for WinAnsi chars 32..=255.
fn times_widths() -> Vec<f32> {
    (32u8..=255u8)
        .map(|b| match b {
            32 => 250.0,              // space
            33..=47 => 333.0,         // punctuation
            48..=57 => 500.0,         // digits
            58..=64 => 333.0,         // more punctuation
            73 => 333.0,              // I (narrow uppercase)
            74 => 389.0,              // J
            77 | 87 => 889.0,         // M W (wide)
            65..=90 => 667.0,         // uppercase A-Z (average)
            91..=96 => 333.0,         // brackets etc.
            105 | 106 | 108 => 278.0, // narrow lowercase: i j l
            102 | 116 => 333.0,       // f t
            109 => 778.0,             // m (wide)
            119 => 722.0,             // w
            97..=122 => 480.0,        // lowercase a-z (average)
            _ => 500.0,
        })
        .collect()
}

/// Courier is monospaced: every glyph advances 600 units.
fn courier_widths() -> Vec<f32> {
    vec![600.0; 224]
}
