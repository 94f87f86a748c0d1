//! Font registry and metrics.
//!
//! `FontBook` holds every face the document may use, keyed by family and
//! variant. The three standard PDF families (Helvetica, Times, Courier) are
//! always present and referenced by name only; families from the render
//! config are TrueType programs that get embedded.
//!
//! Each face carries an advance-width table over the WinAnsi code page in
//! 1/1000 em, which serves both line breaking and the PDF `/Widths` array.

use crate::LayoutError;
use crate::win_ansi;
use folio_style::{FontVariant, RenderConfig, TextStyle};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FontId(pub usize);

/// Metrics needed for a PDF font descriptor, in 1/1000 em.
#[derive(Debug, Clone, PartialEq)]
pub struct FaceDescriptor {
    pub ascent: i32,
    pub descent: i32,
    pub cap_height: i32,
    pub bbox: [i32; 4],
    pub italic: bool,
    pub fixed_pitch: bool,
}

#[derive(Debug, Clone)]
pub enum FaceSource {
    /// A base-14 PDF font, never embedded.
    Standard,
    /// A TrueType program embedded into the output.
    TrueType {
        data: Arc<Vec<u8>>,
        descriptor: FaceDescriptor,
    },
}

#[derive(Debug, Clone)]
pub struct FontFace {
    pub id: FontId,
    pub family: String,
    pub variant: FontVariant,
    pub postscript_name: String,
    pub source: FaceSource,
    widths: Box<[u16; 256]>,
}

impl FontFace {
    pub fn widths(&self) -> &[u16; 256] {
        &self.widths
    }

    pub fn char_width(&self, c: char) -> u16 {
        self.widths[win_ansi::encode_char(c) as usize]
    }

    /// Width of `text` set at `size` points.
    pub fn measure(&self, text: &str, size: f32) -> f32 {
        let units: u32 = text.chars().map(|c| self.char_width(c) as u32).sum();
        units as f32 * size / 1000.0
    }
}

const STANDARD_FAMILIES: [(&str, [&str; 4]); 3] = [
    (
        "Helvetica",
        ["Helvetica", "Helvetica-Bold", "Helvetica-Oblique", "Helvetica-BoldOblique"],
    ),
    (
        "Times",
        ["Times-Roman", "Times-Bold", "Times-Italic", "Times-BoldItalic"],
    ),
    (
        "Courier",
        ["Courier", "Courier-Bold", "Courier-Oblique", "Courier-BoldOblique"],
    ),
];

#[derive(Clone)]
pub struct FontBook {
    faces: Vec<FontFace>,
    families: HashMap<String, [Option<FontId>; 4]>,
}

impl std::fmt::Debug for FontBook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontBook")
            .field("faces", &self.faces.len())
            .field("families", &self.families.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl Default for FontBook {
    fn default() -> Self {
        Self::new()
    }
}

impl FontBook {
    /// A font book holding only the standard PDF families.
    pub fn new() -> Self {
        let mut book = Self {
            faces: Vec::new(),
            families: HashMap::new(),
        };
        for (family, names) in STANDARD_FAMILIES {
            for (variant, ps_name) in FontVariant::ALL.into_iter().zip(names) {
                let widths = standard_widths(family, variant);
                book.insert(family, variant, ps_name.to_string(), FaceSource::Standard, widths);
            }
        }
        book
    }

    /// The standard families plus every TrueType family named in the config.
    pub fn from_config(config: &RenderConfig) -> Result<Self, LayoutError> {
        let mut book = Self::new();
        for (family, variants) in &config.fonts {
            for variant in FontVariant::ALL {
                if let Some(path) = variants.path(variant) {
                    book.load_truetype_file(family, variant, path)?;
                }
            }
        }
        Ok(book)
    }

    pub fn load_truetype_file(
        &mut self,
        family: &str,
        variant: FontVariant,
        path: &Path,
    ) -> Result<FontId, LayoutError> {
        log::debug!("Loading {:?} face of '{}' from {}", variant, family, path.display());
        let data = std::fs::read(path).map_err(|source| LayoutError::FontIo {
            family: family.to_string(),
            path: path.to_path_buf(),
            source,
        })?;
        self.add_truetype(family, variant, data)
    }

    /// Registers a TrueType face, replacing any face already bound to the same family and variant.
    pub fn add_truetype(
        &mut self,
        family: &str,
        variant: FontVariant,
        data: Vec<u8>,
    ) -> Result<FontId, LayoutError> {
        let face = ttf_parser::Face::parse(&data, 0).map_err(|e| LayoutError::FontParse {
            family: family.to_string(),
            message: e.to_string(),
        })?;

        let upem = face.units_per_em() as f32;
        let scale = |v: i32| (v as f32 * 1000.0 / upem).round() as i32;
        let advance = |c: char| face.glyph_index(c).and_then(|g| face.glyph_hor_advance(g));
        let fallback = advance('?').unwrap_or(0);

        let mut widths = Box::new([0u16; 256]);
        for code in 0..=255u8 {
            let adv = win_ansi::decode_byte(code)
                .and_then(|c| advance(c).or_else(|| (c == '\u{a0}').then(|| advance(' ')).flatten()))
                .unwrap_or(fallback);
            widths[code as usize] = scale(adv as i32).max(0) as u16;
        }

        let bbox = face.global_bounding_box();
        let descriptor = FaceDescriptor {
            ascent: scale(face.ascender() as i32),
            descent: scale(face.descender() as i32),
            cap_height: scale(face.capital_height().unwrap_or(face.ascender()) as i32),
            bbox: [
                scale(bbox.x_min as i32),
                scale(bbox.y_min as i32),
                scale(bbox.x_max as i32),
                scale(bbox.y_max as i32),
            ],
            italic: face.is_italic() || variant.is_italic(),
            fixed_pitch: face.is_monospaced(),
        };

        let postscript_name = postscript_name(&face)
            .unwrap_or_else(|| format!("{}-{:?}", family.replace(' ', ""), variant));
        drop(face);

        let source = FaceSource::TrueType {
            data: Arc::new(data),
            descriptor,
        };
        Ok(self.insert(family, variant, postscript_name, source, widths))
    }

    fn insert(
        &mut self,
        family: &str,
        variant: FontVariant,
        postscript_name: String,
        source: FaceSource,
        widths: Box<[u16; 256]>,
    ) -> FontId {
        let id = FontId(self.faces.len());
        self.faces.push(FontFace {
            id,
            family: family.to_string(),
            variant,
            postscript_name,
            source,
            widths,
        });
        let slots = self.families.entry(family.to_lowercase()).or_default();
        slots[variant_slot(variant)] = Some(id);
        id
    }

    pub fn has_family(&self, family: &str) -> bool {
        self.families.contains_key(&family.to_lowercase())
    }

    /// Finds the face for a family and style. Falls back to the family's
    /// regular face when the requested variant was not provided.
    pub fn resolve(&self, family: &str, style: TextStyle) -> Result<FontId, LayoutError> {
        let slots = self
            .families
            .get(&family.to_lowercase())
            .ok_or_else(|| LayoutError::UnknownFont(family.to_string()))?;
        let variant = style.variant();
        slots[variant_slot(variant)]
            .or_else(|| {
                log::debug!("Family '{}' has no {:?} face, using regular", family, variant);
                slots[variant_slot(FontVariant::Regular)]
            })
            .ok_or_else(|| LayoutError::UnknownFont(family.to_string()))
    }

    pub fn face(&self, id: FontId) -> &FontFace {
        &self.faces[id.0]
    }

    pub fn faces(&self) -> &[FontFace] {
        &self.faces
    }
}

fn variant_slot(variant: FontVariant) -> usize {
    match variant {
        FontVariant::Regular => 0,
        FontVariant::Bold => 1,
        FontVariant::Italic => 2,
        FontVariant::BoldItalic => 3,
    }
}

fn postscript_name(face: &ttf_parser::Face<'_>) -> Option<String> {
    face.names()
        .into_iter()
        .find(|n| n.name_id == ttf_parser::name_id::POST_SCRIPT_NAME)
        .and_then(|n| n.to_string())
        .or_else(|| {
            face.names()
                .into_iter()
                .find(|n| n.name_id == ttf_parser::name_id::FULL_NAME)
                .and_then(|n| n.to_string())
                .map(|full| full.replace(' ', ""))
        })
}

/// Approximate advance widths for the standard fonts.
///
/// Courier is exact. Helvetica and Times use per-class averages.
fn standard_widths(family: &str, variant: FontVariant) -> Box<[u16; 256]> {
    let mut widths = Box::new([0u16; 256]);
    for code in 0..=255u8 {
        widths[code as usize] = match family {
            "Courier" => 600,
            "Times" => match code {
                b' ' | 0xA0 => 250,
                b'a'..=b'z' => if variant.is_bold() { 480 } else { 444 },
                b'A'..=b'Z' => if variant.is_bold() { 700 } else { 667 },
                b'0'..=b'9' => 500,
                _ => 333,
            },
            _ => match code {
                b' ' | 0xA0 => 278,
                b'a'..=b'z' => if variant.is_bold() { 556 } else { 500 },
                b'A'..=b'Z' => if variant.is_bold() { 722 } else { 667 },
                b'0'..=b'9' => 556,
                _ => 333,
            },
        };
    }
    widths
}
