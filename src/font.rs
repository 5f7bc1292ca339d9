//! Font registry, measurement and glyph drawing.

use std::collections::HashMap;
use std::path::Path;

use ab_glyph::{Font as _, FontArc, Glyph, PxScale, ScaleFont as _, point};
use image::Rgba;

use crate::canvas::{Bounds, Canvas};
use crate::error::TextError;

/// Handle to a face registered in a [`Typesetter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FontId(pub(crate) u32);

impl FontId {
    /// The face every unknown name resolves to.
    pub const DEFAULT: FontId = FontId(0);

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Pixel extent of a measured string.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextBounds {
    pub width: i32,
    pub height: i32,
}

impl TextBounds {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

/// Measures and draws strings for the layout engine.
///
/// Implementations are read-only during a layout call. `text` may contain
/// `'\n'`, in which case lines are stacked downward from the first baseline.
pub trait Typesetter {
    /// Maps a font name to a face, falling back to [`FontId::DEFAULT`].
    fn resolve(&self, name: Option<&str>) -> FontId;

    fn measure(&self, font: FontId, text: &str) -> TextBounds;

    /// Draws `text` with its first baseline at `y`.
    fn draw_text(&self, canvas: &mut Canvas, font: FontId, text: &str, x: i32, y: i32, color: Rgba<u8>);

    /// Height of a representative sample string.
    fn line_height(&self, font: FontId) -> i32 {
        self.measure(font, "aAあ!").height
    }
}

pub fn load_font_from_file(path: impl AsRef<Path>) -> Result<Vec<u8>, TextError> {
    let path = path.as_ref();
    std::fs::read(path).map_err(|source| TextError::Io {
        path: path.to_path_buf(),
        source,
    })
}

struct Face {
    font: FontArc,
    scale: PxScale,
}

/// Outline faces loaded once at startup, looked up by name.
pub struct FontRegistry {
    faces: Vec<Face>,
    names: HashMap<String, FontId>,
}

impl std::fmt::Debug for FontRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontRegistry")
            .field("faces", &self.faces.len())
            .field("names", &self.names)
            .finish()
    }
}

impl FontRegistry {
    /// Creates a registry whose default face is parsed from `font_data`.
    pub fn new(font_data: Vec<u8>, px_size: f32) -> Result<Self, TextError> {
        let mut registry = Self {
            faces: Vec::new(),
            names: HashMap::new(),
        };
        registry.register("default", font_data, px_size)?;
        Ok(registry)
    }

    /// Parses and registers a face. Re-registering a name points it at the new face.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        font_data: Vec<u8>,
        px_size: f32,
    ) -> Result<FontId, TextError> {
        let name = name.into();
        let font = FontArc::try_from_vec(font_data).map_err(|e| TextError::FontParse {
            name: name.clone(),
            reason: e.to_string(),
        })?;
        let id = FontId(self.faces.len() as u32);
        self.faces.push(Face {
            font,
            scale: PxScale::from(px_size.max(1.0)),
        });
        tracing::debug!(target: "text.font", name = %name, id = id.0, px_size, "registered font");
        self.names.insert(name, id);
        Ok(id)
    }

    fn face(&self, font: FontId) -> &Face {
        self.faces.get(font.index()).unwrap_or(&self.faces[0])
    }

    /// Lays out the glyphs of `text` starting at baseline `(x, y)` and hands
    /// each outlined glyph to `visit`. Returns the widest line advance.
    fn for_each_glyph(
        &self,
        font: FontId,
        text: &str,
        x: f32,
        y: f32,
        mut visit: impl FnMut(ab_glyph::OutlinedGlyph),
    ) -> f32 {
        let face = self.face(font);
        let scaled = face.font.as_scaled(face.scale);
        let line_advance = scaled.ascent() - scaled.descent() + scaled.line_gap();

        let mut max_width = 0.0f32;
        for (index, line) in text.split('\n').enumerate() {
            let baseline = y + index as f32 * line_advance;
            let mut caret = 0.0f32;
            let mut prev: Option<ab_glyph::GlyphId> = None;
            for ch in line.chars() {
                let id = scaled.glyph_id(ch);
                if let Some(p) = prev {
                    caret += scaled.kern(p, id);
                }
                prev = Some(id);
                let glyph = Glyph {
                    id,
                    scale: face.scale,
                    position: point(x + caret, baseline),
                };
                if let Some(outlined) = scaled.outline_glyph(glyph) {
                    visit(outlined);
                }
                caret += scaled.h_advance(id);
            }
            max_width = max_width.max(caret);
        }
        max_width
    }
}

impl Typesetter for FontRegistry {
    fn resolve(&self, name: Option<&str>) -> FontId {
        name.and_then(|n| self.names.get(n).copied())
            .unwrap_or(FontId::DEFAULT)
    }

    fn measure(&self, font: FontId, text: &str) -> TextBounds {
        let mut min_y = f32::INFINITY;
        let mut max_y = f32::NEG_INFINITY;
        let width = self.for_each_glyph(font, text, 0.0, 0.0, |glyph| {
            let bounds = glyph.px_bounds();
            min_y = min_y.min(bounds.min.y);
            max_y = max_y.max(bounds.max.y);
        });
        let height = if max_y > min_y { max_y - min_y } else { 0.0 };
        TextBounds::new(width.ceil() as i32, height.ceil() as i32)
    }

    fn draw_text(&self, canvas: &mut Canvas, font: FontId, text: &str, x: i32, y: i32, color: Rgba<u8>) {
        self.for_each_glyph(font, text, x as f32, y as f32, |glyph| {
            let bounds = glyph.px_bounds();
            let left = bounds.min.x.floor() as i32;
            let top = bounds.min.y.floor() as i32;
            glyph.draw(|gx, gy, coverage| {
                canvas.blend_pixel(left + gx as i32, top + gy as i32, color, coverage);
            });
        });
    }
}

/// Fixed-advance face description for [`FixedTypesetter`].
#[derive(Debug, Clone, PartialEq, Eq)]
struct FixedFace {
    name: String,
    advance: i32,
    line_height: i32,
}

/// Deterministic typesetter that needs no font files.
///
/// ASCII characters advance by `advance`, everything else by twice that;
/// every line is `line_height` tall. Glyphs are drawn as solid blocks. Used
/// for headless rendering when no outline font is configured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedTypesetter {
    faces: Vec<FixedFace>,
}

impl FixedTypesetter {
    pub fn new(advance: i32, line_height: i32) -> Self {
        Self {
            faces: vec![FixedFace {
                name: "default".to_string(),
                advance,
                line_height,
            }],
        }
    }

    pub fn with_face(mut self, name: impl Into<String>, advance: i32, line_height: i32) -> Self {
        self.faces.push(FixedFace {
            name: name.into(),
            advance,
            line_height,
        });
        self
    }

    fn face(&self, font: FontId) -> &FixedFace {
        self.faces.get(font.index()).unwrap_or(&self.faces[0])
    }

    fn char_advance(face: &FixedFace, ch: char) -> i32 {
        if ch.is_ascii() {
            face.advance
        } else {
            face.advance * 2
        }
    }
}

impl Typesetter for FixedTypesetter {
    fn resolve(&self, name: Option<&str>) -> FontId {
        name.and_then(|n| self.faces.iter().position(|f| f.name == n))
            .map(|i| FontId(i as u32))
            .unwrap_or(FontId::DEFAULT)
    }

    fn measure(&self, font: FontId, text: &str) -> TextBounds {
        if text.is_empty() {
            return TextBounds::default();
        }
        let face = self.face(font);
        let mut width = 0;
        let mut lines = 0;
        for line in text.split('\n') {
            lines += 1;
            width = width.max(line.chars().map(|ch| Self::char_advance(face, ch)).sum());
        }
        TextBounds::new(width, face.line_height * lines)
    }

    fn draw_text(&self, canvas: &mut Canvas, font: FontId, text: &str, x: i32, y: i32, color: Rgba<u8>) {
        let face = self.face(font);
        let glyph_height = (face.line_height * 3 / 4).max(1);
        for (index, line) in text.split('\n').enumerate() {
            let baseline = y + index as i32 * face.line_height;
            let mut caret = x;
            for ch in line.chars() {
                let advance = Self::char_advance(face, ch);
                if !ch.is_whitespace() {
                    canvas.fill_rect(
                        Bounds::new(caret, baseline - glyph_height, (advance - 1).max(1), glyph_height),
                        color,
                    );
                }
                caret += advance;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_measure_counts_runes_not_bytes() {
        let t = FixedTypesetter::new(10, 16);
        assert_eq!(t.measure(FontId::DEFAULT, "ab"), TextBounds::new(20, 16));
        assert_eq!(t.measure(FontId::DEFAULT, "あい"), TextBounds::new(40, 16));
        assert_eq!(t.measure(FontId::DEFAULT, ""), TextBounds::new(0, 0));
        assert_eq!(t.measure(FontId::DEFAULT, "abc\nd"), TextBounds::new(30, 32));
    }

    #[test]
    fn fixed_resolves_names_with_default_fallback() {
        let t = FixedTypesetter::new(10, 16).with_face("mono", 8, 12);
        assert_eq!(t.resolve(Some("mono")), FontId(1));
        assert_eq!(t.resolve(Some("default")), FontId::DEFAULT);
        assert_eq!(t.resolve(Some("nope")), FontId::DEFAULT);
        assert_eq!(t.resolve(None), FontId::DEFAULT);
        assert_eq!(t.line_height(FontId(1)), 12);
    }

    #[test]
    fn fixed_draw_paints_above_baseline() {
        let t = FixedTypesetter::new(4, 8);
        let mut canvas = Canvas::new(8, 8);
        t.draw_text(&mut canvas, FontId::DEFAULT, "a b", 0, 8, Rgba([255, 0, 0, 255]));
        assert_eq!(canvas.get(0, 7), Some(Rgba([255, 0, 0, 255])));
        assert_eq!(canvas.get(0, 1), Some(Rgba([0, 0, 0, 0])));
        // the space is not painted
        assert_eq!(canvas.get(5, 7), Some(Rgba([0, 0, 0, 0])));
    }

    #[test]
    fn registry_rejects_garbage_font_data() {
        let err = FontRegistry::new(vec![0, 1, 2, 3], 48.0).unwrap_err();
        assert!(matches!(err, TextError::FontParse { ref name, .. } if name == "default"));
    }

    #[test]
    fn missing_font_file_is_io_error() {
        let err = load_font_from_file("__no_such_font__.ttf").unwrap_err();
        assert!(matches!(err, TextError::Io { .. }));
    }
}
