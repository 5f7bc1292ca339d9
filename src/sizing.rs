//! Output canvas size, computed before the draw pass.

use crate::font::{FontId, TextBounds, Typesetter};
use crate::layout::fit_to_width;
use crate::segment::{LINE_SEPARATOR, strip_directives};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CropOptions {
    pub enable: bool,
    pub width: i32,
    pub height: i32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WrapOptions {
    pub enable: bool,
    pub width: i32,
}

/// Re-flows every line of `stripped` to at most `wrap_width` and returns the
/// wrapped lines.
///
/// Empty source lines produce no wrapped line.
pub fn wrap_lines(
    typesetter: &dyn Typesetter,
    font: FontId,
    stripped: &str,
    wrap_width: i32,
) -> Vec<String> {
    let mut wrapped = Vec::new();
    for source in stripped.split(LINE_SEPARATOR) {
        let mut carry_over = source.to_string();
        while !carry_over.is_empty() {
            let (line, rest) = fit_to_width(&carry_over, wrap_width, true, |s| {
                typesetter.measure(font, s).width
            });
            wrapped.push(line);
            carry_over = rest;
        }
    }
    wrapped
}

/// Computes the canvas size for `text`.
///
/// The wrap width is clamped to at least the crop width (crop enabled or
/// not) and at most the natural width. Crop dimensions greater than zero
/// override the computed ones.
pub fn canvas_size(
    typesetter: &dyn Typesetter,
    font: FontId,
    text: &str,
    crop: CropOptions,
    wrap: WrapOptions,
) -> TextBounds {
    // natural size: directive-free text on unwrapped lines
    let stripped = strip_directives(text);
    let natural = typesetter.measure(font, &stripped);

    let mut size = natural;
    if wrap.enable {
        let wrap_width = wrap.width.max(crop.width).min(natural.width);
        let lines = wrap_lines(typesetter, font, &stripped, wrap_width);
        size = typesetter.measure(font, &lines.join("\n"));
        tracing::debug!(
            target: "text.layout",
            wrap_width,
            lines = lines.len(),
            width = size.width,
            height = size.height,
            "wrapped size"
        );
    }

    if crop.enable {
        if crop.width > 0 {
            size.width = crop.width;
        }
        if crop.height > 0 {
            size.height = crop.height;
        }
    }
    size
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::FixedTypesetter;

    fn t() -> FixedTypesetter {
        FixedTypesetter::new(10, 16)
    }

    fn size(text: &str, crop: CropOptions, wrap: WrapOptions) -> TextBounds {
        canvas_size(&t(), FontId::DEFAULT, text, crop, wrap)
    }

    #[test]
    fn natural_size_ignores_directives() {
        let s = size(
            "ab\\{\"color\":{\"push\":true}}\\cd\nxyz",
            CropOptions::default(),
            WrapOptions::default(),
        );
        assert_eq!(s, TextBounds::new(40, 32));
    }

    #[test]
    fn wrapped_size_reflows_lines() {
        let s = size(
            "abcdefghij\nab",
            CropOptions::default(),
            WrapOptions { enable: true, width: 40 },
        );
        // abcd / efgh / ij / ab
        assert_eq!(s, TextBounds::new(40, 64));
    }

    #[test]
    fn wrap_width_is_capped_by_natural_width() {
        let s = size("abc", CropOptions::default(), WrapOptions { enable: true, width: 500 });
        assert_eq!(s, TextBounds::new(30, 16));
    }

    #[test]
    fn crop_width_raises_wrap_width_even_when_disabled() {
        let crop = CropOptions {
            enable: false,
            width: 60,
            height: 0,
        };
        let s = size("abcdefghij", crop, WrapOptions { enable: true, width: 20 });
        assert_eq!(s, TextBounds::new(60, 32));
    }

    #[test]
    fn crop_overrides_each_axis_independently() {
        let wrap = WrapOptions { enable: true, width: 20 };
        let both = CropOptions {
            enable: true,
            width: 33,
            height: 7,
        };
        assert_eq!(size("abcdefghij", both, wrap), TextBounds::new(33, 7));
        assert_eq!(size("abcdefghij", both, WrapOptions::default()), TextBounds::new(33, 7));

        let only_height = CropOptions {
            enable: true,
            width: 0,
            height: 7,
        };
        assert_eq!(size("abc", only_height, WrapOptions::default()), TextBounds::new(30, 7));
    }

    #[test]
    fn empty_lines_are_dropped_when_wrapping() {
        let lines = wrap_lines(&t(), FontId::DEFAULT, "ab\n\ncd", 100);
        assert_eq!(lines, ["ab", "cd"]);
    }

    #[test]
    fn zero_wrap_width_puts_one_rune_per_line() {
        let lines = wrap_lines(&t(), FontId::DEFAULT, "aあb", 0);
        assert_eq!(lines, ["a", "あ", "b"]);
    }

    #[test]
    fn empty_text_is_zero_sized() {
        assert_eq!(
            size("", CropOptions::default(), WrapOptions { enable: true, width: 10 }),
            TextBounds::new(0, 0)
        );
    }
}
