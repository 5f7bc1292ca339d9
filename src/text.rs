use std::fmt;

use image::Rgba;

use crate::canvas::Canvas;
use crate::error::TextError;
use crate::font::{TextBounds, Typesetter};
use crate::layout::{Layout, lay_out};
use crate::segment::tokenize;
use crate::sizing::{CropOptions, WrapOptions, canvas_size};
use crate::style::{StyleStacks, TextDefaults};

/// Options for [`TextManager::create_text_image`].
///
/// # Example
/// ```
/// # use spottedtext::CreateTextImageOptions;
/// let opts = CreateTextImageOptions::new("Hello\nWorld")
///     .with_wrap(120)
///     .with_crop(120, 0);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateTextImageOptions {
    pub text: String,
    pub crop: CropOptions,
    pub wrap: WrapOptions,
}

impl CreateTextImageOptions {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Enables wrapping at `width` pixels.
    pub fn with_wrap(mut self, width: i32) -> Self {
        self.wrap = WrapOptions { enable: true, width };
        self
    }

    /// Enables cropping. A zero dimension keeps the computed one.
    pub fn with_crop(mut self, width: i32, height: i32) -> Self {
        self.crop = CropOptions {
            enable: true,
            width,
            height,
        };
        self
    }
}

/// A rendered rich-text image and the layout that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct TextImage {
    pub canvas: Canvas,
    pub layout: Layout,
}

/// Options for drawing one plain string with [`TextManager::draw`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextDrawOptions {
    pub text: String,
    pub font: Option<String>,
    /// Left edge and baseline.
    pub position: (i32, i32),
    pub color: Rgba<u8>,
}

impl TextDrawOptions {
    pub fn new(text: impl Into<String>, x: i32, y: i32) -> Self {
        Self {
            text: text.into(),
            font: None,
            position: (x, y),
            color: Rgba([255, 255, 255, 255]),
        }
    }

    pub fn with_color(mut self, color: Rgba<u8>) -> Self {
        self.color = color;
        self
    }

    pub fn with_font(mut self, name: impl Into<String>) -> Self {
        self.font = Some(name.into());
        self
    }
}

/// Entry point of the text engine: default style plus the typesetter.
pub struct TextManager {
    defaults: TextDefaults,
    typesetter: Box<dyn Typesetter>,
}

impl fmt::Debug for TextManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextManager")
            .field("defaults", &self.defaults)
            .finish_non_exhaustive()
    }
}

impl TextManager {
    pub fn new(defaults: TextDefaults, typesetter: impl Typesetter + 'static) -> Self {
        Self {
            defaults,
            typesetter: Box::new(typesetter),
        }
    }

    pub fn defaults(&self) -> &TextDefaults {
        &self.defaults
    }

    pub fn typesetter(&self) -> &dyn Typesetter {
        self.typesetter.as_ref()
    }

    /// Measures `text` in the default font, directives included verbatim.
    pub fn measure(&self, text: &str) -> TextBounds {
        let font = self.typesetter.resolve(self.defaults.font.name.as_deref());
        self.typesetter.measure(font, text)
    }

    /// Draws a plain string; no directives are interpreted.
    pub fn draw(&self, canvas: &mut Canvas, options: &TextDrawOptions) {
        let font = self.typesetter.resolve(options.font.as_deref());
        let (x, y) = options.position;
        self.typesetter
            .draw_text(canvas, font, &options.text, x, y, options.color);
    }

    /// Lays out `options.text` with its inline directives and renders it onto
    /// a new canvas sized from the text, the wrap width and the crop box.
    ///
    /// # Errors
    /// [`TextError::MalformedDirective`] if any directive payload fails to
    /// decode; nothing is rendered in that case.
    pub fn create_text_image(&self, options: &CreateTextImageOptions) -> Result<TextImage, TextError> {
        let segments = tokenize(&options.text)?;

        let default_font = self.typesetter.resolve(self.defaults.font.name.as_deref());
        let size = canvas_size(
            self.typesetter(),
            default_font,
            &options.text,
            options.crop,
            options.wrap,
        );
        let mut canvas = Canvas::new(size.width.max(0) as u32, size.height.max(0) as u32);

        let mut stacks = StyleStacks::new(&self.defaults);
        let layout = lay_out(
            segments,
            &mut stacks,
            size.width,
            options.wrap.enable,
            self.typesetter(),
        );

        for instruction in &layout.instructions {
            self.typesetter.draw_text(
                &mut canvas,
                instruction.font,
                &instruction.text,
                instruction.x,
                instruction.y,
                instruction.color,
            );
        }

        tracing::debug!(
            target: "text.layout",
            width = size.width,
            height = size.height,
            draws = layout.instructions.len(),
            lines = layout.lines(),
            "created text image"
        );
        Ok(TextImage { canvas, layout })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::FixedTypesetter;

    fn manager() -> TextManager {
        TextManager::new(TextDefaults::default(), FixedTypesetter::new(10, 16))
    }

    #[test]
    fn plain_text_matches_natural_size() {
        let image = manager()
            .create_text_image(&CreateTextImageOptions::new("hello"))
            .unwrap();
        assert_eq!((image.canvas.width(), image.canvas.height()), (50, 16));
        assert_eq!(image.layout.instructions.len(), 1);
        assert_eq!(image.layout.instructions[0].text, "hello");
    }

    #[test]
    fn renders_glyphs_in_active_color() {
        let image = manager()
            .create_text_image(&CreateTextImageOptions::new(
                r#"a\{"color":{"push":true,"r":255,"a":255}}\b"#,
            ))
            .unwrap();
        assert_eq!(image.canvas.get(2, 15), Some(Rgba([255, 255, 255, 255])));
        assert_eq!(image.canvas.get(12, 15), Some(Rgba([255, 0, 0, 255])));
    }

    #[test]
    fn malformed_directive_fails_without_image() {
        let err = manager()
            .create_text_image(&CreateTextImageOptions::new("ok\\{bad\\"))
            .unwrap_err();
        assert!(matches!(err, TextError::MalformedDirective { .. }));
    }

    #[test]
    fn empty_text_yields_empty_canvas() {
        let image = manager()
            .create_text_image(&CreateTextImageOptions::new(""))
            .unwrap();
        assert_eq!((image.canvas.width(), image.canvas.height()), (0, 0));
        assert!(image.layout.instructions.is_empty());
    }

    #[test]
    fn draw_uses_requested_position() {
        let m = manager();
        let mut canvas = Canvas::new(40, 40);
        m.draw(
            &mut canvas,
            &TextDrawOptions::new("x", 20, 30).with_color(Rgba([0, 0, 255, 255])),
        );
        assert_eq!(canvas.get(20, 29), Some(Rgba([0, 0, 255, 255])));
        assert_eq!(canvas.get(19, 29), Some(Rgba([0, 0, 0, 0])));
    }
}
