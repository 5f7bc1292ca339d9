//! Pointer-driven debug scene.

use anyhow::Context as _;
use image::Rgba;

use crate::input::PointerInput;
use crate::scene::{DrawContext, Scene, UpdateContext};
use crate::text::{CreateTextImageOptions, TextDrawOptions};

/// Paints the background from the pointer position, shows the pointer
/// state as text and renders a rich-text sample on top.
#[derive(Debug, Clone, Default)]
pub struct DebugScene {
    message: String,
    background: [u8; 3],
    pointer: (i32, i32),
    demo: CreateTextImageOptions,
}

fn channel(value: i32, extent: i32) -> u8 {
    if extent <= 0 {
        return 0;
    }
    let ratio = value.clamp(0, extent) as f64 / extent as f64;
    (u8::MAX as f64 * ratio) as u8
}

impl DebugScene {
    pub fn new(demo: CreateTextImageOptions) -> Self {
        Self {
            demo,
            ..Self::default()
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn background(&self) -> Rgba<u8> {
        let [r, g, b] = self.background;
        Rgba([r, g, b, 255])
    }

    fn apply_input(&mut self, input: PointerInput, score: u64, screen: (i32, i32)) {
        self.message = format!(
            "x={}\ny={}\nleft={}\nright={}\nscore={}",
            input.x, input.y, input.left, input.right, score
        );
        let b = if input.left {
            u8::MAX
        } else if input.right {
            u8::MAX / 2
        } else {
            0
        };
        self.background = [channel(input.x, screen.0), channel(input.y, screen.1), b];
        self.pointer = (input.x, input.y);
    }
}

impl Scene for DebugScene {
    fn update(&mut self, context: &mut UpdateContext<'_>) -> anyhow::Result<()> {
        let input = context.input;
        if input.left {
            context.state.score += 10;
        } else if input.right {
            context.state.score += 1;
        }
        self.apply_input(input, context.state.score, context.screen);
        Ok(())
    }

    fn draw(&mut self, context: &mut DrawContext<'_>) -> anyhow::Result<()> {
        context.screen.fill(self.background());

        let (x, y) = self.pointer;
        context
            .text
            .draw(context.screen, &TextDrawOptions::new("暇", x, y));

        let image = context
            .text
            .create_text_image(&self.demo)
            .context("failed to render demo text")?;
        context.screen.draw_canvas(&image.canvas, 0, 0);

        let line_height = context
            .text
            .typesetter()
            .line_height(context.text.typesetter().resolve(None));
        context
            .text
            .draw(context.screen, &TextDrawOptions::new(self.message.as_str(), 0, line_height));
        Ok(())
    }
}
