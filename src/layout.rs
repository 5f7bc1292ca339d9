//! Line layout: turns segments into positioned draw instructions.

use std::collections::VecDeque;

use image::Rgba;

use crate::directive::Align;
use crate::font::{FontId, Typesetter};
use crate::segment::Segment;
use crate::style::StyleStacks;

/// One string to draw, with the style that was active for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawInstruction {
    pub text: String,
    pub font: FontId,
    /// Left edge, alignment offset included.
    pub x: i32,
    /// Baseline.
    pub y: i32,
    pub color: Rgba<u8>,
    pub align: Align,
}

/// Result of one layout pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Layout {
    pub instructions: Vec<DrawInstruction>,
    /// Cursor after the last segment.
    pub cursor: (i32, i32),
    /// Line breaks taken, explicit, forced and wrap breaks together.
    pub line_breaks: usize,
    /// Breaks injected because the alignment changed.
    pub forced_breaks: usize,
    /// Breaks injected because text did not fit the remaining width.
    pub wrap_breaks: usize,
}

impl Layout {
    pub fn lines(&self) -> usize {
        self.line_breaks + 1
    }
}

struct LayoutState {
    x: i32,
    y: i32,
    line_height: i32,
}

/// Lays `segments` out on a canvas `canvas_width` pixels wide.
///
/// With `wrap` set, text that overflows the remaining width is trimmed one
/// rune at a time from the end; the trimmed tail is carried to a new line.
pub fn lay_out(
    segments: Vec<Segment>,
    stacks: &mut StyleStacks,
    canvas_width: i32,
    wrap: bool,
    typesetter: &dyn Typesetter,
) -> Layout {
    let mut queue: VecDeque<Segment> = segments.into();
    let mut state = LayoutState {
        x: 0,
        y: 0,
        line_height: 0,
    };
    let mut layout = Layout::default();

    while let Some(segment) = queue.pop_front() {
        match segment {
            Segment::Directive(directive) => {
                let change = stacks.apply(&directive);
                if change.align_changed {
                    tracing::trace!(target: "text.layout", y = state.y, "alignment changed, forcing break");
                    layout.forced_breaks += 1;
                    queue.push_front(Segment::LineBreak);
                }
            }
            Segment::LineBreak => {
                state.y += state.line_height;
                state.x = 0;
                state.line_height = 0;
                layout.line_breaks += 1;
            }
            Segment::Text(text) => {
                let font = typesetter.resolve(stacks.font.top().name.as_deref());
                let remaining = canvas_width - state.x;

                let (line_text, carry_over) = if wrap {
                    fit_to_width(&text, remaining, state.x == 0, |s| {
                        typesetter.measure(font, s).width
                    })
                } else {
                    (text, String::new())
                };

                let bounds = typesetter.measure(font, &line_text);
                state.line_height = state.line_height.max(bounds.height);

                if !line_text.is_empty() {
                    let align = stacks.align.top().align();
                    let offset = match align {
                        Align::Left | Align::Unset => 0,
                        Align::Center => (remaining - bounds.width).div_euclid(2),
                        Align::Right => remaining - bounds.width,
                    };
                    let instruction = DrawInstruction {
                        text: line_text,
                        font,
                        x: state.x + offset,
                        y: state.y + state.line_height,
                        color: stacks.color.top().color(),
                        align,
                    };
                    tracing::trace!(
                        target: "text.layout",
                        text = %instruction.text,
                        x = instruction.x,
                        y = instruction.y,
                        "draw"
                    );
                    layout.instructions.push(instruction);
                    state.x += bounds.width;
                }

                if !carry_over.is_empty() {
                    layout.wrap_breaks += 1;
                    queue.push_front(Segment::Text(carry_over));
                    queue.push_front(Segment::LineBreak);
                }
            }
        }
    }

    layout.cursor = (state.x, state.y);
    layout
}

/// Splits `text` into the longest prefix whose width is at most `max_width`
/// and the remaining tail, trimming one `char` at a time from the end.
///
/// When `at_line_start` is set and not even one rune fits, the first rune is
/// kept anyway so that repeated wrapping always makes progress.
pub(crate) fn fit_to_width(
    text: &str,
    max_width: i32,
    at_line_start: bool,
    measure: impl Fn(&str) -> i32,
) -> (String, String) {
    let mut end = text.len();
    while end > 0 && measure(&text[..end]) > max_width {
        end = text[..end]
            .char_indices()
            .next_back()
            .map(|(i, _)| i)
            .unwrap_or(0);
    }
    if end == 0 && at_line_start {
        end = text.chars().next().map(char::len_utf8).unwrap_or(0);
    }
    (text[..end].to_string(), text[end..].to_string())
}
