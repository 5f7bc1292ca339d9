//! SpottedText - rich-text images from strings with inline style directives.
//!
//! Directives are JSON objects between `\` delimiters. Each one pushes, pops
//! or resets the color, alignment and font stacks; a changed alignment
//! starts a new line.
//!
//! # Example
//! ```
//! use spottedtext::{CreateTextImageOptions, FixedTypesetter, TextDefaults, TextManager};
//!
//! let manager = TextManager::new(TextDefaults::default(), FixedTypesetter::new(10, 16));
//! let image = manager
//!     .create_text_image(&CreateTextImageOptions::new(
//!         r#"AB\{"color":{"push":true,"r":255,"a":255}}\CD"#,
//!     ))
//!     .unwrap();
//!
//! assert_eq!(image.layout.instructions.len(), 2);
//! assert_eq!(image.canvas.width(), 40);
//! ```
//!
//! Outline fonts go through [`FontRegistry`], which is built once and
//! shared read-only by every layout call:
//! ```no_run
//! # use spottedtext::{FontRegistry, TextDefaults, TextManager, load_font_from_file};
//! let data = load_font_from_file("assets/SourceHanSerif-Regular.otf").unwrap();
//! let registry = FontRegistry::new(data, 48.0).unwrap();
//! let manager = TextManager::new(TextDefaults::default(), registry);
//! ```

mod canvas;
pub mod config;
mod debug_scene;
pub mod directive;
mod error;
mod font;
mod game;
mod input;
pub mod layout;
mod scene;
pub mod segment;
pub mod sizing;
mod sprite;
pub mod style;
mod text;

pub use canvas::{Bounds, Canvas};
pub use config::Config;
pub use debug_scene::DebugScene;
pub use directive::{Align, AlignDirective, ColorDirective, FontDirective, StyleDirective};
pub use error::TextError;
pub use font::{FixedTypesetter, FontId, FontRegistry, TextBounds, Typesetter, load_font_from_file};
pub use game::Game;
pub use input::{InputManager, MouseButton, PointerInput};
pub use layout::{DrawInstruction, Layout};
pub use scene::{DrawContext, GameState, Scene, SceneManager, UpdateContext};
pub use segment::Segment;
pub use sizing::{CropOptions, WrapOptions};
pub use sprite::Sprite;
pub use style::{StyleStack, StyleStacks, TextDefaults};
pub use text::{CreateTextImageOptions, TextDrawOptions, TextImage, TextManager};
