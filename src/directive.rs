//! Inline style directives.
//!
//! A directive is a JSON object embedded between two `\` delimiters in the
//! input text, e.g. `\{"color":{"push":true,"r":255,"a":255}}\`. Every field
//! is optional; unknown fields are ignored.

use image::Rgba;
use serde::Deserialize;

use crate::error::TextError;

/// One decoded directive payload.
///
/// `reset` clears all three style stacks to their base element regardless of
/// the sub-records. `pop` pops all three stacks unless a sub-record resets or
/// pushes on its own.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StyleDirective {
    pub reset: bool,
    pub pop: bool,
    pub color: ColorDirective,
    pub align: AlignDirective,
    pub font: FontDirective,
}

/// Color sub-record.
///
/// Channels that are not given decode to zero. In particular a push that
/// omits `a` produces a fully transparent color: `{"push":true,"r":255}`
/// draws nothing visible. Callers almost always want `"a":255`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ColorDirective {
    pub reset: bool,
    pub push: bool,
    pub pop: bool,
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
    pub name: Option<String>,
}

impl ColorDirective {
    pub fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r,
            g,
            b,
            a,
            ..Self::default()
        }
    }

    /// Resolves the concrete color.
    ///
    /// Only `"black"` is a recognized name. Any other name, recognized or not,
    /// falls through to the literal channels.
    pub fn color(&self) -> Rgba<u8> {
        match self.name.as_deref() {
            Some("black") => Rgba([0, 0, 0, 255]),
            _ => Rgba([self.r, self.g, self.b, self.a]),
        }
    }
}

/// Alignment sub-record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AlignDirective {
    pub reset: bool,
    pub push: bool,
    pub pop: bool,
    pub left: bool,
    pub center: bool,
    pub right: bool,
}

/// Horizontal placement resolved from an [`AlignDirective`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
    /// No flag set; drawn like `Left`.
    Unset,
}

impl AlignDirective {
    pub fn left() -> Self {
        Self {
            left: true,
            ..Self::default()
        }
    }

    pub fn align(&self) -> Align {
        if self.left {
            Align::Left
        } else if self.center {
            Align::Center
        } else if self.right {
            Align::Right
        } else {
            Align::Unset
        }
    }
}

/// Font sub-record; `name` is looked up in the font registry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FontDirective {
    pub reset: bool,
    pub push: bool,
    pub pop: bool,
    pub name: Option<String>,
}

impl FontDirective {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }
}

/// Decodes one directive payload (the text between a pair of delimiters).
pub fn decode(payload: &str) -> Result<StyleDirective, TextError> {
    serde_json::from_str(payload).map_err(|source| {
        tracing::debug!(target: "text.directive", payload, %source, "malformed directive");
        TextError::MalformedDirective {
            payload: payload.to_string(),
            source,
        }
    })
}
