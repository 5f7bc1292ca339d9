//! Call-scoped style stacks driven by directives.

use crate::directive::{AlignDirective, ColorDirective, FontDirective, StyleDirective};

/// An ordered stack whose bottom element is the immutable base.
///
/// Never empty: `pop` stops at the base and `reset` truncates to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleStack<T> {
    items: Vec<T>,
}

impl<T> StyleStack<T> {
    pub fn new(base: T) -> Self {
        Self { items: vec![base] }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn base(&self) -> &T {
        &self.items[0]
    }

    pub fn top(&self) -> &T {
        // items always holds the base
        &self.items[self.items.len() - 1]
    }

    pub fn push(&mut self, value: T) {
        self.items.push(value);
    }

    /// Removes the top unless only the base remains. Returns whether anything was removed.
    pub fn pop(&mut self) -> bool {
        if self.items.len() > 1 {
            self.items.pop();
            true
        } else {
            false
        }
    }

    pub fn reset(&mut self) {
        self.items.truncate(1);
    }

    /// One stack update: reset beats push, push beats pop.
    fn apply(&mut self, reset: bool, push: Option<&T>, pop: bool)
    where
        T: Clone,
    {
        if reset {
            self.reset();
        } else if let Some(value) = push {
            self.push(value.clone());
        } else if pop {
            self.pop();
        }
    }
}

/// Default style the stacks are seeded with.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
#[serde(default)]
pub struct TextDefaults {
    pub color: ColorDirective,
    pub align: AlignDirective,
    pub font: FontDirective,
}

impl Default for TextDefaults {
    fn default() -> Self {
        Self {
            color: ColorDirective::rgba(255, 255, 255, 255),
            align: AlignDirective::left(),
            font: FontDirective::named("default"),
        }
    }
}

/// Outcome of applying one directive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StyleChange {
    /// The active alignment record differs from the one active before the directive.
    pub align_changed: bool,
}

/// The font, color and alignment stacks of one layout call.
#[derive(Debug, Clone)]
pub struct StyleStacks {
    pub font: StyleStack<FontDirective>,
    pub color: StyleStack<ColorDirective>,
    pub align: StyleStack<AlignDirective>,
}

impl StyleStacks {
    pub fn new(defaults: &TextDefaults) -> Self {
        Self {
            font: StyleStack::new(defaults.font.clone()),
            color: StyleStack::new(defaults.color.clone()),
            align: StyleStack::new(defaults.align.clone()),
        }
    }

    /// Applies `directive` to the font, color and align stacks, in that order.
    pub fn apply(&mut self, directive: &StyleDirective) -> StyleChange {
        let d = directive;

        self.font.apply(
            d.reset || d.font.reset,
            d.font.push.then_some(&d.font),
            d.font.pop || d.pop,
        );
        self.color.apply(
            d.reset || d.color.reset,
            d.color.push.then_some(&d.color),
            d.color.pop || d.pop,
        );

        let previous = self.align.top().clone();
        self.align.apply(
            d.reset || d.align.reset,
            d.align.push.then_some(&d.align),
            d.align.pop || d.pop,
        );

        StyleChange {
            align_changed: *self.align.top() != previous,
        }
    }
}
