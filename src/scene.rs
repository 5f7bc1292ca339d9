//! Scene trait and the manager that drives the active scene.

use crate::canvas::Canvas;
use crate::input::PointerInput;
use crate::text::TextManager;

/// State that survives scene switches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GameState {
    pub score: u64,
}

pub struct UpdateContext<'a> {
    pub input: PointerInput,
    pub state: &'a mut GameState,
    /// Logical screen size.
    pub screen: (i32, i32),
}

pub struct DrawContext<'a> {
    pub screen: &'a mut Canvas,
    pub text: &'a TextManager,
}

/// One screen of the application.
pub trait Scene {
    fn update(&mut self, context: &mut UpdateContext<'_>) -> anyhow::Result<()>;

    fn draw(&mut self, context: &mut DrawContext<'_>) -> anyhow::Result<()>;

    /// Called once before the scene is replaced.
    fn remove(&mut self) {}
}

/// Owns the current scene. A switch requested during a frame takes effect
/// after that frame's update.
pub struct SceneManager {
    current: Box<dyn Scene>,
    pending: Option<Box<dyn Scene>>,
}

impl SceneManager {
    pub fn new(initial: impl Scene + 'static) -> Self {
        Self {
            current: Box::new(initial),
            pending: None,
        }
    }

    pub fn switch_to(&mut self, scene: impl Scene + 'static) {
        self.pending = Some(Box::new(scene));
    }

    pub fn update(&mut self, context: &mut UpdateContext<'_>) -> anyhow::Result<()> {
        self.current.update(context)?;
        if let Some(next) = self.pending.take() {
            tracing::info!(target: "scene", "switching scene");
            self.current.remove();
            self.current = next;
        }
        Ok(())
    }

    pub fn draw(&mut self, context: &mut DrawContext<'_>) -> anyhow::Result<()> {
        self.current.draw(context)
    }
}
