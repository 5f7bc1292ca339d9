use image::Rgba;

use crate::canvas::Canvas;
use crate::config::Config;
use crate::debug_scene::DebugScene;
use crate::input::InputManager;
use crate::scene::{DrawContext, GameState, SceneManager, UpdateContext};
use crate::text::{CreateTextImageOptions, TextManager};

/// Fixed-size game: one input manager, one scene manager, shared state.
pub struct Game {
    scenes: SceneManager,
    input: InputManager,
    state: GameState,
    text: TextManager,
    screen: (i32, i32),
}

impl Game {
    pub fn new(config: &Config, text: TextManager) -> Self {
        let mut demo = CreateTextImageOptions::new(config.scene.demo_text.clone());
        if let Some(width) = config.scene.wrap_width {
            demo = demo.with_wrap(width);
        }
        Self {
            scenes: SceneManager::new(DebugScene::new(demo)),
            input: InputManager::new(),
            state: GameState::default(),
            text,
            screen: (config.screen.width, config.screen.height),
        }
    }

    /// Logical screen size regardless of the outside size.
    pub fn layout(&self, _outside_width: i32, _outside_height: i32) -> (i32, i32) {
        self.screen
    }

    pub fn input_mut(&mut self) -> &mut InputManager {
        &mut self.input
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn scenes_mut(&mut self) -> &mut SceneManager {
        &mut self.scenes
    }

    pub fn update(&mut self) -> anyhow::Result<()> {
        let input = self.input.read();
        let mut context = UpdateContext {
            input,
            state: &mut self.state,
            screen: self.screen,
        };
        self.scenes.update(&mut context)?;
        self.input.end_frame();
        Ok(())
    }

    /// Renders the current scene into a new screen canvas.
    pub fn draw(&mut self) -> anyhow::Result<Canvas> {
        let (w, h) = self.screen;
        let mut screen = Canvas::new(w.max(0) as u32, h.max(0) as u32);
        screen.fill(Rgba([0, 0, 0, 255]));
        let mut context = DrawContext {
            screen: &mut screen,
            text: &self.text,
        };
        self.scenes.draw(&mut context)?;
        Ok(screen)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::FixedTypesetter;
    use crate::input::MouseButton;
    use crate::style::TextDefaults;

    fn game() -> Game {
        let text = TextManager::new(TextDefaults::default(), FixedTypesetter::new(8, 12));
        Game::new(&Config::default(), text)
    }

    #[test]
    fn frames_accumulate_score() {
        let mut game = game();
        game.input_mut().handle_cursor_moved(256, 0);
        game.input_mut().handle_mouse_input(MouseButton::Left, true);
        game.update().unwrap();
        game.update().unwrap();
        assert_eq!(game.state().score, 20);

        let screen = game.draw().unwrap();
        assert_eq!((screen.width(), screen.height()), (256, 240));
        assert_eq!(screen.get(200, 230), Some(Rgba([255, 0, 255, 255])));
    }

    #[test]
    fn layout_is_fixed() {
        assert_eq!(game().layout(640, 480), (256, 240));
    }
}
