#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

impl MouseButton {
    fn bit_index(self) -> u8 {
        match self {
            MouseButton::Left => 0,
            MouseButton::Right => 1,
            MouseButton::Middle => 2,
        }
    }
}

/// Pointer state as seen by one scene update.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PointerInput {
    pub x: i32,
    pub y: i32,
    pub left: bool,
    pub right: bool,
}

/// Accumulates pointer events between frames.
#[derive(Debug, Clone, Default)]
pub struct InputManager {
    mouse_down: u8,
    mouse_pressed: u8,
    mouse_released: u8,
    cursor_position: Option<(i32, i32)>,
}

impl InputManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cursor_position(&self) -> Option<(i32, i32)> {
        self.cursor_position
    }

    pub fn mouse_down(&self, button: MouseButton) -> bool {
        (self.mouse_down & (1u8 << button.bit_index())) != 0
    }

    pub fn mouse_pressed(&self, button: MouseButton) -> bool {
        (self.mouse_pressed & (1u8 << button.bit_index())) != 0
    }

    pub fn mouse_released(&self, button: MouseButton) -> bool {
        (self.mouse_released & (1u8 << button.bit_index())) != 0
    }

    pub fn handle_cursor_moved(&mut self, x: i32, y: i32) {
        self.cursor_position = Some((x, y));
    }

    pub fn handle_mouse_input(&mut self, button: MouseButton, pressed: bool) {
        let mask = 1u8 << button.bit_index();
        if pressed {
            if (self.mouse_down & mask) == 0 {
                self.mouse_down |= mask;
                self.mouse_pressed |= mask;
            }
        } else {
            self.mouse_down &= !mask;
            self.mouse_released |= mask;
        }
    }

    /// Snapshot for the current frame. An unknown cursor reads as the origin.
    pub fn read(&self) -> PointerInput {
        let (x, y) = self.cursor_position.unwrap_or((0, 0));
        PointerInput {
            x,
            y,
            left: self.mouse_down(MouseButton::Left),
            right: self.mouse_down(MouseButton::Right),
        }
    }

    /// Clears per-frame edge state; held buttons stay down.
    pub fn end_frame(&mut self) {
        self.mouse_pressed = 0;
        self.mouse_released = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_and_release_edges() {
        let mut input = InputManager::new();
        input.handle_mouse_input(MouseButton::Left, true);
        assert!(input.mouse_down(MouseButton::Left));
        assert!(input.mouse_pressed(MouseButton::Left));
        input.end_frame();
        assert!(input.mouse_down(MouseButton::Left));
        assert!(!input.mouse_pressed(MouseButton::Left));
        input.handle_mouse_input(MouseButton::Left, false);
        assert!(!input.mouse_down(MouseButton::Left));
        assert!(input.mouse_released(MouseButton::Left));
    }

    #[test]
    fn read_snapshots_pointer() {
        let mut input = InputManager::new();
        assert_eq!(input.read(), PointerInput::default());
        input.handle_cursor_moved(12, 34);
        input.handle_mouse_input(MouseButton::Right, true);
        assert_eq!(
            input.read(),
            PointerInput {
                x: 12,
                y: 34,
                left: false,
                right: true
            }
        );
    }
}
