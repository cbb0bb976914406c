//! Input handling for camera control.
//!
//! Keyboard events are folded into a [`KeyboardState`]. Once per frame the
//! [`InputController`] turns the held keys into at most one [`CameraCommand`].
//! Keys are checked in a fixed priority order and the first held key wins, so
//! holding Left and Up together only rotates horizontally. One-shot keys
//! (reset, wireframe, exit) are reported separately on press.

use std::collections::HashSet;

use winit::event::ElementState;
use winit::keyboard::KeyCode;

use crate::renderer::camera::Camera;

/// Sensitivity constants for input handling.
#[derive(Debug, Clone, Copy)]
pub struct InputConfig {
    /// Rotation per frame (radians) and movement per frame (units)
    pub camera_speed: f32,
    /// Distance change per frame while a zoom key is held
    pub zoom_step: f32,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            camera_speed: 0.05,
            zoom_step: 1.0,
        }
    }
}

/// Tracks which keys are currently held down.
#[derive(Debug, Default)]
pub struct KeyboardState {
    held: HashSet<KeyCode>,
}

impl KeyboardState {
    /// Record a press or release.
    pub fn handle_key(&mut self, key: KeyCode, state: ElementState) {
        match state {
            ElementState::Pressed => {
                self.held.insert(key);
            }
            ElementState::Released => {
                self.held.remove(&key);
            }
        }
    }

    pub fn is_pressed(&self, key: KeyCode) -> bool {
        self.held.contains(&key)
    }

    /// Forget all held keys, e.g. when the window loses focus and release
    /// events will never arrive.
    pub fn clear(&mut self) {
        self.held.clear();
    }
}

/// A single continuous camera adjustment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CameraCommand {
    RotateY(f32),
    RotateX(f32),
    ZoomIn(f32),
    ZoomOut(f32),
    MoveForward(f32),
    MoveBackward(f32),
}

impl CameraCommand {
    pub fn apply(self, camera: &mut Camera) {
        match self {
            CameraCommand::RotateY(delta) => camera.rotate_around_y_axis(delta),
            CameraCommand::RotateX(delta) => camera.rotate_around_x_axis(delta),
            CameraCommand::ZoomIn(amount) => camera.zoom_in(amount),
            CameraCommand::ZoomOut(amount) => camera.zoom_out(amount),
            CameraCommand::MoveForward(amount) => camera.move_forward(amount),
            CameraCommand::MoveBackward(amount) => camera.move_backward(amount),
        }
    }
}

/// Discrete actions triggered once per key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    ResetCamera,
    ToggleWireframe,
    Exit,
}

/// Input controller that maps keys to camera commands.
#[derive(Debug, Default)]
pub struct InputController {
    pub config: InputConfig,
    pub keyboard: KeyboardState,
}

impl InputController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pick the command for this frame from the held keys.
    ///
    /// Priority: Left, Right, Up, Down, Q, E, W, S.
    pub fn held_command(&self) -> Option<CameraCommand> {
        let speed = self.config.camera_speed;
        let zoom = self.config.zoom_step;
        let bindings = [
            (KeyCode::ArrowLeft, CameraCommand::RotateY(speed)),
            (KeyCode::ArrowRight, CameraCommand::RotateY(-speed)),
            (KeyCode::ArrowUp, CameraCommand::RotateX(speed)),
            (KeyCode::ArrowDown, CameraCommand::RotateX(-speed)),
            (KeyCode::KeyQ, CameraCommand::ZoomIn(zoom)),
            (KeyCode::KeyE, CameraCommand::ZoomOut(zoom)),
            (KeyCode::KeyW, CameraCommand::MoveForward(speed)),
            (KeyCode::KeyS, CameraCommand::MoveBackward(speed)),
        ];

        bindings
            .into_iter()
            .find(|(key, _)| self.keyboard.is_pressed(*key))
            .map(|(_, command)| command)
    }

    /// Apply this frame's held-key command to the camera. Returns the command
    /// that ran, if any.
    pub fn update_camera(&self, camera: &mut Camera) -> Option<CameraCommand> {
        let command = self.held_command()?;
        command.apply(camera);
        Some(command)
    }

    /// Handle a keyboard event. Returns a one-shot action for fresh presses of
    /// Home, backtick or Escape; auto-repeat events are ignored.
    pub fn handle_keyboard(
        &mut self,
        key: KeyCode,
        state: ElementState,
        repeat: bool,
    ) -> Option<KeyAction> {
        self.keyboard.handle_key(key, state);

        if state != ElementState::Pressed || repeat {
            return None;
        }

        match key {
            KeyCode::Home => Some(KeyAction::ResetCamera),
            KeyCode::Backquote => Some(KeyAction::ToggleWireframe),
            KeyCode::Escape => Some(KeyAction::Exit),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(controller: &mut InputController, key: KeyCode) -> Option<KeyAction> {
        controller.handle_keyboard(key, ElementState::Pressed, false)
    }

    #[test]
    fn test_keyboard_state() {
        let mut state = KeyboardState::default();
        assert!(!state.is_pressed(KeyCode::KeyW));

        state.handle_key(KeyCode::KeyW, ElementState::Pressed);
        assert!(state.is_pressed(KeyCode::KeyW));

        state.handle_key(KeyCode::KeyW, ElementState::Released);
        assert!(!state.is_pressed(KeyCode::KeyW));
    }

    #[test]
    fn test_no_keys_no_command() {
        let controller = InputController::new();
        assert_eq!(controller.held_command(), None);
    }

    #[test]
    fn test_first_match_wins() {
        let mut controller = InputController::new();
        press(&mut controller, KeyCode::KeyS);
        press(&mut controller, KeyCode::ArrowUp);
        press(&mut controller, KeyCode::ArrowLeft);

        assert_eq!(controller.held_command(), Some(CameraCommand::RotateY(0.05)));

        controller.handle_keyboard(KeyCode::ArrowLeft, ElementState::Released, false);
        assert_eq!(controller.held_command(), Some(CameraCommand::RotateX(0.05)));

        controller.handle_keyboard(KeyCode::ArrowUp, ElementState::Released, false);
        assert_eq!(
            controller.held_command(),
            Some(CameraCommand::MoveBackward(0.05))
        );
    }

    #[test]
    fn test_one_command_per_frame() {
        let mut controller = InputController::new();
        let mut camera = Camera::new();
        press(&mut controller, KeyCode::ArrowLeft);
        press(&mut controller, KeyCode::KeyQ);

        controller.update_camera(&mut camera);

        assert!((camera.yaw - 0.05).abs() < 1e-6);
        assert_eq!(camera.distance, 5.0);
    }

    #[test]
    fn test_holding_zoom_in_clamps() {
        let mut controller = InputController::new();
        let mut camera = Camera::new();
        assert_eq!(camera.distance, 5.0);

        press(&mut controller, KeyCode::KeyQ);
        for _ in 0..10 {
            controller.update_camera(&mut camera);
        }

        assert_eq!(camera.distance, 1.0);
    }

    #[test]
    fn test_one_shot_actions() {
        let mut controller = InputController::new();
        assert_eq!(
            press(&mut controller, KeyCode::Home),
            Some(KeyAction::ResetCamera)
        );
        assert_eq!(
            press(&mut controller, KeyCode::Backquote),
            Some(KeyAction::ToggleWireframe)
        );
        assert_eq!(press(&mut controller, KeyCode::Escape), Some(KeyAction::Exit));
        assert_eq!(press(&mut controller, KeyCode::KeyW), None);
    }

    #[test]
    fn test_repeats_and_releases_ignored() {
        let mut controller = InputController::new();
        assert_eq!(
            controller.handle_keyboard(KeyCode::Backquote, ElementState::Pressed, true),
            None
        );
        assert_eq!(
            controller.handle_keyboard(KeyCode::Home, ElementState::Released, false),
            None
        );
    }

    #[test]
    fn test_clear_drops_held_keys() {
        let mut controller = InputController::new();
        press(&mut controller, KeyCode::KeyE);
        controller.keyboard.clear();
        assert_eq!(controller.held_command(), None);
    }
}
