//! Pointer and keyboard state for the windowed runner.
//!
//! [`Input`] folds raw winit window events into what the animation needs: an
//! optional pointer position in surface pixels and the keys pressed since the
//! last frame. The pointer becomes `None` when the cursor leaves the window,
//! which switches pointer forces off.

use glam::Vec2;
use std::collections::HashSet;
use winit::event::{ElementState, WindowEvent};
use winit::keyboard::{KeyCode as WinitKeyCode, PhysicalKey};

/// Keys the runner reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    A,
    E,
    L,
    S,
    U,
    V,
    Up,
    Down,
    Left,
    Right,
    Escape,
    Other(u32),
}

impl From<WinitKeyCode> for KeyCode {
    fn from(key: WinitKeyCode) -> Self {
        match key {
            WinitKeyCode::KeyA => KeyCode::A,
            WinitKeyCode::KeyE => KeyCode::E,
            WinitKeyCode::KeyL => KeyCode::L,
            WinitKeyCode::KeyS => KeyCode::S,
            WinitKeyCode::KeyU => KeyCode::U,
            WinitKeyCode::KeyV => KeyCode::V,
            WinitKeyCode::ArrowUp => KeyCode::Up,
            WinitKeyCode::ArrowDown => KeyCode::Down,
            WinitKeyCode::ArrowLeft => KeyCode::Left,
            WinitKeyCode::ArrowRight => KeyCode::Right,
            WinitKeyCode::Escape => KeyCode::Escape,
            _ => KeyCode::Other(key as u32),
        }
    }
}

/// Keyboard and pointer state.
#[derive(Debug, Default)]
pub struct Input {
    keys_held: HashSet<KeyCode>,
    keys_pressed: HashSet<KeyCode>,
    pointer: Option<Vec2>,
}

impl Input {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `key` went down since the last [`Input::begin_frame`].
    pub fn key_pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed.contains(&key)
    }

    pub fn key_held(&self, key: KeyCode) -> bool {
        self.keys_held.contains(&key)
    }

    /// Pointer position in surface pixels, `None` while outside the window.
    pub fn pointer(&self) -> Option<Vec2> {
        self.pointer
    }

    /// Clear per-frame state. Call after the frame has consumed the input.
    pub(crate) fn begin_frame(&mut self) {
        self.keys_pressed.clear();
    }

    pub(crate) fn press(&mut self, key: KeyCode) {
        // Auto-repeat does not count as a new press.
        if self.keys_held.insert(key) {
            self.keys_pressed.insert(key);
        }
    }

    pub(crate) fn release(&mut self, key: KeyCode) {
        self.keys_held.remove(&key);
    }

    pub(crate) fn set_pointer(&mut self, pointer: Option<Vec2>) {
        self.pointer = pointer;
    }

    /// Process a winit window event.
    pub(crate) fn handle_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(code) = event.physical_key {
                    match event.state {
                        ElementState::Pressed => self.press(KeyCode::from(code)),
                        ElementState::Released => self.release(KeyCode::from(code)),
                    }
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.set_pointer(Some(Vec2::new(position.x as f32, position.y as f32)));
            }
            WindowEvent::CursorLeft { .. } => self.set_pointer(None),
            WindowEvent::Focused(false) => {
                self.keys_held.clear();
            }
            _ => {}
        }
    }
}
