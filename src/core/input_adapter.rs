use glam::{IVec2, Vec2};
use winit::event::{ElementState, KeyEvent, WindowEvent};

use super::event::{HostEvent, KeyPress, WindowChange};

/// Adapter that turns Winit window events into [`HostEvent`]s
///
/// Winit reports mouse buttons without coordinates, so the last cursor
/// position is tracked here and attached to button events.
#[derive(Debug, Clone, Default)]
pub struct EventTranslator {
    /// Last known cursor position (relative to window)
    cursor_position: Option<Vec2>,
}

impl EventTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Translate one window event. Returns `None` for events the host has
    /// no use for.
    pub fn translate(&mut self, event: &WindowEvent) -> Option<HostEvent> {
        match event {
            WindowEvent::CloseRequested | WindowEvent::Destroyed => Some(HostEvent::Quit),
            WindowEvent::Resized(size) => Some(HostEvent::Window(WindowChange::Resized(
                IVec2::new(size.width as i32, size.height as i32),
            ))),
            WindowEvent::Moved(position) => Some(HostEvent::Window(WindowChange::Moved(
                IVec2::new(position.x, position.y),
            ))),
            WindowEvent::Focused(focused) => {
                Some(HostEvent::Window(WindowChange::Focused(*focused)))
            }
            WindowEvent::Occluded(_)
            | WindowEvent::ThemeChanged(_)
            | WindowEvent::ScaleFactorChanged { .. } => {
                Some(HostEvent::Window(WindowChange::Other))
            }
            WindowEvent::KeyboardInput { event, .. } => Some(Self::key_event(event)),
            WindowEvent::MouseInput { state, button, .. } => {
                let position = self.cursor_position();
                Some(match state {
                    ElementState::Pressed => HostEvent::MouseButtonDown {
                        button: *button,
                        position,
                    },
                    ElementState::Released => HostEvent::MouseButtonUp {
                        button: *button,
                        position,
                    },
                })
            }
            WindowEvent::CursorMoved { position, .. } => {
                let position = Vec2::new(position.x as f32, position.y as f32);
                self.cursor_position = Some(position);
                Some(HostEvent::MouseMotion { position })
            }
            _ => None,
        }
    }

    /// Last cursor position, or the window origin if the cursor has not
    /// been over the window yet
    pub fn cursor_position(&self) -> Vec2 {
        self.cursor_position.unwrap_or(Vec2::ZERO)
    }

    fn key_event(event: &KeyEvent) -> HostEvent {
        let key = KeyPress {
            physical_key: event.physical_key,
            logical_key: event.logical_key.clone(),
            repeat: event.repeat,
        };
        match event.state {
            ElementState::Pressed => HostEvent::KeyDown(key),
            ElementState::Released => HostEvent::KeyUp(key),
        }
    }
}
