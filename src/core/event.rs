use glam::{IVec2, Vec2};
use winit::event::MouseButton;
use winit::keyboard::{Key, PhysicalKey};

/// Keyboard payload delivered to clients on key down/up
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPress {
    /// Layout-independent key location
    pub physical_key: PhysicalKey,
    /// Key as interpreted by the active keyboard layout
    pub logical_key: Key,
    /// True for auto-repeat presses while the key is held
    pub repeat: bool,
}

impl KeyPress {
    pub fn new(physical_key: PhysicalKey, logical_key: Key) -> Self {
        Self {
            physical_key,
            logical_key,
            repeat: false,
        }
    }
}

/// Window-management notification. All of these are consumed by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowChange {
    /// New client-area size in physical pixels
    Resized(IVec2),
    Moved(IVec2),
    Focused(bool),
    Other,
}

/// Platform-neutral event drained from a window's queue each frame
#[derive(Debug, Clone, PartialEq)]
pub enum HostEvent {
    Quit,
    Window(WindowChange),
    KeyDown(KeyPress),
    KeyUp(KeyPress),
    MouseButtonDown { button: MouseButton, position: Vec2 },
    MouseButtonUp { button: MouseButton, position: Vec2 },
    MouseMotion { position: Vec2 },
}

impl HostEvent {
    pub fn resized(width: i32, height: i32) -> Self {
        HostEvent::Window(WindowChange::Resized(IVec2::new(width, height)))
    }
}
