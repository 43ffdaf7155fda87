use std::cell::RefCell;
use std::rc::{Rc, Weak};

use glam::Vec2;

use super::event::{HostEvent, KeyPress};

/// Receiver of input events and per-frame updates from a window host.
///
/// Only `on_update_window` is required; input callbacks default to no-ops.
pub trait WindowClient {
    fn on_key_down(&mut self, _key: &KeyPress) {}

    fn on_key_up(&mut self, _key: &KeyPress) {}

    /// A mouse button went down at `position` (window pixels)
    fn on_drag_begin(&mut self, _position: Vec2) {}

    fn on_drag_end(&mut self, _position: Vec2) {}

    fn on_drag_motion(&mut self, _position: Vec2) {}

    /// Called once per frame after the framebuffer is cleared and before it
    /// is presented
    fn on_update_window(&mut self, delta_seconds: f32);
}

/// Non-owning reference to a client. The host never keeps a client alive.
pub type ClientHandle = Weak<RefCell<dyn WindowClient>>;

/// Make a [`ClientHandle`] for a shared client
pub fn client_handle<C: WindowClient + 'static>(client: &Rc<RefCell<C>>) -> ClientHandle {
    let weak: Weak<RefCell<C>> = Rc::downgrade(client);
    weak
}

/// Route an input event to the matching client callback.
/// Events without a client counterpart are ignored.
pub fn dispatch_event(event: &HostEvent, client: &mut dyn WindowClient) {
    match event {
        HostEvent::KeyDown(key) => client.on_key_down(key),
        HostEvent::KeyUp(key) => client.on_key_up(key),
        HostEvent::MouseButtonDown { position, .. } => client.on_drag_begin(*position),
        HostEvent::MouseButtonUp { position, .. } => client.on_drag_end(*position),
        HostEvent::MouseMotion { position } => client.on_drag_motion(*position),
        HostEvent::Quit | HostEvent::Window(_) => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::event::MouseButton;
    use winit::keyboard::{Key, KeyCode, NamedKey, PhysicalKey};

    #[derive(Default)]
    struct Recorder {
        calls: Vec<String>,
    }

    impl WindowClient for Recorder {
        fn on_key_down(&mut self, key: &KeyPress) {
            self.calls.push(format!("down {:?}", key.physical_key));
        }

        fn on_key_up(&mut self, key: &KeyPress) {
            self.calls.push(format!("up {:?}", key.physical_key));
        }

        fn on_drag_begin(&mut self, position: Vec2) {
            self.calls.push(format!("begin {} {}", position.x, position.y));
        }

        fn on_drag_end(&mut self, position: Vec2) {
            self.calls.push(format!("end {} {}", position.x, position.y));
        }

        fn on_drag_motion(&mut self, position: Vec2) {
            self.calls.push(format!("motion {} {}", position.x, position.y));
        }

        fn on_update_window(&mut self, _delta_seconds: f32) {
            self.calls.push("update".to_string());
        }
    }

    struct UpdateOnly {
        updates: usize,
    }

    impl WindowClient for UpdateOnly {
        fn on_update_window(&mut self, _delta_seconds: f32) {
            self.updates += 1;
        }
    }

    fn escape() -> KeyPress {
        KeyPress::new(PhysicalKey::Code(KeyCode::Escape), Key::Named(NamedKey::Escape))
    }

    #[test]
    fn dispatches_by_event_type() {
        let mut client = Recorder::default();
        let events = [
            HostEvent::KeyDown(escape()),
            HostEvent::KeyUp(escape()),
            HostEvent::MouseButtonDown {
                button: MouseButton::Left,
                position: Vec2::new(1.0, 2.0),
            },
            HostEvent::MouseMotion {
                position: Vec2::new(3.0, 4.0),
            },
            HostEvent::MouseButtonUp {
                button: MouseButton::Right,
                position: Vec2::new(5.0, 6.0),
            },
        ];

        for event in &events {
            dispatch_event(event, &mut client);
        }

        assert_eq!(
            client.calls,
            vec![
                "down Code(Escape)",
                "up Code(Escape)",
                "begin 1 2",
                "motion 3 4",
                "end 5 6",
            ]
        );
    }

    #[test]
    fn host_only_events_are_not_dispatched() {
        let mut client = Recorder::default();
        dispatch_event(&HostEvent::Quit, &mut client);
        dispatch_event(&HostEvent::resized(10, 10), &mut client);
        assert!(client.calls.is_empty());
    }

    #[test]
    fn default_callbacks_are_no_ops() {
        let mut client = UpdateOnly { updates: 0 };
        dispatch_event(&HostEvent::KeyDown(escape()), &mut client);
        dispatch_event(
            &HostEvent::MouseMotion {
                position: Vec2::ZERO,
            },
            &mut client,
        );
        client.on_update_window(0.016);
        assert_eq!(client.updates, 1);
    }

    #[test]
    fn handle_does_not_keep_client_alive() {
        let client = Rc::new(RefCell::new(UpdateOnly { updates: 0 }));
        let handle = client_handle(&client);
        assert!(handle.upgrade().is_some());

        drop(client);
        assert!(handle.upgrade().is_none());
    }
}
