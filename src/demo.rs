use std::rc::Rc;

use glam::{IVec2, Vec2};
use glow::HasContext;
use winit::keyboard::{KeyCode, PhysicalKey};

use crate::core::{KeyPress, WindowClient};
use crate::math::hsv_to_rgb;

const FPS_UPDATE_INTERVAL: f32 = 1.0;
const MARKER_SIZE: i32 = 24;
const HUE_SPEED: f32 = 0.1;

/// Frames-per-second averaged over [`FPS_UPDATE_INTERVAL`]
#[derive(Debug, Default)]
pub struct FpsCounter {
    frame_count: u32,
    elapsed: f32,
    fps: Option<f32>,
}

impl FpsCounter {
    /// Count a frame; returns the new average once per interval
    pub fn tick(&mut self, delta_seconds: f32) -> Option<f32> {
        self.frame_count += 1;
        self.elapsed += delta_seconds;

        if self.elapsed < FPS_UPDATE_INTERVAL {
            return None;
        }
        let fps = self.frame_count as f32 / self.elapsed;
        self.fps = Some(fps);
        self.frame_count = 0;
        self.elapsed = 0.0;
        Some(fps)
    }

    pub fn fps(&self) -> Option<f32> {
        self.fps
    }
}

/// Scissor origin for a marker centered on `position`.
///
/// Window coordinates start top-left, GL scissor coordinates bottom-left.
pub fn marker_origin(position: Vec2, framebuffer_height: i32) -> IVec2 {
    IVec2::new(
        position.x as i32 - MARKER_SIZE / 2,
        framebuffer_height - position.y as i32 - MARKER_SIZE / 2,
    )
}

/// Drag state: where the pointer is while a button is held
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct DragState {
    pub active: bool,
    pub position: Vec2,
}

/// Demo client: logs input, reports FPS and paints a marker that follows
/// the pointer while dragging. Uses scissored clears only, no shaders.
pub struct DemoClient {
    gl: Option<Rc<glow::Context>>,
    framebuffer_height: i32,
    drag: DragState,
    fps: FpsCounter,
    hue: f32,
}

impl DemoClient {
    pub fn new(gl: Option<Rc<glow::Context>>, window_size: IVec2) -> Self {
        Self {
            gl,
            framebuffer_height: window_size.y,
            drag: DragState::default(),
            fps: FpsCounter::default(),
            hue: 0.0,
        }
    }

    pub fn drag(&self) -> DragState {
        self.drag
    }

    /// The host resizes the viewport with the window, so it tracks the
    /// current framebuffer height
    fn refresh_framebuffer_height(&mut self) {
        let Some(gl) = &self.gl else {
            return;
        };
        let mut viewport = [0i32; 4];
        unsafe { gl.get_parameter_i32_slice(glow::VIEWPORT, &mut viewport) };
        if viewport[3] > 0 {
            self.framebuffer_height = viewport[3];
        }
    }

    fn draw_marker(&self) {
        let Some(gl) = &self.gl else {
            return;
        };
        let color = hsv_to_rgb(self.hue, 0.8, 1.0);
        let origin = marker_origin(self.drag.position, self.framebuffer_height);

        unsafe {
            gl.enable(glow::SCISSOR_TEST);
            gl.scissor(origin.x, origin.y, MARKER_SIZE, MARKER_SIZE);
            gl.clear_color(color.x, color.y, color.z, 1.0);
            gl.clear(glow::COLOR_BUFFER_BIT);
            gl.disable(glow::SCISSOR_TEST);
        }
    }
}

impl WindowClient for DemoClient {
    fn on_key_down(&mut self, key: &KeyPress) {
        if key.repeat {
            return;
        }
        log::info!("key down: {:?}", key.logical_key);
        if key.physical_key == PhysicalKey::Code(KeyCode::Space) {
            self.hue = (self.hue + 0.5).fract();
        }
    }

    fn on_key_up(&mut self, key: &KeyPress) {
        log::debug!("key up: {:?}", key.logical_key);
    }

    fn on_drag_begin(&mut self, position: Vec2) {
        log::info!("drag begin at ({:.0}, {:.0})", position.x, position.y);
        self.drag = DragState {
            active: true,
            position,
        };
    }

    fn on_drag_end(&mut self, position: Vec2) {
        log::info!("drag end at ({:.0}, {:.0})", position.x, position.y);
        self.drag = DragState {
            active: false,
            position,
        };
    }

    fn on_drag_motion(&mut self, position: Vec2) {
        if self.drag.active {
            self.drag.position = position;
        }
    }

    fn on_update_window(&mut self, delta_seconds: f32) {
        self.hue = (self.hue + delta_seconds * HUE_SPEED).fract();
        if let Some(fps) = self.fps.tick(delta_seconds) {
            log::info!("FPS: {fps:.1}");
        }
        if self.drag.active {
            self.refresh_framebuffer_height();
            self.draw_marker();
        }
    }
}
