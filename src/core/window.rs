use glam::{IVec2, Vec4};

use super::event::HostEvent;
use super::loader::GlInfo;
use crate::error::{GlError, Result};

/// Which OpenGL profile to ask the driver for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlProfile {
    Core,
    Compatibility,
}

/// Everything a platform needs to open a window with a GL context
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceRequest {
    pub title: String,
    /// Client-area size in physical pixels
    pub size: IVec2,
    pub profile: GlProfile,
    /// Requested context version (major, minor)
    pub gl_version: (u8, u8),
}

impl SurfaceRequest {
    pub const GL_VERSION: (u8, u8) = (3, 2);

    pub fn new(title: &str, size: IVec2, profile: GlProfile) -> Self {
        Self {
            title: title.to_string(),
            size,
            profile,
            gl_version: Self::GL_VERSION,
        }
    }

    /// Size as unsigned pixels, or `None` if either side is not positive
    pub fn pixel_size(&self) -> Option<(u32, u32)> {
        if self.size.x > 0 && self.size.y > 0 {
            Some((self.size.x as u32, self.size.y as u32))
        } else {
            None
        }
    }
}

/// Windowing backend - creates windows with a bound GL context
pub trait Platform {
    type Surface: RenderSurface;

    /// Bring up the video/event subsystem if it is not running yet
    fn ensure_initialized(&mut self) -> Result<()>;

    /// Create a window and a current GL context for it
    fn create_surface(&mut self, request: &SurfaceRequest) -> Result<Self::Surface>;
}

/// A window with a current GL context, owned exclusively by one host.
/// Dropping it releases the context and destroys the window.
pub trait RenderSurface {
    /// Bind this window's context to the calling thread if another one is
    /// current. Called before any GL work for the window.
    fn make_current(&mut self) -> Result<()>;

    /// Take every event queued for this window without blocking
    fn drain_events(&mut self) -> Vec<HostEvent>;

    /// Clear color and depth buffers to `color`
    fn clear(&mut self, color: Vec4);

    /// Pop the oldest pending renderer error, if any
    fn take_error(&mut self) -> Option<GlError>;

    /// Present the back buffer
    fn swap_buffers(&mut self) -> Result<()>;

    /// Follow a window resize (some platforms need the GL surface resized)
    fn resize(&mut self, size: IVec2);

    /// Inspect the loaded GL entry points; run once per process
    fn probe_loader(&self) -> Result<GlInfo>;
}

/// Top-left position that centers a window of `window_size` on a monitor
pub fn centered_position(monitor_origin: IVec2, monitor_size: IVec2, window_size: IVec2) -> IVec2 {
    monitor_origin + (monitor_size - window_size) / 2
}
