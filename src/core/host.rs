use std::rc::Rc;

use glam::{IVec2, Vec4};

use super::client::{dispatch_event, ClientHandle};
use super::clock::FrameClock;
use super::event::{HostEvent, WindowChange};
use super::gl_context::GlutinPlatform;
use super::loader::{self, GlInfo};
use super::window::{GlProfile, Platform, RenderSurface, SurfaceRequest};
use crate::error::{HostError, Result};

/// Lifecycle of a [`WindowHost`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostState {
    /// No window yet; profile can still change
    Uninitialized,
    /// Window and context exist
    Shown,
    /// Inside `do_main_loop`
    Looping,
    /// A quit event was received. Final.
    Terminated,
}

/// Owns one window with an OpenGL context and runs its frame loop.
///
/// ```no_run
/// use std::cell::RefCell;
/// use std::rc::Rc;
/// use gl_window_host::core::{client_handle, WindowClient, WindowHost};
/// use glam::IVec2;
///
/// struct Lesson;
///
/// impl WindowClient for Lesson {
///     fn on_update_window(&mut self, _delta_seconds: f32) {}
/// }
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let lesson = Rc::new(RefCell::new(Lesson));
/// let mut host = WindowHost::new();
/// host.show("Lesson", IVec2::new(800, 600))?;
/// host.set_client(Some(client_handle(&lesson)));
/// host.do_main_loop()?;
/// # Ok(())
/// # }
/// ```
pub struct WindowHost<P: Platform = GlutinPlatform> {
    platform: P,
    surface: Option<P::Surface>,
    client: Option<ClientHandle>,
    size: IVec2,
    background: Vec4,
    core_profile: bool,
    state: HostState,
}

impl WindowHost<GlutinPlatform> {
    pub fn new() -> Self {
        Self::with_platform(GlutinPlatform::new())
    }

    /// Shared GL function table, available once the window is shown.
    /// Clients keep a clone to issue draw calls from `on_update_window`.
    pub fn gl(&self) -> Option<Rc<glow::Context>> {
        self.surface.as_ref().map(|surface| Rc::clone(surface.gl()))
    }
}

impl Default for WindowHost<GlutinPlatform> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Platform> WindowHost<P> {
    pub fn with_platform(platform: P) -> Self {
        Self {
            platform,
            surface: None,
            client: None,
            size: IVec2::ZERO,
            background: Vec4::new(0.0, 0.0, 0.0, 1.0),
            core_profile: true,
            state: HostState::Uninitialized,
        }
    }

    /// Choose between Core (default) and Compatibility profile.
    /// Only possible before the window is created.
    pub fn set_core_profile_enabled(&mut self, enabled: bool) -> Result<()> {
        if self.surface.is_some() {
            return Err(HostError::ProfileLocked);
        }
        self.core_profile = enabled;
        Ok(())
    }

    pub fn is_core_profile_enabled(&self) -> bool {
        self.core_profile
    }

    /// Create the window (centered, resizable) and its OpenGL 3.2 context.
    ///
    /// The first successful call in the process also initializes the GL
    /// loader. Calling `show` again on the same host is an error.
    pub fn show(&mut self, title: &str, size: IVec2) -> Result<()> {
        if self.surface.is_some() {
            return Err(HostError::AlreadyShown);
        }
        self.platform.ensure_initialized()?;

        let profile = if self.core_profile {
            GlProfile::Core
        } else {
            GlProfile::Compatibility
        };
        let request = SurfaceRequest::new(title, size, profile);
        let mut surface = self.platform.create_surface(&request)?;
        surface.make_current()?;

        // A loader failure drops the surface, closing the new window
        loader::init_gl_once(|| surface.probe_loader())?;

        log::info!(
            "window '{}' shown at {}x{} ({:?} profile)",
            title,
            size.x,
            size.y,
            profile
        );
        self.size = size;
        self.surface = Some(surface);
        self.state = HostState::Shown;
        Ok(())
    }

    /// Replace the event/update sink. `None` detaches the current client.
    pub fn set_client(&mut self, client: Option<ClientHandle>) {
        log::debug!(
            "client {}",
            if client.is_some() { "attached" } else { "detached" }
        );
        self.client = client;
    }

    pub fn set_background_color(&mut self, color: Vec4) {
        self.background = color;
    }

    pub fn background_color(&self) -> Vec4 {
        self.background
    }

    /// Current client-area size; follows resize events
    pub fn window_size(&self) -> IVec2 {
        self.size
    }

    pub fn state(&self) -> HostState {
        self.state
    }

    /// Driver details from the process-wide loader
    pub fn gl_info(&self) -> Option<&'static GlInfo> {
        loader::gl_info()
    }

    pub fn surface(&self) -> Option<&P::Surface> {
        self.surface.as_ref()
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    /// Run frames until a quit event arrives.
    ///
    /// Each iteration binds this window's context and drains every pending
    /// event, then clears the frame,
    /// updates the client, checks for GL errors and presents. Returns
    /// immediately once the host is terminated.
    pub fn do_main_loop(&mut self) -> Result<()> {
        match self.state {
            HostState::Uninitialized => return Err(HostError::NotShown),
            HostState::Terminated => return Ok(()),
            HostState::Shown | HostState::Looping => {}
        }

        self.state = HostState::Looping;
        let result = self.run_frames();
        if result.is_err() {
            self.state = HostState::Shown;
        }
        result
    }

    fn run_frames(&mut self) -> Result<()> {
        let mut clock = FrameClock::new();
        let mut frames: u64 = 0;

        loop {
            // Other hosts on this thread may have bound their own context
            let events = match self.surface.as_mut() {
                Some(surface) => {
                    surface.make_current()?;
                    surface.drain_events()
                }
                None => return Err(HostError::NotShown),
            };
            for event in &events {
                if !self.consume_event(event) {
                    self.dispatch_to_client(event);
                }
            }

            if self.state == HostState::Terminated {
                log::info!(
                    "main loop finished after {frames} frames in {:.1}s",
                    clock.elapsed().as_secs_f32()
                );
                return Ok(());
            }

            let Some(surface) = self.surface.as_mut() else {
                return Err(HostError::NotShown);
            };
            surface.clear(self.background);

            let delta_seconds = clock.grab_delta_seconds();
            if let Some(client) = self.client.as_ref().and_then(|weak| weak.upgrade()) {
                client.borrow_mut().on_update_window(delta_seconds);
            }

            if let Some(err) = surface.take_error() {
                log::error!("OpenGL error after frame {frames}: {err}");
                return Err(HostError::Gl(err));
            }

            surface.swap_buffers()?;
            frames += 1;
        }
    }

    /// Handle events that belong to the host. Returns true if consumed.
    fn consume_event(&mut self, event: &HostEvent) -> bool {
        match event {
            HostEvent::Quit => {
                self.state = HostState::Terminated;
                true
            }
            HostEvent::Window(change) => {
                if let WindowChange::Resized(size) = change {
                    log::debug!("window resized to {}x{}", size.x, size.y);
                    self.size = *size;
                    if let Some(surface) = self.surface.as_mut() {
                        surface.resize(*size);
                    }
                }
                true
            }
            _ => false,
        }
    }

    fn dispatch_to_client(&self, event: &HostEvent) {
        let Some(client) = self.client.as_ref().and_then(|weak| weak.upgrade()) else {
            return;
        };
        log::trace!("dispatching {event:?}");
        dispatch_event(event, &mut *client.borrow_mut());
    }
}
