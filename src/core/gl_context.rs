use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::num::NonZeroU32;
use std::rc::Rc;
use std::time::Duration;

use glam::{IVec2, Vec4};
use glow::HasContext;
use glutin::config::{Config, ConfigTemplateBuilder};
use glutin::context::{
    ContextApi, ContextAttributesBuilder, GlProfile as ContextProfile, PossiblyCurrentContext,
    Version,
};
use glutin::display::GetGlDisplay;
use glutin::prelude::*;
use glutin::surface::{Surface, SurfaceAttributesBuilder, SwapInterval, WindowSurface};
use glutin_winit::{DisplayBuilder, GlWindow};
use raw_window_handle::HasWindowHandle;
use winit::application::ApplicationHandler;
use winit::dpi::{PhysicalPosition, PhysicalSize};
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus};
use winit::window::{Window, WindowId};

use super::event::HostEvent;
use super::input_adapter::EventTranslator;
use super::loader::GlInfo;
use super::window::{centered_position, GlProfile, Platform, RenderSurface, SurfaceRequest};
use crate::error::{GlError, HostError, Result};

/// Events waiting for one window, plus its translation state
#[derive(Default)]
struct WindowQueue {
    translator: EventTranslator,
    pending: VecDeque<HostEvent>,
}

/// The platform event loop and the per-window queues it feeds.
///
/// Winit allows a single event loop per process and it must stay on the
/// thread that created it, so every host on that thread shares this.
struct SharedLoop {
    event_loop: EventLoop<()>,
    queues: HashMap<WindowId, WindowQueue>,
}

impl SharedLoop {
    /// Dispatch whatever the OS has queued, without waiting
    fn pump(&mut self) {
        let SharedLoop { event_loop, queues } = self;
        let mut collector = Collector {
            queues: &mut *queues,
        };
        let status = event_loop.pump_app_events(Some(Duration::ZERO), &mut collector);

        if let PumpStatus::Exit(code) = status {
            log::debug!("platform event loop exited with code {code}");
            for queue in queues.values_mut() {
                queue.pending.push_back(HostEvent::Quit);
            }
        }
    }
}

/// Sorts pumped window events into their window's queue
struct Collector<'a> {
    queues: &'a mut HashMap<WindowId, WindowQueue>,
}

impl ApplicationHandler for Collector<'_> {
    fn resumed(&mut self, _event_loop: &ActiveEventLoop) {}

    fn window_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        if let Some(queue) = self.queues.get_mut(&window_id) {
            if let Some(event) = queue.translator.translate(&event) {
                queue.pending.push_back(event);
            }
        }
    }
}

thread_local! {
    static SHARED_LOOP: RefCell<Option<Rc<RefCell<SharedLoop>>>> = const { RefCell::new(None) };
}

fn create_event_loop() -> Result<EventLoop<()>> {
    let mut builder = EventLoop::builder();

    // Hosts may live on a non-main thread (test harnesses do this)
    #[cfg(any(
        target_os = "linux",
        target_os = "dragonfly",
        target_os = "freebsd",
        target_os = "netbsd",
        target_os = "openbsd"
    ))]
    {
        winit::platform::x11::EventLoopBuilderExtX11::with_any_thread(&mut builder, true);
        winit::platform::wayland::EventLoopBuilderExtWayland::with_any_thread(&mut builder, true);
    }

    builder
        .build()
        .map_err(|e| HostError::Platform(e.to_string()))
}

/// Winit + glutin backend producing windows with a current OpenGL context
#[derive(Default)]
pub struct GlutinPlatform {
    shared: Option<Rc<RefCell<SharedLoop>>>,
}

impl GlutinPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the platform event loop is running on this thread
    pub fn is_initialized(&self) -> bool {
        self.shared.is_some()
    }
}

impl Platform for GlutinPlatform {
    type Surface = GlutinSurface;

    fn ensure_initialized(&mut self) -> Result<()> {
        if self.shared.is_some() {
            return Ok(());
        }

        let shared = SHARED_LOOP.with(|slot| -> Result<_> {
            let mut slot = slot.borrow_mut();
            if let Some(shared) = slot.as_ref() {
                return Ok(Rc::clone(shared));
            }

            log::debug!("starting platform event loop");
            let shared = Rc::new(RefCell::new(SharedLoop {
                event_loop: create_event_loop()?,
                queues: HashMap::new(),
            }));
            *slot = Some(Rc::clone(&shared));
            Ok(shared)
        })?;

        self.shared = Some(shared);
        Ok(())
    }

    fn create_surface(&mut self, request: &SurfaceRequest) -> Result<GlutinSurface> {
        let shared = self
            .shared
            .clone()
            .ok_or_else(|| HostError::Platform("event loop is not running".to_string()))?;

        let (width, height) = request.pixel_size().ok_or_else(|| {
            HostError::WindowCreation(format!(
                "invalid window size {}x{}",
                request.size.x, request.size.y
            ))
        })?;

        // Hidden until it has been moved to the center of the screen
        let attributes = Window::default_attributes()
            .with_title(request.title.as_str())
            .with_inner_size(PhysicalSize::new(width, height))
            .with_resizable(true)
            .with_visible(false);

        let template = ConfigTemplateBuilder::new()
            .with_alpha_size(8)
            .with_depth_size(24);

        let (window, config) = {
            let state = shared.borrow();
            DisplayBuilder::new()
                .with_window_attributes(Some(attributes))
                .build(&state.event_loop, template, pick_config)
                .map_err(|e| HostError::WindowCreation(e.to_string()))?
        };
        let window = window.ok_or_else(|| {
            HostError::WindowCreation("display builder did not create a window".to_string())
        })?;

        center_window(&window);
        window.set_visible(true);

        let (context, surface) = create_context(&window, &config, request)?;

        let display = config.display();
        // SAFETY: the context was just made current on this thread
        let gl = unsafe {
            glow::Context::from_loader_function_cstr(|name| display.get_proc_address(name))
        };

        shared
            .borrow_mut()
            .queues
            .insert(window.id(), WindowQueue::default());

        Ok(GlutinSurface {
            gl: Rc::new(gl),
            context,
            surface,
            window,
            shared,
        })
    }
}

/// Prefer the config with the most samples, as the display offers them
fn pick_config(configs: Box<dyn Iterator<Item = Config> + '_>) -> Config {
    configs
        .reduce(|best, config| {
            if config.num_samples() > best.num_samples() {
                config
            } else {
                best
            }
        })
        // find_configs reports an error instead of an empty list
        .expect("display offered no GL configs")
}

fn center_window(window: &Window) {
    let Some(monitor) = window.primary_monitor().or_else(|| window.current_monitor()) else {
        return;
    };

    let origin = monitor.position();
    let screen = monitor.size();
    let outer = window.outer_size();
    let position = centered_position(
        IVec2::new(origin.x, origin.y),
        IVec2::new(screen.width as i32, screen.height as i32),
        IVec2::new(outer.width as i32, outer.height as i32),
    );
    window.set_outer_position(PhysicalPosition::new(position.x, position.y));
}

fn create_context(
    window: &Window,
    config: &Config,
    request: &SurfaceRequest,
) -> Result<(PossiblyCurrentContext, Surface<WindowSurface>)> {
    let raw_window_handle = window
        .window_handle()
        .map_err(|e| HostError::ContextCreation(e.to_string()))?
        .as_raw();

    let (major, minor) = request.gl_version;
    // Core profile contexts are forward-compatible on every glutin backend
    let profile = match request.profile {
        GlProfile::Core => ContextProfile::Core,
        GlProfile::Compatibility => ContextProfile::Compatibility,
    };
    let context_attributes = ContextAttributesBuilder::new()
        .with_context_api(ContextApi::OpenGl(Some(Version::new(major, minor))))
        .with_profile(profile)
        .build(Some(raw_window_handle));

    let display = config.display();
    let not_current = unsafe { display.create_context(config, &context_attributes) }
        .map_err(|e| HostError::ContextCreation(e.to_string()))?;

    let surface_attributes = window
        .build_surface_attributes(SurfaceAttributesBuilder::<WindowSurface>::new())
        .map_err(|e| HostError::ContextCreation(e.to_string()))?;
    let surface = unsafe { display.create_window_surface(config, &surface_attributes) }
        .map_err(|e| HostError::ContextCreation(e.to_string()))?;

    let context = not_current
        .make_current(&surface)
        .map_err(|e| HostError::ContextCreation(e.to_string()))?;

    if let Err(e) = surface.set_swap_interval(&context, SwapInterval::Wait(NonZeroU32::MIN)) {
        log::debug!("vsync unavailable: {e}");
    }

    Ok((context, surface))
}

/// Window, GL surface and current context owned by one host.
///
/// Fields drop in declaration order: GL function table, context, surface,
/// then the window itself.
pub struct GlutinSurface {
    gl: Rc<glow::Context>,
    context: PossiblyCurrentContext,
    surface: Surface<WindowSurface>,
    window: Window,
    shared: Rc<RefCell<SharedLoop>>,
}

impl GlutinSurface {
    /// GL function table for this window's context
    pub fn gl(&self) -> &Rc<glow::Context> {
        &self.gl
    }

    pub fn window(&self) -> &Window {
        &self.window
    }
}

impl RenderSurface for GlutinSurface {
    fn make_current(&mut self) -> Result<()> {
        // Every show leaves the newest window's context current
        if self.context.is_current() {
            return Ok(());
        }
        self.context
            .make_current(&self.surface)
            .map_err(|e| HostError::MakeCurrent(e.to_string()))
    }

    fn drain_events(&mut self) -> Vec<HostEvent> {
        let mut shared = self.shared.borrow_mut();
        shared.pump();
        shared
            .queues
            .get_mut(&self.window.id())
            .map(|queue| queue.pending.drain(..).collect())
            .unwrap_or_default()
    }

    fn clear(&mut self, color: Vec4) {
        unsafe {
            self.gl.clear_color(color.x, color.y, color.z, color.w);
            self.gl.clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT);
        }
    }

    fn take_error(&mut self) -> Option<GlError> {
        GlError::from_code(unsafe { self.gl.get_error() })
    }

    fn swap_buffers(&mut self) -> Result<()> {
        self.surface
            .swap_buffers(&self.context)
            .map_err(|e| HostError::Present(e.to_string()))
    }

    fn resize(&mut self, size: IVec2) {
        let width = NonZeroU32::new(size.x.max(0) as u32);
        let height = NonZeroU32::new(size.y.max(0) as u32);
        // Minimized windows report 0x0; keep the old surface size
        if let (Some(width), Some(height)) = (width, height) {
            self.surface.resize(&self.context, width, height);
            unsafe { self.gl.viewport(0, 0, size.x, size.y) };
        }
    }

    fn probe_loader(&self) -> Result<GlInfo> {
        let version = self.gl.version();
        let info = GlInfo {
            version: (version.major, version.minor),
            is_embedded: version.is_embedded,
            vendor: unsafe { self.gl.get_parameter_string(glow::VENDOR) },
            renderer: unsafe { self.gl.get_parameter_string(glow::RENDERER) },
        };

        if !info.is_embedded && !info.supports(3, 2) {
            return Err(HostError::LoaderInit(format!(
                "context reports OpenGL {}.{}, 3.2 is required",
                info.version.0, info.version.1
            )));
        }
        Ok(info)
    }
}

impl Drop for GlutinSurface {
    fn drop(&mut self) {
        if let Ok(mut shared) = self.shared.try_borrow_mut() {
            shared.queues.remove(&self.window.id());
        }
    }
}
