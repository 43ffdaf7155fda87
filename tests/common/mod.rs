//! Scripted headless platform shared by the integration tests
#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

use gl_window_host::core::{
    GlInfo, HostEvent, KeyPress, Platform, RenderSurface, SurfaceRequest, WindowClient,
};
use gl_window_host::{GlError, HostError};
use glam::{IVec2, Vec2, Vec4};

pub type Journal = Rc<RefCell<Vec<String>>>;

/// What the fake platform does, and a journal of everything that happened
#[derive(Default)]
pub struct Script {
    /// One batch per `drain_events` call; an exhausted script yields `Quit`
    pub batches: VecDeque<Vec<HostEvent>>,
    /// GL error reported on a given frame (0-based)
    pub errors: HashMap<usize, GlError>,
    pub init_error: Option<HostError>,
    pub create_error: Option<HostError>,
    pub probe_error: Option<HostError>,
    pub make_current_error: Option<HostError>,
    pub requests: Vec<SurfaceRequest>,
    pub surface_size: Option<IVec2>,
    pub probes: usize,
}

pub struct ScriptedPlatform {
    pub script: Rc<RefCell<Script>>,
    pub journal: Journal,
}

impl ScriptedPlatform {
    pub fn new(journal: &Journal) -> (Self, Rc<RefCell<Script>>) {
        let script = Rc::new(RefCell::new(Script::default()));
        let platform = Self {
            script: Rc::clone(&script),
            journal: Rc::clone(journal),
        };
        (platform, script)
    }
}

impl Platform for ScriptedPlatform {
    type Surface = ScriptedSurface;

    fn ensure_initialized(&mut self) -> Result<(), HostError> {
        self.journal.borrow_mut().push("init".to_string());
        match self.script.borrow_mut().init_error.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn create_surface(&mut self, request: &SurfaceRequest) -> Result<ScriptedSurface, HostError> {
        self.journal.borrow_mut().push("create".to_string());
        let mut script = self.script.borrow_mut();
        if let Some(err) = script.create_error.take() {
            return Err(err);
        }
        script.requests.push(request.clone());
        script.surface_size = Some(request.size);
        Ok(ScriptedSurface {
            script: Rc::clone(&self.script),
            journal: Rc::clone(&self.journal),
            frame: 0,
        })
    }
}

pub struct ScriptedSurface {
    script: Rc<RefCell<Script>>,
    journal: Journal,
    frame: usize,
}

impl ScriptedSurface {
    fn log(&self, entry: String) {
        self.journal.borrow_mut().push(entry);
    }
}

impl RenderSurface for ScriptedSurface {
    fn make_current(&mut self) -> Result<(), HostError> {
        self.log("make_current".to_string());
        match self.script.borrow_mut().make_current_error.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn drain_events(&mut self) -> Vec<HostEvent> {
        self.log("drain".to_string());
        self.script
            .borrow_mut()
            .batches
            .pop_front()
            .unwrap_or_else(|| vec![HostEvent::Quit])
    }

    fn clear(&mut self, color: Vec4) {
        self.log(format!("clear {} {} {} {}", color.x, color.y, color.z, color.w));
    }

    fn take_error(&mut self) -> Option<GlError> {
        self.log("check".to_string());
        self.script.borrow_mut().errors.remove(&self.frame)
    }

    fn swap_buffers(&mut self) -> Result<(), HostError> {
        self.log("swap".to_string());
        self.frame += 1;
        Ok(())
    }

    fn resize(&mut self, size: IVec2) {
        self.log(format!("resize {}x{}", size.x, size.y));
        self.script.borrow_mut().surface_size = Some(size);
    }

    fn probe_loader(&self) -> Result<GlInfo, HostError> {
        let mut script = self.script.borrow_mut();
        script.probes += 1;
        match script.probe_error.take() {
            Some(err) => Err(err),
            None => Ok(GlInfo::new((3, 3), "Scripted", "Headless")),
        }
    }
}

/// Client that writes every callback into the shared journal
pub struct RecordingClient {
    journal: Journal,
    pub updates: Vec<f32>,
}

impl RecordingClient {
    pub fn new(journal: &Journal) -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self {
            journal: Rc::clone(journal),
            updates: Vec::new(),
        }))
    }
}

impl WindowClient for RecordingClient {
    fn on_key_down(&mut self, key: &KeyPress) {
        self.journal
            .borrow_mut()
            .push(format!("key_down {:?}", key.physical_key));
    }

    fn on_key_up(&mut self, key: &KeyPress) {
        self.journal
            .borrow_mut()
            .push(format!("key_up {:?}", key.physical_key));
    }

    fn on_drag_begin(&mut self, position: Vec2) {
        self.journal
            .borrow_mut()
            .push(format!("drag_begin {} {}", position.x, position.y));
    }

    fn on_drag_end(&mut self, position: Vec2) {
        self.journal
            .borrow_mut()
            .push(format!("drag_end {} {}", position.x, position.y));
    }

    fn on_drag_motion(&mut self, position: Vec2) {
        self.journal
            .borrow_mut()
            .push(format!("drag_motion {} {}", position.x, position.y));
    }

    fn on_update_window(&mut self, delta_seconds: f32) {
        self.updates.push(delta_seconds);
        self.journal.borrow_mut().push("update".to_string());
    }
}

pub fn new_journal() -> Journal {
    Rc::new(RefCell::new(Vec::new()))
}

/// Journal entries from the first frame onwards (skips show-time calls).
/// A frame starts with the "make_current" right before its "drain".
pub fn loop_entries(journal: &Journal) -> Vec<String> {
    let journal = journal.borrow();
    let start = match journal.iter().position(|entry| entry == "drain") {
        Some(drain) if drain > 0 && journal[drain - 1] == "make_current" => drain - 1,
        Some(drain) => drain,
        None => journal.len(),
    };
    journal[start..].to_vec()
}
