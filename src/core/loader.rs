//! Process-wide, run-once GL loader initialization.
//!
//! Each window loads its own function table for its own context. The
//! driver probe (version check, vendor and renderer strings) runs only for
//! the first window shown in the process; later hosts reuse its result.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, OnceLock, PoisonError};

use crate::error::{HostError, Result};

/// Driver details captured by the first successful loader run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlInfo {
    /// (major, minor) as reported by the context
    pub version: (u32, u32),
    /// True for OpenGL ES contexts
    pub is_embedded: bool,
    pub vendor: String,
    pub renderer: String,
}

impl GlInfo {
    pub fn new(version: (u32, u32), vendor: &str, renderer: &str) -> Self {
        Self {
            version,
            is_embedded: false,
            vendor: vendor.to_string(),
            renderer: renderer.to_string(),
        }
    }

    /// Whether the context is at least `major.minor`
    pub fn supports(&self, major: u32, minor: u32) -> bool {
        self.version >= (major, minor)
    }
}

/// Runs an initializer at most once successfully.
///
/// Callers race on a mutex; the first one runs the initializer and every
/// other caller sees its result. A failed attempt stores nothing, so the
/// next caller tries again.
pub struct InitOnce<T> {
    value: OnceLock<T>,
    gate: Mutex<()>,
    attempts: AtomicUsize,
}

impl<T> InitOnce<T> {
    pub const fn new() -> Self {
        Self {
            value: OnceLock::new(),
            gate: Mutex::new(()),
            attempts: AtomicUsize::new(0),
        }
    }

    pub fn get(&self) -> Option<&T> {
        self.value.get()
    }

    pub fn get_or_try_init<E, F>(&self, init: F) -> std::result::Result<&T, E>
    where
        F: FnOnce() -> std::result::Result<T, E>,
    {
        if let Some(value) = self.value.get() {
            return Ok(value);
        }

        // An initializer that panicked left nothing behind; the gate is still usable
        let _gate = self.gate.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(value) = self.value.get() {
            return Ok(value);
        }

        self.attempts.fetch_add(1, Ordering::SeqCst);
        let value = init()?;
        Ok(self.value.get_or_init(|| value))
    }

    /// How many times the initializer has been invoked
    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

impl<T> Default for InitOnce<T> {
    fn default() -> Self {
        Self::new()
    }
}

static GL_LOADER: InitOnce<GlInfo> = InitOnce::new();

/// Run `probe` unless the loader was already initialized in this process
pub fn init_gl_once<F>(probe: F) -> Result<&'static GlInfo>
where
    F: FnOnce() -> Result<GlInfo>,
{
    GL_LOADER.get_or_try_init(|| {
        let info = probe()?;
        log::info!(
            "OpenGL {}.{}{} - {} ({})",
            info.version.0,
            info.version.1,
            if info.is_embedded { " ES" } else { "" },
            info.renderer,
            info.vendor
        );
        Ok::<_, HostError>(info)
    })
}

/// GL details from the process-wide loader, once it has run
pub fn gl_info() -> Option<&'static GlInfo> {
    GL_LOADER.get()
}

/// Number of loader initialization attempts made in this process
pub fn load_attempts() -> usize {
    GL_LOADER.attempts()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn runs_initializer_once() {
        let once: InitOnce<u32> = InitOnce::new();
        let mut runs = 0;

        for _ in 0..3 {
            let value = once
                .get_or_try_init(|| {
                    runs += 1;
                    Ok::<_, ()>(42)
                })
                .unwrap();
            assert_eq!(*value, 42);
        }

        assert_eq!(runs, 1);
        assert_eq!(once.attempts(), 1);
    }

    #[test]
    fn failure_allows_retry() {
        let once: InitOnce<&str> = InitOnce::new();

        let first = once.get_or_try_init(|| Err("driver missing"));
        assert_eq!(first, Err("driver missing"));
        assert!(once.get().is_none());

        let second = once.get_or_try_init(|| Ok::<_, &str>("ready"));
        assert_eq!(second, Ok(&"ready"));

        let third = once.get_or_try_init(|| Err("never called"));
        assert_eq!(third, Ok(&"ready"));
        assert_eq!(once.attempts(), 2);
    }

    #[test]
    fn concurrent_callers_collapse_to_one_run() {
        let once: Arc<InitOnce<usize>> = Arc::new(InitOnce::new());
        let runs = Arc::new(AtomicUsize::new(0));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let once = Arc::clone(&once);
                let runs = Arc::clone(&runs);
                thread::spawn(move || {
                    *once
                        .get_or_try_init(|| {
                            runs.fetch_add(1, Ordering::SeqCst);
                            Ok::<_, ()>(7)
                        })
                        .unwrap()
                })
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), 7);
        }
        assert_eq!(runs.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn version_support_check() {
        let info = GlInfo::new((3, 3), "vendor", "renderer");
        assert!(info.supports(3, 2));
        assert!(info.supports(3, 3));
        assert!(!info.supports(4, 0));

        let old = GlInfo::new((2, 1), "vendor", "renderer");
        assert!(!old.supports(3, 2));
    }
}
