pub mod client;
pub mod clock;
pub mod event;
pub mod gl_context;
pub mod host;
pub mod input_adapter;
pub mod loader;
pub mod window;

pub use client::*;
pub use clock::*;
pub use event::*;
pub use gl_context::*;
pub use host::*;
pub use input_adapter::*;
pub use loader::{gl_info, init_gl_once, load_attempts, GlInfo, InitOnce};
pub use window::*;
