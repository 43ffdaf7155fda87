pub mod cli;
pub mod config;
pub mod core;
pub mod demo;
pub mod error;
pub mod math;
pub mod mesh;
pub mod tessellator;

pub use crate::core::{client_handle, HostEvent, HostState, KeyPress, WindowClient, WindowHost};
pub use error::{ErrorKind, GlError, HostError};
