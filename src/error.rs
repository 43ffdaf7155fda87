use std::fmt;

/// Broad category of a [`HostError`].
///
/// `Logic` errors are programmer misuse (calling things in the wrong
/// lifecycle state). `Runtime` errors come from the environment: missing
/// display, driver failures, GL errors raised while drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Logic,
    Runtime,
}

/// Decoded `glGetError` category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlError {
    InvalidEnum,
    InvalidValue,
    InvalidOperation,
    StackOverflow,
    StackUnderflow,
    OutOfMemory,
    /// Anything else, usually raised by an extension (framebuffers, shaders, ...)
    Other(u32),
}

impl GlError {
    /// Decode a raw GL error code. Returns `None` for `GL_NO_ERROR`.
    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            glow::NO_ERROR => None,
            glow::INVALID_ENUM => Some(Self::InvalidEnum),
            glow::INVALID_VALUE => Some(Self::InvalidValue),
            glow::INVALID_OPERATION => Some(Self::InvalidOperation),
            glow::STACK_OVERFLOW => Some(Self::StackOverflow),
            glow::STACK_UNDERFLOW => Some(Self::StackUnderflow),
            glow::OUT_OF_MEMORY => Some(Self::OutOfMemory),
            other => Some(Self::Other(other)),
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::InvalidEnum => "invalid enum passed to GL function (GL_INVALID_ENUM)",
            Self::InvalidValue => "invalid parameter passed to GL function (GL_INVALID_VALUE)",
            Self::InvalidOperation => {
                "cannot execute some of GL functions in current state (GL_INVALID_OPERATION)"
            }
            Self::StackOverflow => "matrix stack overflow occurred inside GL (GL_STACK_OVERFLOW)",
            Self::StackUnderflow => {
                "matrix stack underflow occurred inside GL (GL_STACK_UNDERFLOW)"
            }
            Self::OutOfMemory => "not enough memory to execute GL function (GL_OUT_OF_MEMORY)",
            Self::Other(_) => "error in some GL extension (framebuffers, shaders, etc)",
        }
    }
}

impl fmt::Display for GlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Other(code) => write!(f, "{} [0x{code:04X}]", self.message()),
            _ => f.write_str(self.message()),
        }
    }
}

/// Errors raised by the window host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostError {
    // ---- Logic (misuse) ----
    ProfileLocked,
    AlreadyShown,
    NotShown,

    // ---- Runtime (environment) ----
    Platform(String),
    WindowCreation(String),
    ContextCreation(String),
    MakeCurrent(String),
    LoaderInit(String),
    Gl(GlError),
    Present(String),
}

impl HostError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            HostError::ProfileLocked | HostError::AlreadyShown | HostError::NotShown => {
                ErrorKind::Logic
            }
            _ => ErrorKind::Runtime,
        }
    }

    pub fn is_logic(&self) -> bool {
        self.kind() == ErrorKind::Logic
    }

    pub fn is_runtime(&self) -> bool {
        self.kind() == ErrorKind::Runtime
    }
}

impl fmt::Display for HostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostError::ProfileLocked => {
                write!(f, "Cannot change OpenGL profile after window created")
            }
            HostError::AlreadyShown => write!(f, "Window is already shown"),
            HostError::NotShown => write!(f, "Window must be shown before entering the main loop"),

            HostError::Platform(msg) => write!(f, "Cannot initialize windowing system: {msg}"),
            HostError::WindowCreation(msg) => write!(f, "Cannot create window: {msg}"),
            HostError::ContextCreation(msg) => write!(f, "Cannot create OpenGL context: {msg}"),
            HostError::MakeCurrent(msg) => {
                write!(f, "Cannot make OpenGL context current: {msg}")
            }
            HostError::LoaderInit(msg) => write!(f, "OpenGL loader initialization failed: {msg}"),
            HostError::Gl(err) => write!(f, "OpenGL error: {err}"),
            HostError::Present(msg) => write!(f, "Cannot present frame: {msg}"),
        }
    }
}

impl std::error::Error for HostError {}

impl From<GlError> for HostError {
    fn from(err: GlError) -> Self {
        HostError::Gl(err)
    }
}

pub type Result<T> = std::result::Result<T, HostError>;
