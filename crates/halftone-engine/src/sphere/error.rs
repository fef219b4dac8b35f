use std::fmt;

/// Shader pipeline stage.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ShaderStage::Vertex => "vertex",
            ShaderStage::Fragment => "fragment",
        })
    }
}

/// Setup-time failure of a sphere instance.
///
/// All variants are terminal for the current mount: they are logged, the
/// instance parks in `Failed`, and the surface stays blank.
#[derive(Debug, Clone, PartialEq)]
pub enum SetupError {
    /// The device cannot provide the drawing target the renderer needs.
    UnsupportedEnvironment(String),
    /// A shader stage failed to parse or validate.
    Compile { stage: ShaderStage, message: String },
    /// Compiled stages do not fit together into one program.
    Link(String),
}

impl SetupError {
    pub fn unsupported(msg: impl Into<String>) -> Self {
        Self::UnsupportedEnvironment(msg.into())
    }

    pub fn compile(stage: ShaderStage, msg: impl Into<String>) -> Self {
        Self::Compile { stage, message: msg.into() }
    }

    pub fn link(msg: impl Into<String>) -> Self {
        Self::Link(msg.into())
    }
}

impl fmt::Display for SetupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SetupError::UnsupportedEnvironment(msg) => write!(f, "unsupported environment: {msg}"),
            SetupError::Compile { stage, message } => {
                write!(f, "{stage} shader compile error: {message}")
            }
            SetupError::Link(msg) => write!(f, "program link error: {msg}"),
        }
    }
}

impl std::error::Error for SetupError {}
