//////////////////////////////////////////////////
// Errors

/// Everything that can stop the render loop.
#[derive(Debug, thiserror::Error)]
pub enum SquareError {
    #[error("Event loop failed: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    #[error("Failed to create window: {0}")]
    Window(#[from] winit::error::OsError),
    #[error("Failed to build GL display: {0}")]
    Display(String),
    #[error("Display builder did not create a window")]
    MissingWindow,
    #[error("OpenGL context is not available")]
    MissingContext,
    #[error("OpenGL error: {0}")]
    Gl(#[from] glutin::error::Error),
    #[error("Failed to get window handle: {0}")]
    Handle(#[from] raw_window_handle::HandleError),
    #[error("Invalid value {value:?} for {key}")]
    InvalidEnv { key: &'static str, value: String },
}

pub type Result<T> = std::result::Result<T, SquareError>;
