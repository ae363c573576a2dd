use thiserror::Error;

/// Failures the surface can run into. None of them are fatal to the host
/// page: callers degrade to a static fallback or skip a frame.
#[derive(Debug, Error)]
pub enum BallError {
    #[error("graphics context unavailable: {0}")]
    GraphicsContext(String),
    #[error("texture canvas unavailable: {0}")]
    TextureCanvas(String),
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{field} must be a positive duration, got {value}")]
    Duration { field: &'static str, value: f64 },
    #[error("{field} must be a positive rate, got {value}")]
    Rate { field: &'static str, value: f32 },
    #[error("texture size for {field} must be non-zero")]
    TextureSize { field: &'static str },
    #[error("max prompt lines must be at least 1")]
    PromptLines,
    #[error("visibility epsilon must lie in (0, 0.5), got {0}")]
    VisibilityEpsilon(f32),
    #[error("device pixel ratio cap must be positive, got {0}")]
    PixelRatio(f64),
    #[error("cue progress must lie in [0, 1], got {0}")]
    CueProgress(f32),
}
