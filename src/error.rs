use thiserror::Error;

/// Errors raised while building, updating, or rendering charts.
#[derive(Debug, Error)]
pub enum ChartError {
    /// `update()` or `legend_elements()` called before `draw()`.
    #[error("graph is not drawn yet: call draw() before {operation}()")]
    NotDrawn { operation: &'static str },

    /// A key required by an extraction helper is absent from the process data.
    #[error("process data has no {kind} output named `{key}`")]
    MissingField { kind: &'static str, key: String },

    /// Two sequences that must be aligned have different lengths.
    #[error("{what}: expected {expected} values, got {actual}")]
    LengthMismatch {
        what: String,
        expected: usize,
        actual: usize,
    },

    #[error("color palette has {actual} colors, at least {required} are needed")]
    Palette { required: usize, actual: usize },

    #[error("invalid hex color `{0}`")]
    InvalidColor(String),

    /// Text output was requested but no TrueType font could be registered.
    #[error("no font available for text rendering (set SUSTAIN_CHARTS_FONT)")]
    FontUnavailable,

    #[error("rendering failed: {0}")]
    Render(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ChartError>;

/// Map any plotters drawing error into [`ChartError::Render`].
pub(crate) fn render_err<E: std::fmt::Debug>(e: E) -> ChartError {
    ChartError::Render(format!("{:?}", e))
}
