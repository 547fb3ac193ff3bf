use thiserror::Error;

/// Failure reported by the external rendering/volume engine.
///
/// The engine is a black box here, so the payload is its own message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("render engine failure: {0}")]
pub struct EngineError(pub String);

impl EngineError {
    pub fn new(msg: impl Into<String>) -> EngineError {
        EngineError(msg.into())
    }
}

/// Unknown name received from UI glue for one of the closed enumerations.
///
/// The enumerations themselves make invalid states unrepresentable; this only
/// exists at the `FromStr` boundary where names arrive as text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {what} name: '{name}'")]
pub struct UnknownName {
    pub what: &'static str,
    pub name: String,
}

impl UnknownName {
    pub fn new(what: &'static str, name: impl Into<String>) -> UnknownName {
        UnknownName {
            what,
            name: name.into(),
        }
    }
}

/// Errors from transfer function edits.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum TransferError {
    /// Window width must be positive to define an opacity ramp.
    #[error("window width must be positive, got {0}")]
    NonPositiveWindowWidth(f32),
}

/// Errors from volume construction.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum VolumeError {
    #[error("a volume needs at least 2 slices, got {0}")]
    TooFewSlices(usize),
    #[error("slice {0} has an empty image reference")]
    EmptySlice(usize),
    #[error("volume build ended without a result")]
    BuildAbandoned,
    #[error(transparent)]
    Engine(#[from] EngineError),
}

/// Errors surfaced by [`crate::Viewer`] operations.
///
/// Operations that recover locally (camera moves with no volume bound, unknown
/// names from UI glue) log a warning and return nothing instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ViewerError {
    #[error("viewer is not initialized")]
    NotInitialized,
    #[error("no volume is bound")]
    NoVolumeBound,
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("a volume load is already in flight")]
    LoadInFlight,
    #[error(transparent)]
    Engine(#[from] EngineError),
    #[error(transparent)]
    Volume(#[from] VolumeError),
}

impl From<TransferError> for ViewerError {
    fn from(e: TransferError) -> ViewerError {
        ViewerError::InvalidArgument(e.to_string())
    }
}
