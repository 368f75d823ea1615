use crate::codec::CodecError;

/// Errors that abort a stage and surface to the transport's redelivery
/// policy.
///
/// Store and email failures never appear here: those are degraded effects,
/// caught inside the stage and reported only through the outcome flags.
#[derive(Debug, thiserror::Error)]
pub enum StageError {
    #[error("malformed queue message: {0}")]
    Malformed(#[from] CodecError),

    #[error("downstream enqueue failed: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),
}
