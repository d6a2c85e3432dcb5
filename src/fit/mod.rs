//! FIT codec boundary.
//!
//! Decoding is delegated to `fitparser`; encoding uses the writer in
//! [`writer`]. Both sides exchange the typed messages in [`messages`].

pub mod decoder;
pub mod messages;
pub mod writer;

pub use decoder::decode;
pub use messages::{
    FileIdMessage, FileKind, FitFile, FitMessage, WorkoutMessage, WorkoutStepMessage,
};
pub use writer::encode;

use thiserror::Error;

/// Errors raised by the FIT codec.
#[derive(Debug, Error)]
pub enum CodecError {
    /// Malformed or unsupported FIT input
    #[error("Failed to decode FIT data: {0}")]
    Decode(String),

    /// Message sequence could not be written
    #[error("Failed to encode FIT data: {0}")]
    Encode(String),
}
