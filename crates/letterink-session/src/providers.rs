//! External-interface seams: media picking, sticker lookup, submission.
//!
//! The composition engine treats all three as opaque collaborators; they are
//! referenced only through these traits, and their failures surface as typed
//! errors the session turns into user notices.

use letterink_core::Block;
use thiserror::Error;

/// An image chosen from the media library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickedImage {
    /// Asset URI; the core only ever stores this string.
    pub uri: String,
    /// Pixel dimensions, consumed as an aspect ratio.
    pub width: u32,
    pub height: u32,
}

/// Media picker errors. Cancellation is not an error; it is the `Ok(None)`
/// outcome of [`MediaProvider::pick_image`].
#[derive(Debug, Error)]
pub enum MediaError {
    #[error("media library unavailable: {0}")]
    Unavailable(String),
    #[error("media pick failed: {0}")]
    Failed(String),
}

/// Opaque provider returning a URI and dimensions for a user-picked image.
pub trait MediaProvider {
    fn pick_image(&mut self) -> Result<Option<PickedImage>, MediaError>;
}

/// Opaque key→image registry for sticker bitmaps. Total over a small closed
/// key set; the session validates keys through it before creating blocks.
pub trait StickerRegistry {
    /// Renderable image handle type; the session never inspects it.
    type Image;

    fn lookup(&self, key: &str) -> Option<Self::Image>;

    fn contains(&self, key: &str) -> bool {
        self.lookup(key).is_some()
    }
}

/// Submission errors, surfaced to the user; never retried automatically.
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("submission rejected: {0}")]
    Rejected(String),
    #[error("submission transport failed: {0}")]
    Transport(String),
    #[error("document serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Persistence/send sink. The serialized ordered block list is the only
/// output contract; re-loading a submitted list must reproduce the same
/// visual layout.
pub trait SubmitSink {
    fn submit(&mut self, blocks: &[Block]) -> Result<(), SubmitError>;
}
