//! LetterInk Session Library
//!
//! Owns the block store for one letter-composition session and wires the
//! core interaction components to the external collaborators (media picker,
//! sticker registry, submit sink) through trait seams.

pub mod providers;
pub mod session;

pub use providers::{
    MediaError, MediaProvider, PickedImage, StickerRegistry, SubmitError, SubmitSink,
};
pub use session::CompositionSession;
