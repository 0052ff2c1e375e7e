//! LetterInk Core Library
//!
//! Platform-agnostic data model and interaction logic for the LetterInk
//! letter-composition engine: blocks, the patchable block store, coordinate
//! mapping, stroke capture, erasing, sticker transforms, and the
//! interaction-mode arbiter.

pub mod arbiter;
pub mod blocks;
pub mod eraser;
pub mod store;
pub mod stroke;
pub mod surface;
pub mod transform;

pub use arbiter::{Arbiter, InteractionState, Tool, TouchClaim};
pub use blocks::{
    Block, BlockId, DrawingBlock, ImageBlock, SerializableColor, StickerBlock, Stroke, StrokeId,
    TextBlock,
};
pub use eraser::{ERASE_HIT_RADIUS, erase_at, filter_strokes};
pub use store::{BlockPatch, BlockStore};
pub use stroke::StrokeBuilder;
pub use surface::{SurfaceId, SurfaceLayouts};
pub use transform::StickerTransform;
