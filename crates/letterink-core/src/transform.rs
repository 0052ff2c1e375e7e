//! Per-sticker continuous transform state driven by composed gestures.

use crate::blocks::{BlockId, StickerBlock};
use crate::store::BlockPatch;
use kurbo::Vec2;

/// Live transform state for one sticker block.
///
/// Three recognizers (pan, pinch, rotate) compose simultaneously: each takes
/// its own reference snapshot at its own gesture start and drives one axis of
/// the shared continuous state, so a user may pinch while dragging while
/// rotating. The continuous values feed per-frame rendering; the document is
/// only written at gesture end, when the finished axis is committed as a
/// [`BlockPatch::Sticker`] touching that axis's fields alone. The two tiers
/// (ephemeral high-frequency, committed low-frequency) are deliberate and
/// must not be collapsed into per-frame store writes.
#[derive(Debug, Clone)]
pub struct StickerTransform {
    block_id: BlockId,
    /// Edge length the scale multiplier is relative to.
    base_size: f64,
    /// Continuous translation (block-relative x/y).
    translation: Vec2,
    /// Continuous unitless scale multiplier of `base_size`.
    scale: f64,
    /// Continuous rotation in radians.
    rotation: f64,
    /// Reference snapshots, present only while that recognizer is live.
    pan_reference: Option<Vec2>,
    pinch_reference: Option<f64>,
    rotate_reference: Option<f64>,
}

impl StickerTransform {
    /// Create an engine seeded from the block's committed transform.
    pub fn for_block(block: &StickerBlock) -> Self {
        Self {
            block_id: block.id,
            base_size: block.size,
            translation: Vec2::new(block.x, block.y),
            scale: 1.0,
            rotation: block.rotation,
            pan_reference: None,
            pinch_reference: None,
            rotate_reference: None,
        }
    }

    pub fn block_id(&self) -> BlockId {
        self.block_id
    }

    /// Current translation for rendering.
    pub fn translation(&self) -> Vec2 {
        self.translation
    }

    /// Current edge length for rendering.
    pub fn size(&self) -> f64 {
        StickerBlock::clamp_size(self.base_size * self.scale)
    }

    /// Current rotation for rendering, in radians.
    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    pub fn is_gesturing(&self) -> bool {
        self.pan_reference.is_some()
            || self.pinch_reference.is_some()
            || self.rotate_reference.is_some()
    }

    // Pan -----------------------------------------------------------------

    /// Snapshot the current translation as the pan's reference origin.
    pub fn begin_pan(&mut self) {
        self.pan_reference = Some(self.translation);
    }

    /// New translation = reference + cumulative drag delta. Update before
    /// begin, or a non-finite delta, is a no-op.
    pub fn update_pan(&mut self, total_delta: Vec2) {
        let Some(reference) = self.pan_reference else {
            log::warn!("pan update before begin on {}, ignored", self.block_id);
            return;
        };
        if !total_delta.x.is_finite() || !total_delta.y.is_finite() {
            log::warn!("non-finite pan delta on {}, ignored", self.block_id);
            return;
        }
        self.translation = reference + total_delta;
    }

    /// End the pan and commit the translation axis.
    pub fn end_pan(&mut self) -> Option<BlockPatch> {
        self.pan_reference.take()?;
        Some(BlockPatch::Sticker {
            id: self.block_id,
            size: None,
            x: Some(self.translation.x),
            y: Some(self.translation.y),
            rotation: None,
        })
    }

    // Pinch ---------------------------------------------------------------

    /// Snapshot the current scale as the pinch's reference.
    pub fn begin_pinch(&mut self) {
        self.pinch_reference = Some(self.scale);
    }

    /// New scale = reference × cumulative gesture factor.
    pub fn update_pinch(&mut self, factor: f64) {
        let Some(reference) = self.pinch_reference else {
            log::warn!("pinch update before begin on {}, ignored", self.block_id);
            return;
        };
        if !factor.is_finite() || factor <= 0.0 {
            log::warn!("invalid pinch factor {factor} on {}, ignored", self.block_id);
            return;
        }
        self.scale = reference * factor;
    }

    /// End the pinch and commit `size = base_size × scale` (clamped).
    pub fn end_pinch(&mut self) -> Option<BlockPatch> {
        self.pinch_reference.take()?;
        Some(BlockPatch::Sticker {
            id: self.block_id,
            size: Some(self.base_size * self.scale),
            x: None,
            y: None,
            rotation: None,
        })
    }

    // Rotate --------------------------------------------------------------

    /// Snapshot the current rotation as the rotate's reference.
    pub fn begin_rotate(&mut self) {
        self.rotate_reference = Some(self.rotation);
    }

    /// New rotation = reference + cumulative gesture delta, in radians.
    pub fn update_rotate(&mut self, delta: f64) {
        let Some(reference) = self.rotate_reference else {
            log::warn!("rotate update before begin on {}, ignored", self.block_id);
            return;
        };
        if !delta.is_finite() {
            log::warn!("non-finite rotate delta on {}, ignored", self.block_id);
            return;
        }
        self.rotation = reference + delta;
    }

    /// End the rotate and commit the rotation axis.
    pub fn end_rotate(&mut self) -> Option<BlockPatch> {
        self.rotate_reference.take()?;
        Some(BlockPatch::Sticker {
            id: self.block_id,
            size: None,
            x: None,
            y: None,
            rotation: Some(self.rotation),
        })
    }

    /// External cancellation (surface unmount mid-gesture): drop reference
    /// snapshots and roll live state back to the last committed values, so
    /// no partial transform reaches the document.
    pub fn cancel(&mut self) {
        if let Some(reference) = self.pan_reference.take() {
            self.translation = reference;
        }
        if let Some(reference) = self.pinch_reference.take() {
            self.scale = reference;
        }
        if let Some(reference) = self.rotate_reference.take() {
            self.rotation = reference;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blocks::{Block, MIN_STICKER_SIZE};
    use crate::store::BlockStore;

    fn sticker() -> StickerBlock {
        StickerBlock::new("star".to_string())
    }

    fn store_with(sticker: StickerBlock) -> BlockStore {
        let mut store = BlockStore::new();
        store.add_block(Block::Sticker(sticker));
        store
    }

    #[test]
    fn test_pan_commits_translated_position() {
        let block = sticker();
        let mut store = store_with(block.clone());
        let mut engine = StickerTransform::for_block(&block);

        engine.begin_pan();
        engine.update_pan(Vec2::new(30.0, -10.0));
        store.apply(engine.end_pan().unwrap());

        let committed = store.get_block(block.id).unwrap().as_sticker().unwrap();
        assert_eq!(committed.x, block.x + 30.0);
        assert_eq!(committed.y, block.y - 10.0);
        assert_eq!(committed.size, block.size);
        assert_eq!(committed.rotation, block.rotation);
    }

    #[test]
    fn test_pinch_commits_scaled_size() {
        let block = sticker();
        let mut store = store_with(block.clone());
        let mut engine = StickerTransform::for_block(&block);

        engine.begin_pinch();
        engine.update_pinch(1.5);
        store.apply(engine.end_pinch().unwrap());

        let committed = store.get_block(block.id).unwrap().as_sticker().unwrap();
        assert_eq!(committed.size, block.size * 1.5);
    }

    #[test]
    fn test_rotate_commits_accumulated_angle() {
        let block = sticker();
        let mut store = store_with(block.clone());
        let mut engine = StickerTransform::for_block(&block);

        engine.begin_rotate();
        engine.update_rotate(0.2);
        store.apply(engine.end_rotate().unwrap());

        let committed = store.get_block(block.id).unwrap().as_sticker().unwrap();
        assert!((committed.rotation - 0.2).abs() < f64::EPSILON);
    }

    #[test]
    fn test_simultaneous_gestures_commit_disjoint_axes() {
        let block = sticker();
        let mut store = store_with(block.clone());
        let mut engine = StickerTransform::for_block(&block);

        // All three live at once, each from its own reference snapshot.
        engine.begin_pan();
        engine.begin_pinch();
        engine.begin_rotate();
        engine.update_pan(Vec2::new(30.0, -10.0));
        engine.update_pinch(1.5);
        engine.update_rotate(0.2);

        // Commit order must not matter: each patch writes one axis.
        store.apply(engine.end_rotate().unwrap());
        store.apply(engine.end_pan().unwrap());
        store.apply(engine.end_pinch().unwrap());

        let committed = store.get_block(block.id).unwrap().as_sticker().unwrap();
        assert_eq!(committed.x, 170.0);
        assert_eq!(committed.y, 130.0);
        assert_eq!(committed.size, 180.0);
        assert!((committed.rotation - 0.2).abs() < f64::EPSILON);
    }

    #[test]
    fn test_cumulative_updates_replace_not_accumulate() {
        let block = sticker();
        let mut engine = StickerTransform::for_block(&block);

        engine.begin_pan();
        engine.update_pan(Vec2::new(10.0, 0.0));
        engine.update_pan(Vec2::new(25.0, 5.0));

        // Deltas are cumulative from gesture start, not incremental.
        assert_eq!(engine.translation(), Vec2::new(block.x + 25.0, block.y + 5.0));
    }

    #[test]
    fn test_update_before_begin_is_noop() {
        let block = sticker();
        let mut engine = StickerTransform::for_block(&block);

        engine.update_pan(Vec2::new(100.0, 100.0));
        engine.update_pinch(3.0);
        engine.update_rotate(1.0);

        assert_eq!(engine.translation(), Vec2::new(block.x, block.y));
        assert_eq!(engine.size(), block.size);
        assert_eq!(engine.rotation(), block.rotation);
    }

    #[test]
    fn test_end_without_begin_commits_nothing() {
        let block = sticker();
        let mut engine = StickerTransform::for_block(&block);
        assert!(engine.end_pan().is_none());
        assert!(engine.end_pinch().is_none());
        assert!(engine.end_rotate().is_none());
    }

    #[test]
    fn test_cancel_rolls_back_live_state() {
        let block = sticker();
        let mut engine = StickerTransform::for_block(&block);

        engine.begin_pan();
        engine.begin_pinch();
        engine.update_pan(Vec2::new(50.0, 50.0));
        engine.update_pinch(2.0);
        engine.cancel();

        assert!(!engine.is_gesturing());
        assert_eq!(engine.translation(), Vec2::new(block.x, block.y));
        assert_eq!(engine.size(), block.size);
        assert!(engine.end_pan().is_none());
    }

    #[test]
    fn test_pinch_commit_clamps_minimum_size() {
        let block = sticker();
        let mut store = store_with(block.clone());
        let mut engine = StickerTransform::for_block(&block);

        engine.begin_pinch();
        engine.update_pinch(0.01);
        store.apply(engine.end_pinch().unwrap());

        let committed = store.get_block(block.id).unwrap().as_sticker().unwrap();
        assert_eq!(committed.size, MIN_STICKER_SIZE);
    }

    #[test]
    fn test_sequential_pinches_compose_from_live_scale() {
        let block = sticker();
        let mut engine = StickerTransform::for_block(&block);

        engine.begin_pinch();
        engine.update_pinch(2.0);
        engine.end_pinch();

        // Second pinch references the scale left by the first.
        engine.begin_pinch();
        engine.update_pinch(0.5);
        engine.end_pinch();

        assert_eq!(engine.size(), block.size);
    }
}
