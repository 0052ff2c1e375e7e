//! Sticker block: a decorative overlay object with a free transform.

use super::BlockId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default top-left position for a freshly placed sticker.
pub const DEFAULT_STICKER_POSITION: (f64, f64) = (140.0, 140.0);
/// Default edge length for a freshly placed sticker, in layout units.
pub const DEFAULT_STICKER_SIZE: f64 = 120.0;
/// Smallest committable sticker edge length. Commits clamp to this so a
/// pinch can never produce a degenerate zero-area sticker.
pub const MIN_STICKER_SIZE: f64 = 24.0;

/// A manipulable sticker overlay.
///
/// Transform fields are always finite; `size` is at least
/// [`MIN_STICKER_SIZE`]. Both are enforced at patch application.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StickerBlock {
    pub id: BlockId,
    /// Key into the sticker registry (opaque, small closed set).
    pub key: String,
    /// Edge length in layout units.
    pub size: f64,
    /// Top-left-relative position.
    pub x: f64,
    pub y: f64,
    /// Rotation in radians.
    pub rotation: f64,
}

impl StickerBlock {
    /// Create a sticker at the default placement.
    pub fn new(key: String) -> Self {
        let (x, y) = DEFAULT_STICKER_POSITION;
        Self {
            id: Uuid::new_v4(),
            key,
            size: DEFAULT_STICKER_SIZE,
            x,
            y,
            rotation: 0.0,
        }
    }

    /// Clamp a candidate size to the committable range.
    pub fn clamp_size(size: f64) -> f64 {
        size.max(MIN_STICKER_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_placement() {
        let sticker = StickerBlock::new("star".to_string());
        assert_eq!((sticker.x, sticker.y), DEFAULT_STICKER_POSITION);
        assert_eq!(sticker.size, DEFAULT_STICKER_SIZE);
        assert_eq!(sticker.rotation, 0.0);
    }

    #[test]
    fn test_size_clamp() {
        assert_eq!(StickerBlock::clamp_size(1.0), MIN_STICKER_SIZE);
        assert_eq!(StickerBlock::clamp_size(200.0), 200.0);
    }
}
