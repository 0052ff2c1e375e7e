//! Image block referencing a picked media asset.

use super::BlockId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An inline image, referenced by URI. The asset itself lives with the media
/// provider; the document only needs the URI and the aspect ratio to lay the
/// image out.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageBlock {
    pub id: BlockId,
    /// Asset URI as returned by the media provider.
    pub uri: String,
    /// Width divided by height, always positive.
    pub aspect_ratio: f64,
}

impl ImageBlock {
    pub fn new(uri: String, aspect_ratio: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            uri,
            aspect_ratio,
        }
    }

    /// Build from picked pixel dimensions. Returns `None` for degenerate
    /// dimensions that would yield a non-positive aspect ratio.
    pub fn from_dimensions(uri: String, width: u32, height: u32) -> Option<Self> {
        if width == 0 || height == 0 {
            return None;
        }
        Some(Self::new(uri, width as f64 / height as f64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aspect_ratio_from_dimensions() {
        let image = ImageBlock::from_dimensions("file://a.png".to_string(), 1600, 900).unwrap();
        assert!((image.aspect_ratio - 16.0 / 9.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_degenerate_dimensions_rejected() {
        assert!(ImageBlock::from_dimensions("file://a.png".to_string(), 0, 900).is_none());
        assert!(ImageBlock::from_dimensions("file://a.png".to_string(), 1600, 0).is_none());
    }
}
