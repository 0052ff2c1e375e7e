//! Block definitions for the letter document.

mod drawing;
mod image;
mod sticker;
mod text;

pub use drawing::{DrawingBlock, Stroke, StrokeId};
pub use image::ImageBlock;
pub use sticker::{
    DEFAULT_STICKER_POSITION, DEFAULT_STICKER_SIZE, MIN_STICKER_SIZE, StickerBlock,
};
pub use text::TextBlock;

use peniko::Color;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn black() -> Self {
        Self::new(0, 0, 0, 255)
    }
}

impl From<Color> for SerializableColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<SerializableColor> for Color {
    fn from(color: SerializableColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// Unique identifier for blocks.
pub type BlockId = Uuid;

/// Enum wrapper for all block types (insertion order is document order).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Block {
    Text(TextBlock),
    Image(ImageBlock),
    Sticker(StickerBlock),
    Drawing(DrawingBlock),
}

impl Block {
    pub fn id(&self) -> BlockId {
        match self {
            Block::Text(b) => b.id,
            Block::Image(b) => b.id,
            Block::Sticker(b) => b.id,
            Block::Drawing(b) => b.id,
        }
    }

    /// Overlay blocks render in an absolutely-positioned layer above the
    /// base document flow.
    pub fn is_overlay(&self) -> bool {
        matches!(self, Block::Sticker(_) | Block::Drawing(_))
    }

    /// Short name for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Block::Text(_) => "text",
            Block::Image(_) => "image",
            Block::Sticker(_) => "sticker",
            Block::Drawing(_) => "drawing",
        }
    }

    pub fn as_sticker(&self) -> Option<&StickerBlock> {
        match self {
            Block::Sticker(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_drawing(&self) -> Option<&DrawingBlock> {
        match self {
            Block::Drawing(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_drawing_mut(&mut self) -> Option<&mut DrawingBlock> {
        match self {
            Block::Drawing(d) => Some(d),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlay_classification() {
        let text = Block::Text(TextBlock::new(String::new()));
        let sticker = Block::Sticker(StickerBlock::new("heart".to_string()));
        let drawing = Block::Drawing(DrawingBlock::new());

        assert!(!text.is_overlay());
        assert!(sticker.is_overlay());
        assert!(drawing.is_overlay());
    }

    #[test]
    fn test_color_round_trip() {
        let color = SerializableColor::new(12, 34, 56, 200);
        let peniko: Color = color.into();
        let back: SerializableColor = peniko.into();
        assert_eq!(color, back);
    }

    #[test]
    fn test_block_ids_unique() {
        let a = Block::Text(TextBlock::new("a".to_string()));
        let b = Block::Text(TextBlock::new("b".to_string()));
        assert_ne!(a.id(), b.id());
    }
}
