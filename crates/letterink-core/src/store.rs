//! Block store: the ordered, mutable document and its patch language.

use crate::blocks::{Block, BlockId, StickerBlock, Stroke};
use serde::{Deserialize, Serialize};

/// An explicit, per-block-type mutation. Patches are matched by id and
/// checked against the block's type before application; a patch that finds
/// no matching block, or the wrong block type, is a logged no-op: a stale
/// callback firing after a delete must never crash the session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum BlockPatch {
    /// Replace a text block's content.
    Text { id: BlockId, content: String },
    /// Update an image block's asset fields.
    Image {
        id: BlockId,
        uri: Option<String>,
        aspect_ratio: Option<f64>,
    },
    /// Update a sticker's transform. Each recognizer commits only its own
    /// axis, so every field is optional.
    Sticker {
        id: BlockId,
        size: Option<f64>,
        x: Option<f64>,
        y: Option<f64>,
        rotation: Option<f64>,
    },
    /// Append a finalized stroke to a drawing block.
    AppendStroke { id: BlockId, stroke: Stroke },
    /// Replace a drawing block's stroke list (erase result).
    SetStrokes { id: BlockId, strokes: Vec<Stroke> },
}

impl BlockPatch {
    /// The id of the block this patch targets.
    pub fn target(&self) -> BlockId {
        match self {
            BlockPatch::Text { id, .. }
            | BlockPatch::Image { id, .. }
            | BlockPatch::Sticker { id, .. }
            | BlockPatch::AppendStroke { id, .. }
            | BlockPatch::SetStrokes { id, .. } => *id,
        }
    }
}

/// The ordered collection of document blocks.
///
/// Insertion order is the z-order and the read order for non-overlay
/// blocks. Overlay blocks are layered in a fixed category order (all
/// stickers beneath all drawings) regardless of creation order; see
/// [`BlockStore::overlays_ordered`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockStore {
    blocks: Vec<Block>,
}

impl BlockStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a block (insertion order is document order).
    pub fn add_block(&mut self, block: Block) {
        self.blocks.push(block);
    }

    /// Remove a block by id.
    pub fn remove_block(&mut self, id: BlockId) -> Option<Block> {
        let pos = self.blocks.iter().position(|b| b.id() == id)?;
        Some(self.blocks.remove(pos))
    }

    /// Clear all blocks.
    pub fn clear(&mut self) {
        self.blocks.clear();
    }

    pub fn get_block(&self, id: BlockId) -> Option<&Block> {
        self.blocks.iter().find(|b| b.id() == id)
    }

    pub fn get_block_mut(&mut self, id: BlockId) -> Option<&mut Block> {
        self.blocks.iter_mut().find(|b| b.id() == id)
    }

    /// All blocks in insertion order (the serialization contract).
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Non-overlay blocks in read order.
    pub fn base_ordered(&self) -> impl Iterator<Item = &Block> {
        self.blocks.iter().filter(|b| !b.is_overlay())
    }

    /// Overlay blocks in render order: all stickers first, then all
    /// drawings, each group in insertion order.
    pub fn overlays_ordered(&self) -> impl Iterator<Item = &Block> {
        let stickers = self
            .blocks
            .iter()
            .filter(|b| matches!(b, Block::Sticker(_)));
        let drawings = self
            .blocks
            .iter()
            .filter(|b| matches!(b, Block::Drawing(_)));
        stickers.chain(drawings)
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Apply a patch. Unmatched ids and type mismatches are logged no-ops.
    pub fn apply(&mut self, patch: BlockPatch) {
        let target = patch.target();
        let Some(block) = self.get_block_mut(target) else {
            log::debug!("patch for unknown block {target} ignored");
            return;
        };

        match (patch, block) {
            (BlockPatch::Text { content, .. }, Block::Text(text)) => {
                text.content = content;
            }
            (BlockPatch::Image { uri, aspect_ratio, .. }, Block::Image(image)) => {
                if let Some(uri) = uri {
                    image.uri = uri;
                }
                if let Some(ratio) = aspect_ratio {
                    if ratio.is_finite() && ratio > 0.0 {
                        image.aspect_ratio = ratio;
                    } else {
                        log::warn!("non-positive aspect ratio {ratio} for {target} ignored");
                    }
                }
            }
            (BlockPatch::Sticker { size, x, y, rotation, .. }, Block::Sticker(sticker)) => {
                apply_sticker_fields(sticker, size, x, y, rotation);
            }
            (BlockPatch::AppendStroke { stroke, .. }, Block::Drawing(drawing)) => {
                drawing.append_stroke(stroke);
            }
            (BlockPatch::SetStrokes { strokes, .. }, Block::Drawing(drawing)) => {
                drawing.strokes = strokes;
            }
            (patch, block) => {
                log::warn!(
                    "patch {patch:?} does not match {} block {target}, ignored",
                    block.kind()
                );
            }
        }
    }

    /// Serialize the ordered block list to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserialize a block list from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Apply optional sticker transform fields, rejecting non-finite values and
/// clamping size so the "always finite, never degenerate" invariant holds.
fn apply_sticker_fields(
    sticker: &mut StickerBlock,
    size: Option<f64>,
    x: Option<f64>,
    y: Option<f64>,
    rotation: Option<f64>,
) {
    let mut set = |field: &mut f64, value: Option<f64>, name: &str| {
        let Some(value) = value else { return };
        if value.is_finite() {
            *field = value;
        } else {
            log::warn!("non-finite sticker {name} {value} ignored");
        }
    };
    set(&mut sticker.x, x, "x");
    set(&mut sticker.y, y, "y");
    set(&mut sticker.rotation, rotation, "rotation");
    set(&mut sticker.size, size.map(StickerBlock::clamp_size), "size");
}
