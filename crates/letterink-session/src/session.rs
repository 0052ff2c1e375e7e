//! The composition session: one letter being edited, from first block to
//! submit or discard.

use crate::providers::{MediaError, MediaProvider, StickerRegistry, SubmitError, SubmitSink};
use kurbo::{Point, Vec2};
use letterink_core::{
    Arbiter, Block, BlockId, BlockPatch, BlockStore, DrawingBlock, ImageBlock, InteractionState,
    SerializableColor, StickerBlock, StickerTransform, StrokeBuilder, SurfaceId, SurfaceLayouts,
    TextBlock, Tool, TouchClaim, eraser,
};
use std::collections::HashMap;

/// Default ink thickness for new strokes, in local-space pixels.
const DEFAULT_INK_THICKNESS: f64 = 4.0;

/// Owns the block store for one composition session and routes raw pointer
/// events through the arbiter into the stroke builder, eraser, and sticker
/// transform engines.
///
/// Data flow is unidirectional: overlays see a snapshot of their block and
/// every mutation travels back as a [`BlockPatch`] applied here; no
/// component holds a back-reference to the store.
#[derive(Debug)]
pub struct CompositionSession {
    store: BlockStore,
    arbiter: Arbiter,
    surfaces: SurfaceLayouts,
    builder: StrokeBuilder,
    /// Live transform engine per sticker block.
    transforms: HashMap<BlockId, StickerTransform>,
    /// Drawing surface → owning drawing block.
    drawing_surfaces: HashMap<SurfaceId, BlockId>,
    /// The exclusive canvas gesture currently owning the pointer stream.
    active_gesture: Option<(TouchClaim, SurfaceId)>,
    ink_color: SerializableColor,
    ink_thickness: f64,
}

impl Default for CompositionSession {
    fn default() -> Self {
        Self::new()
    }
}

impl CompositionSession {
    pub fn new() -> Self {
        Self {
            store: BlockStore::new(),
            arbiter: Arbiter::new(),
            surfaces: SurfaceLayouts::new(),
            builder: StrokeBuilder::new(),
            transforms: HashMap::new(),
            drawing_surfaces: HashMap::new(),
            active_gesture: None,
            ink_color: SerializableColor::black(),
            ink_thickness: DEFAULT_INK_THICKNESS,
        }
    }

    pub fn store(&self) -> &BlockStore {
        &self.store
    }

    pub fn state(&self) -> InteractionState {
        self.arbiter.state()
    }

    pub fn set_tool(&mut self, tool: Tool) {
        self.arbiter.set_tool(tool);
    }

    pub fn is_scroll_enabled(&self) -> bool {
        self.arbiter.is_scroll_enabled()
    }

    /// Ink settings captured by the next stroke begin.
    pub fn set_ink(&mut self, color: SerializableColor, thickness: f64) {
        self.ink_color = color;
        self.ink_thickness = thickness;
    }

    // Tool actions --------------------------------------------------------

    /// Add a text block at the end of the document.
    pub fn add_text(&mut self, content: String) -> BlockId {
        let block = TextBlock::new(content);
        let id = block.id;
        self.store.add_block(Block::Text(block));
        id
    }

    /// Pick an image and add it as a block. `Ok(None)` is user
    /// cancellation; on any failure no block is added and the error is
    /// surfaced to the caller as the notice.
    pub fn add_image<P: MediaProvider>(
        &mut self,
        provider: &mut P,
    ) -> Result<Option<BlockId>, MediaError> {
        let Some(picked) = provider.pick_image()? else {
            return Ok(None);
        };
        let block = ImageBlock::from_dimensions(picked.uri, picked.width, picked.height)
            .ok_or_else(|| MediaError::Failed("degenerate image dimensions".to_string()))?;
        let id = block.id;
        self.store.add_block(Block::Image(block));
        Ok(Some(id))
    }

    /// Add a sticker at the default placement. Unknown keys add nothing.
    pub fn add_sticker<R: StickerRegistry>(&mut self, registry: &R, key: &str) -> Option<BlockId> {
        if !registry.contains(key) {
            log::warn!("unknown sticker key {key:?}, nothing added");
            return None;
        }
        let block = StickerBlock::new(key.to_string());
        let id = block.id;
        self.transforms.insert(id, StickerTransform::for_block(&block));
        self.store.add_block(Block::Sticker(block));
        Some(id)
    }

    /// Add a drawing block and mount its surface. The surface maps pointer
    /// samples once its first layout measurement arrives.
    pub fn add_drawing(&mut self) -> (BlockId, SurfaceId) {
        let block = DrawingBlock::new();
        let id = block.id;
        self.store.add_block(Block::Drawing(block));
        let surface = self.surfaces.mount();
        self.drawing_surfaces.insert(surface, id);
        (id, surface)
    }

    /// Delete a block and all interaction state attached to it.
    pub fn delete_block(&mut self, id: BlockId) {
        self.store.remove_block(id);
        self.transforms.remove(&id);
        self.arbiter.block_removed(id);
        let orphaned: Vec<SurfaceId> = self
            .drawing_surfaces
            .iter()
            .filter(|&(_, block)| *block == id)
            .map(|(&surface, _)| surface)
            .collect();
        for surface in orphaned {
            self.unmount_surface(surface);
        }
    }

    // Surfaces ------------------------------------------------------------

    /// Record a surface's measured screen origin (top-left, global space).
    pub fn measure_surface(&mut self, surface: SurfaceId, origin: Point) {
        self.surfaces.record(surface, origin);
    }

    /// A surface left the render tree. Any in-flight gesture on it is
    /// cancelled: transient state is discarded, nothing is committed, and
    /// page scroll is released.
    pub fn unmount_surface(&mut self, surface: SurfaceId) {
        self.surfaces.unmount(surface);
        self.drawing_surfaces.remove(&surface);
        if let Some((_, active)) = self.active_gesture {
            if active == surface {
                self.builder.cancel();
                self.active_gesture = None;
                self.arbiter.end_canvas_gesture();
            }
        }
    }

    // Canvas pointer stream (draw / erase) --------------------------------

    /// A touch landed on the drawing/erase surface. The arbiter decides
    /// ownership: with the draw tool active the stroke builder takes it,
    /// with the erase tool the eraser does, otherwise it passes through to
    /// scroll and selection beneath.
    pub fn canvas_touch_begin(&mut self, surface: SurfaceId, global: Point) -> TouchClaim {
        let claim = self.arbiter.begin_canvas_gesture();
        match claim {
            TouchClaim::Draw => {
                self.builder.begin(self.ink_color, self.ink_thickness);
                if let Some(local) = self.surfaces.to_local(surface, global) {
                    self.builder.push(local);
                }
                self.active_gesture = Some((claim, surface));
            }
            TouchClaim::Erase => {
                self.erase_sample(surface, global);
                self.active_gesture = Some((claim, surface));
            }
            TouchClaim::PassThrough => {}
        }
        claim
    }

    /// A move sample for the active canvas gesture. Samples that cannot be
    /// mapped (surface unmeasured) are dropped silently; the user just sees
    /// a slightly shorter stroke.
    pub fn canvas_touch_move(&mut self, global: Point) {
        match self.active_gesture {
            Some((TouchClaim::Draw, surface)) => {
                if let Some(local) = self.surfaces.to_local(surface, global) {
                    self.builder.push(local);
                }
            }
            Some((TouchClaim::Erase, surface)) => {
                self.erase_sample(surface, global);
            }
            _ => {}
        }
    }

    /// The touch lifted. A drawing gesture with at least one recorded point
    /// finalizes its stroke into the owning block; scroll is re-enabled
    /// unconditionally either way.
    pub fn canvas_touch_end(&mut self) {
        if let Some((claim, surface)) = self.active_gesture.take() {
            if claim == TouchClaim::Draw {
                let finished = self.builder.finish();
                if let (Some(stroke), Some(&block)) =
                    (finished, self.drawing_surfaces.get(&surface))
                {
                    self.store.apply(BlockPatch::AppendStroke { id: block, stroke });
                }
            }
        }
        self.arbiter.end_canvas_gesture();
    }

    /// One erase sample: map to local space and drop every stroke with a
    /// point inside the hit radius, immediately.
    fn erase_sample(&mut self, surface: SurfaceId, global: Point) {
        let Some(local) = self.surfaces.to_local(surface, global) else {
            return;
        };
        let Some(&block_id) = self.drawing_surfaces.get(&surface) else {
            log::debug!("erase sample on surface without drawing block, ignored");
            return;
        };
        let Some(drawing) = self.store.get_block(block_id).and_then(Block::as_drawing) else {
            return;
        };
        let retained = eraser::filter_strokes(drawing.strokes.clone(), local);
        if retained.len() != drawing.strokes.len() {
            self.store.apply(BlockPatch::SetStrokes {
                id: block_id,
                strokes: retained,
            });
        }
    }

    // Selection -----------------------------------------------------------

    /// Tap on a non-overlay block: clears erase mode and selects it. Taps
    /// on overlay blocks are ignored here; stickers select through their
    /// transform recognizers.
    pub fn tap_block(&mut self, id: BlockId) {
        match self.store.get_block(id) {
            Some(block) if !block.is_overlay() => self.arbiter.select_block(id),
            Some(_) => log::debug!("tap on overlay block {id} ignored"),
            None => log::debug!("tap on unknown block {id} ignored"),
        }
    }

    pub fn selected_block(&self) -> Option<BlockId> {
        self.arbiter.selected_block()
    }

    // Sticker transforms --------------------------------------------------

    /// Live transform values for rendering a sticker between commits.
    pub fn sticker_live(&self, id: BlockId) -> Option<&StickerTransform> {
        self.transforms.get(&id)
    }

    pub fn sticker_pan_begin(&mut self, id: BlockId) {
        if let Some(engine) = self.transforms.get_mut(&id) {
            engine.begin_pan();
            self.arbiter.sticker_gesture_started(id);
        }
    }

    pub fn sticker_pan_update(&mut self, id: BlockId, total_delta: Vec2) {
        if let Some(engine) = self.transforms.get_mut(&id) {
            engine.update_pan(total_delta);
        }
    }

    pub fn sticker_pan_end(&mut self, id: BlockId) {
        if let Some(patch) = self.transforms.get_mut(&id).and_then(StickerTransform::end_pan) {
            self.store.apply(patch);
        }
    }

    pub fn sticker_pinch_begin(&mut self, id: BlockId) {
        if let Some(engine) = self.transforms.get_mut(&id) {
            engine.begin_pinch();
            self.arbiter.sticker_gesture_started(id);
        }
    }

    pub fn sticker_pinch_update(&mut self, id: BlockId, factor: f64) {
        if let Some(engine) = self.transforms.get_mut(&id) {
            engine.update_pinch(factor);
        }
    }

    pub fn sticker_pinch_end(&mut self, id: BlockId) {
        if let Some(patch) = self.transforms.get_mut(&id).and_then(StickerTransform::end_pinch) {
            self.store.apply(patch);
        }
    }

    pub fn sticker_rotate_begin(&mut self, id: BlockId) {
        if let Some(engine) = self.transforms.get_mut(&id) {
            engine.begin_rotate();
            self.arbiter.sticker_gesture_started(id);
        }
    }

    pub fn sticker_rotate_update(&mut self, id: BlockId, delta: f64) {
        if let Some(engine) = self.transforms.get_mut(&id) {
            engine.update_rotate(delta);
        }
    }

    pub fn sticker_rotate_end(&mut self, id: BlockId) {
        if let Some(patch) = self.transforms.get_mut(&id).and_then(StickerTransform::end_rotate)
        {
            self.store.apply(patch);
        }
    }

    // Handoff -------------------------------------------------------------

    /// Hand the whole ordered block list to the sink. On failure the
    /// document is kept untouched; re-submission is an explicit user
    /// action, never automatic.
    pub fn submit<S: SubmitSink>(&mut self, sink: &mut S) -> Result<(), SubmitError> {
        sink.submit(self.store.blocks())
    }

    /// Serialize the current document (the sink-facing contract).
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        self.store.to_json()
    }

    /// Abandon the document. Nothing is committed anywhere.
    pub fn discard(self) {
        log::debug!("composition session discarded with {} blocks", self.store.len());
    }
}
