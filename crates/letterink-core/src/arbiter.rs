//! Interaction arbiter: decides which tool or layer owns a pointer stream.

use crate::blocks::BlockId;
use serde::{Deserialize, Serialize};

/// The active composition tool. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Tool {
    #[default]
    None,
    Image,
    Text,
    Sticker,
    Draw,
    Erase,
}

/// Who receives a new touch on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchClaim {
    /// The drawing surface claims the touch (stroke capture).
    Draw,
    /// The erase surface claims the touch (hit-testing on move samples).
    Erase,
    /// The touch passes through to whatever is beneath it: page scroll or
    /// block selection taps.
    PassThrough,
}

/// Explicit interaction state value. Components read and write it only
/// through the [`Arbiter`]; there is no ambient tool-mode global.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InteractionState {
    pub active_tool: Tool,
    pub selected_block: Option<BlockId>,
    pub scroll_enabled: bool,
}

/// Arbitrates pointer-stream ownership between page scrolling, drawing,
/// erasing, selection taps, and sticker transforms.
#[derive(Debug, Clone)]
pub struct Arbiter {
    state: InteractionState,
    /// True while an exclusive draw/erase gesture owns the pointer stream.
    canvas_gesture_active: bool,
}

impl Default for Arbiter {
    fn default() -> Self {
        Self {
            state: InteractionState {
                active_tool: Tool::None,
                selected_block: None,
                scroll_enabled: true,
            },
            canvas_gesture_active: false,
        }
    }
}

impl Arbiter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> InteractionState {
        self.state
    }

    pub fn active_tool(&self) -> Tool {
        self.state.active_tool
    }

    pub fn selected_block(&self) -> Option<BlockId> {
        self.state.selected_block
    }

    pub fn is_scroll_enabled(&self) -> bool {
        self.state.scroll_enabled
    }

    /// Switch tools. Mutually exclusive: activating any tool clears the
    /// previous one, so an erase flag never survives a tool switch.
    pub fn set_tool(&mut self, tool: Tool) {
        self.state.active_tool = tool;
    }

    /// Decide who receives a new touch under the current tool mode.
    pub fn claim_touch(&self) -> TouchClaim {
        match self.state.active_tool {
            Tool::Draw => TouchClaim::Draw,
            Tool::Erase => TouchClaim::Erase,
            _ => TouchClaim::PassThrough,
        }
    }

    /// Start an exclusive draw/erase gesture: page scroll is suspended for
    /// the gesture's duration. Returns the claim, or `PassThrough` without
    /// touching scroll if the current tool claims nothing.
    pub fn begin_canvas_gesture(&mut self) -> TouchClaim {
        let claim = self.claim_touch();
        if claim != TouchClaim::PassThrough {
            self.canvas_gesture_active = true;
            self.state.scroll_enabled = false;
        }
        claim
    }

    /// End the exclusive gesture. Scroll is re-enabled unconditionally,
    /// whether or not any stroke or erase action actually occurred.
    pub fn end_canvas_gesture(&mut self) {
        self.canvas_gesture_active = false;
        self.state.scroll_enabled = true;
    }

    pub fn is_canvas_gesture_active(&self) -> bool {
        self.canvas_gesture_active
    }

    /// A sticker transform recognizer started: select that sticker. Scroll
    /// state is deliberately left alone; transform gestures coexist with
    /// whatever scroll state the surrounding tool mode set.
    pub fn sticker_gesture_started(&mut self, id: BlockId) {
        self.state.selected_block = Some(id);
    }

    /// Tap on a non-overlay block: clears erase mode and selects it.
    pub fn select_block(&mut self, id: BlockId) {
        if self.state.active_tool == Tool::Erase {
            self.state.active_tool = Tool::None;
        }
        self.state.selected_block = Some(id);
    }

    pub fn clear_selection(&mut self) {
        self.state.selected_block = None;
    }

    /// A block left the document; drop any stale selection of it.
    pub fn block_removed(&mut self, id: BlockId) {
        if self.state.selected_block == Some(id) {
            self.state.selected_block = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_claims_follow_active_tool() {
        let mut arbiter = Arbiter::new();
        assert_eq!(arbiter.claim_touch(), TouchClaim::PassThrough);

        arbiter.set_tool(Tool::Draw);
        assert_eq!(arbiter.claim_touch(), TouchClaim::Draw);

        arbiter.set_tool(Tool::Erase);
        assert_eq!(arbiter.claim_touch(), TouchClaim::Erase);

        arbiter.set_tool(Tool::Sticker);
        assert_eq!(arbiter.claim_touch(), TouchClaim::PassThrough);
    }

    #[test]
    fn test_draw_gesture_suspends_scroll() {
        let mut arbiter = Arbiter::new();
        arbiter.set_tool(Tool::Draw);
        assert!(arbiter.is_scroll_enabled());

        assert_eq!(arbiter.begin_canvas_gesture(), TouchClaim::Draw);
        assert!(!arbiter.is_scroll_enabled());
        assert!(arbiter.is_canvas_gesture_active());

        arbiter.end_canvas_gesture();
        assert!(arbiter.is_scroll_enabled());
    }

    #[test]
    fn test_scroll_reenabled_even_without_action() {
        let mut arbiter = Arbiter::new();
        arbiter.set_tool(Tool::Erase);

        // Gesture that erases nothing still restores scroll at the end.
        arbiter.begin_canvas_gesture();
        arbiter.end_canvas_gesture();
        assert!(arbiter.is_scroll_enabled());
    }

    #[test]
    fn test_passthrough_gesture_leaves_scroll_alone() {
        let mut arbiter = Arbiter::new();
        assert_eq!(arbiter.begin_canvas_gesture(), TouchClaim::PassThrough);
        assert!(arbiter.is_scroll_enabled());
        assert!(!arbiter.is_canvas_gesture_active());
    }

    #[test]
    fn test_tool_switch_clears_erase() {
        let mut arbiter = Arbiter::new();
        arbiter.set_tool(Tool::Erase);
        arbiter.set_tool(Tool::Text);
        assert_eq!(arbiter.active_tool(), Tool::Text);
    }

    #[test]
    fn test_select_block_clears_erase_mode() {
        let mut arbiter = Arbiter::new();
        arbiter.set_tool(Tool::Erase);

        let id = Uuid::new_v4();
        arbiter.select_block(id);

        assert_eq!(arbiter.selected_block(), Some(id));
        assert_eq!(arbiter.active_tool(), Tool::None);
    }

    #[test]
    fn test_exactly_one_selection() {
        let mut arbiter = Arbiter::new();
        assert!(arbiter.selected_block().is_none());

        let first = Uuid::new_v4();
        let second = Uuid::new_v4();
        arbiter.select_block(first);
        arbiter.sticker_gesture_started(second);

        // The newest selection replaces the old; never two at once.
        assert_eq!(arbiter.selected_block(), Some(second));
    }

    #[test]
    fn test_sticker_gesture_keeps_scroll_state() {
        let mut arbiter = Arbiter::new();
        arbiter.set_tool(Tool::Draw);
        arbiter.begin_canvas_gesture();

        arbiter.sticker_gesture_started(Uuid::new_v4());
        assert!(!arbiter.is_scroll_enabled());

        arbiter.end_canvas_gesture();
        arbiter.sticker_gesture_started(Uuid::new_v4());
        assert!(arbiter.is_scroll_enabled());
    }

    #[test]
    fn test_block_removed_clears_matching_selection() {
        let mut arbiter = Arbiter::new();
        let id = Uuid::new_v4();
        arbiter.select_block(id);

        arbiter.block_removed(Uuid::new_v4());
        assert_eq!(arbiter.selected_block(), Some(id));

        arbiter.block_removed(id);
        assert!(arbiter.selected_block().is_none());
    }
}
