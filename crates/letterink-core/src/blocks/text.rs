//! Text block.

use super::BlockId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A paragraph of letter text, read in document order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextBlock {
    pub id: BlockId,
    pub content: String,
}

impl TextBlock {
    pub fn new(content: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            content,
        }
    }
}
