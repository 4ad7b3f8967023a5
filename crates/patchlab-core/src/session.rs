use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::buffer::PixelBuffer;
use crate::compositor::{self, PatchLayer};
use crate::error::{CoreError, Result};
use crate::filters::{FilterConfig, FilterKind};
use crate::history::{DEFAULT_CAPACITY, OperationHistory, RedoPolicy};
use crate::patch::{OperationRecord, Patch, Region};

/// Tunables for an editing session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Capacity of each history stack.
    pub history_capacity: usize,
    pub redo_policy: RedoPolicy,
    pub filters: FilterConfig,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            history_capacity: DEFAULT_CAPACITY,
            redo_policy: RedoPolicy::default(),
            filters: FilterConfig::default(),
        }
    }
}

/// What an apply/undo/redo did, for the collaborator's log or status bar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OpReport {
    /// Id of the record that was applied, undone, or redone.
    pub id: Uuid,
    pub kind: FilterKind,
    pub region: Region,
    /// Id of the oldest record discarded by the accompanying stack push,
    /// when the stack was at capacity.
    pub evicted: Option<Uuid>,
}

/// One editing session: the full image plus its undo/redo history.
///
/// All image mutation goes through [`apply`](Self::apply),
/// [`undo`](Self::undo) and [`redo`](Self::redo); the collaborator holds the
/// session, never raw pixel buffers. Everything runs synchronously to
/// completion, and a failed apply touches neither the image nor the history.
#[derive(Debug)]
pub struct EditingSession {
    image: PixelBuffer,
    history: OperationHistory,
    filters: FilterConfig,
}

impl EditingSession {
    pub fn new(image: PixelBuffer) -> Self {
        Self::with_config(image, SessionConfig::default())
    }

    pub fn with_config(image: PixelBuffer, config: SessionConfig) -> Self {
        Self {
            image,
            history: OperationHistory::new(config.history_capacity, config.redo_policy),
            filters: config.filters,
        }
    }

    /// Apply a filter to the given region of the image and record it.
    ///
    /// A request with both width and height zero selects the whole image.
    /// Fails with [`CoreError::RegionOutOfBounds`] before any mutation if
    /// the rectangle doesn't fit.
    pub fn apply(&mut self, kind: FilterKind, region: Region) -> Result<OpReport> {
        let region = region.or_whole_image(self.image.width(), self.image.height());
        let mut patch = Patch::from_image(&self.image, kind, region)?;
        patch.run_filter(&self.filters);
        compositor::write_back(&mut self.image, &patch, PatchLayer::Filtered);

        let record = OperationRecord::new(patch);
        let id = record.id();
        let evicted = self.history.record_apply(record);
        Ok(OpReport {
            id,
            kind,
            region,
            evicted: evicted.map(|r| r.id()),
        })
    }

    /// Revert the most recent operation, restoring the patch rectangle to
    /// its pre-operation pixels, and move the record to the redo stack.
    pub fn undo(&mut self) -> Result<OpReport> {
        let record = self.history.pop_undo().ok_or(CoreError::NothingToUndo)?;
        compositor::write_back(&mut self.image, record.patch(), PatchLayer::Original);

        let (id, kind, region) = (record.id(), record.kind(), record.region());
        let evicted = self.history.push_redo(record);
        Ok(OpReport {
            id,
            kind,
            region,
            evicted: evicted.map(|r| r.id()),
        })
    }

    /// Re-apply the most recently undone operation and move the record back
    /// to the undo stack.
    pub fn redo(&mut self) -> Result<OpReport> {
        let record = self.history.pop_redo().ok_or(CoreError::NothingToRedo)?;
        compositor::write_back(&mut self.image, record.patch(), PatchLayer::Filtered);

        let (id, kind, region) = (record.id(), record.kind(), record.region());
        let evicted = self.history.push_undo(record);
        Ok(OpReport {
            id,
            kind,
            region,
            evicted: evicted.map(|r| r.id()),
        })
    }

    /// (undo count, redo count), for enabling the corresponding actions.
    pub fn depth(&self) -> (usize, usize) {
        self.history.depth()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn undo_description(&self) -> Option<String> {
        self.history.undo_description()
    }

    pub fn redo_description(&self) -> Option<String> {
        self.history.redo_description()
    }

    /// The current full image, for display or export.
    pub fn image(&self) -> &PixelBuffer {
        &self.image
    }

    pub fn history(&self) -> &OperationHistory {
        &self.history
    }

    /// Replace the image being edited. Recorded patches reference the old
    /// pixels, so both stacks are discarded.
    pub fn load_image(&mut self, image: PixelBuffer) {
        self.image = image;
        self.history.clear();
    }
}
