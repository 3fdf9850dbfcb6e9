//! Harvestable resources stacked on tiles.

use garden_defence_core::ResourceKind;

/// A single resource stacked on a tile.
///
/// Consumption flags the resource; the world purges flagged resources at
/// the start of the next step, so a consumed resource stays on the tile
/// (invisible to queries) for the remainder of the step that consumed it.
#[derive(Clone, Copy, Debug)]
pub struct Resource {
    kind: ResourceKind,
    removal: bool,
}

impl Resource {
    pub(crate) const fn new(kind: ResourceKind) -> Self {
        Self {
            kind,
            removal: false,
        }
    }

    /// Kind of the resource.
    #[must_use]
    pub const fn kind(&self) -> ResourceKind {
        self.kind
    }

    pub(crate) fn mark_for_removal(&mut self) {
        self.removal = true;
    }

    /// Reports whether the resource has been consumed this step.
    #[must_use]
    pub const fn is_marked_for_removal(&self) -> bool {
        self.removal
    }
}
