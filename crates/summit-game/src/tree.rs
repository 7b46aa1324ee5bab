//! # Tournament Tree Bookkeeping
//!
//! Children lists and sibling pruning. A child registers itself with its
//! parent exactly once, during its own initialization — no other instance
//! ever mutates another's children list. Pruning selects the single
//! surviving continuation among a parent's children: the earliest-created
//! (lowest-index) child that has not been eliminated by the fault flow.
//! Duplicates always carry higher indices than their predecessors, so the
//! selection respects duplicate-chain ordering.

use summit_core::GameIndex;

use crate::error::GameError;
use crate::registry::GameRegistry;

/// Register `child` in `parent`'s children list.
pub fn append_child(
    registry: &mut GameRegistry,
    parent: GameIndex,
    child: GameIndex,
) -> Result<(), GameError> {
    let record = registry.record_mut(parent)?;
    record.game.children.insert(child);
    Ok(())
}

/// Select the surviving child of `parent`, if any.
///
/// Returns `None` when the parent has no children or every child has been
/// eliminated.
pub fn prune_children(
    registry: &GameRegistry,
    parent: GameIndex,
) -> Result<Option<GameIndex>, GameError> {
    let record = registry.record(parent)?;
    for &child in &record.game.children {
        if !registry.record(child)?.game.eliminated {
            return Ok(Some(child));
        }
    }
    Ok(None)
}
