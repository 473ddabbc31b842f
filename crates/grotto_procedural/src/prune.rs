//! # Region Pruning
//!
//! Removes regions below a size threshold by flipping their cells to the
//! opposite type.

use crate::error::{CaveResult, Phase};
use crate::grid::{Cell, Grid};
use crate::region::Region;

/// Flips every region smaller than `threshold` to `fill_value` and returns the
/// survivors, in their original order, with boundaries computed.
///
/// A region holding an outer-ring cell is the enclosing shell and is kept
/// whatever its size.
///
/// # Errors
///
/// Returns [`CaveError::BorderBreached`](crate::CaveError::BorderBreached)
/// if the border invariant does not hold before or after pruning. In the
/// latter case regions have already been flipped, so the grid must be
/// discarded on error.
pub fn prune_small(
    grid: &mut Grid,
    regions: Vec<Region>,
    threshold: usize,
    fill_value: Cell,
) -> CaveResult<Vec<Region>> {
    grid.ensure_border(Phase::Pruning)?;

    let before = regions.len();
    let mut survivors = Vec::with_capacity(before);
    for region in regions {
        let is_shell = region.contents.iter().any(|c| grid.is_border(c.x, c.y));
        if region.size() < threshold && !is_shell {
            for c in &region.contents {
                grid.set(c.x, c.y, fill_value);
            }
        } else {
            survivors.push(region);
        }
    }

    // Distinct regions of one type never touch, so boundaries can be computed
    // once all flips are done.
    for region in &mut survivors {
        region.compute_boundary(grid, fill_value);
    }

    grid.ensure_border(Phase::Pruning)?;
    tracing::debug!(
        threshold,
        removed = before - survivors.len(),
        kept = survivors.len(),
        "pruned small regions"
    );
    Ok(survivors)
}
