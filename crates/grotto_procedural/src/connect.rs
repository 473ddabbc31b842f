//! # Region Connection
//!
//! Joins every surviving room to the largest one by carving straight
//! corridors.
//!
//! ## Strategy
//!
//! 1. The largest room (first one on ties) becomes the main region.
//! 2. Every room gets its boundary distance to the main region.
//! 3. Rooms are stably sorted by that distance.
//! 4. In that order, each unconnected room is linked to the closest room
//!    already connected, which need not be the main region.
//!
//! This is a single greedy pass, not a minimum spanning tree. Its output is
//! reproduced exactly so generated levels stay stable across versions.

use crate::error::{CaveResult, Phase};
use crate::grid::{Cell, Coord, Grid};
use crate::region::Region;

/// A straight corridor between two boundary cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Corridor {
    /// Boundary cell of the room being connected.
    pub start: Coord,
    /// Boundary cell of the already-connected room.
    pub end: Coord,
}

/// Connects `rooms` in place and carves the corridors into `grid`.
///
/// `rooms` must be the surviving rooms of the pruning pass, boundaries
/// computed. On return they are sorted by distance from the main region and
/// all flagged connected.
///
/// # Errors
///
/// Returns [`CaveError::BorderBreached`](crate::CaveError::BorderBreached)
/// if carving left the border invariant broken. Corridors are already carved
/// by then, so the grid must be discarded on error.
pub fn connect(grid: &mut Grid, rooms: &mut [Region]) -> CaveResult<Vec<Corridor>> {
    let Some(main) = select_main(rooms) else {
        tracing::debug!("no rooms to connect");
        return Ok(Vec::new());
    };

    assign_distances(rooms, main);
    rooms.sort_by_key(|r| r.distance_from_main.unwrap_or(u64::MAX));

    let corridors = plan_corridors(rooms);
    for corridor in &corridors {
        carve_corridor(grid, *corridor);
    }

    grid.ensure_border(Phase::Connection)?;
    tracing::debug!(
        rooms = rooms.len(),
        corridors = corridors.len(),
        "rooms connected"
    );
    Ok(corridors)
}

/// Resets connection flags and marks the main region; returns its index.
///
/// The main region is the first room of strictly maximal size.
pub fn select_main(rooms: &mut [Region]) -> Option<usize> {
    for room in rooms.iter_mut() {
        room.is_main = false;
        room.is_connected_to_main = false;
    }

    let largest = rooms.iter().map(Region::size).max()?;
    let main = rooms.iter().position(|r| r.size() == largest)?;
    rooms[main].is_main = true;
    rooms[main].is_connected_to_main = true;
    Some(main)
}

/// Sets `distance_from_main` for every room (brute force over boundaries).
pub fn assign_distances(rooms: &mut [Region], main: usize) {
    let distances: Vec<Option<u64>> = rooms
        .iter()
        .map(|r| r.closest_boundary_pair(&rooms[main]).map(|(_, _, d)| d))
        .collect();

    for (room, distance) in rooms.iter_mut().zip(distances) {
        room.distance_from_main = distance;
    }
}

/// Greedy pass: links every unconnected room to its nearest connected room.
///
/// Rooms are visited in slice order; each one is flagged connected as soon
/// as it has been processed.
pub fn plan_corridors(rooms: &mut [Region]) -> Vec<Corridor> {
    let mut corridors = Vec::new();

    for i in 0..rooms.len() {
        if rooms[i].is_connected_to_main {
            continue;
        }

        let mut best: Option<(Coord, Coord, u64)> = None;
        for other in rooms.iter().filter(|r| r.is_connected_to_main) {
            if let Some(candidate) = rooms[i].closest_boundary_pair(other) {
                if best.map_or(true, |(_, _, d)| candidate.2 < d) {
                    best = Some(candidate);
                }
            }
        }

        rooms[i].is_connected_to_main = true;
        match best {
            Some((start, end, _)) => corridors.push(Corridor { start, end }),
            None => tracing::warn!(
                room_size = rooms[i].size(),
                "room has no boundary pair, left without a corridor"
            ),
        }
    }

    corridors
}

/// Clears a 3x3 brush along the rasterized corridor line.
pub fn carve_corridor(grid: &mut Grid, corridor: Corridor) {
    for (x, y) in rasterize_line(corridor.start, corridor.end) {
        clear_around(grid, x, y);
    }
}

/// Sets the 3x3 neighbourhood of `(x, y)` to Empty, sparing the outer ring.
pub fn clear_around(grid: &mut Grid, x: i64, y: i64) {
    for i in x - 1..=x + 1 {
        for j in y - 1..=y + 1 {
            if grid.is_interior(i, j) {
                grid.set(i as usize, j as usize, Cell::Empty);
            }
        }
    }
}

/// Slope-based digital line from `start` to `end`.
///
/// The axis with the larger delta is iterated (x on ties); the other
/// coordinate is taken from the line equation and rounded half-up. A line
/// with no x delta walks y directly. Points come out in ascending order
/// along the iterated axis.
#[must_use]
pub fn rasterize_line(start: Coord, end: Coord) -> Vec<(i64, i64)> {
    let (sx, sy) = (start.x as i64, start.y as i64);
    let (ex, ey) = (end.x as i64, end.y as i64);
    let (dx, dy) = (ex - sx, ey - sy);

    if dx == 0 && dy == 0 {
        return vec![(sx, sy)];
    }

    let vertical = dx == 0;
    let (slope, constant) = if vertical {
        (0.0f32, 0.0f32)
    } else {
        let slope = dy as f32 / dx as f32;
        (slope, sy as f32 - slope * sx as f32)
    };

    if dx.abs() >= dy.abs() {
        let (from, to) = if sx <= ex { (sx, ex) } else { (ex, sx) };
        (from..=to)
            .map(|x| (x, round_half_up(slope * x as f32 + constant)))
            .collect()
    } else {
        let (from, to) = if sy <= ey { (sy, ey) } else { (ey, sy) };
        (from..=to)
            .map(|y| {
                let x = if vertical {
                    sx
                } else {
                    round_half_up((y as f32 - constant) / slope)
                };
                (x, y)
            })
            .collect()
    }
}

/// Rounds to the nearer integer, halves going up from the truncated value.
#[inline]
#[must_use]
pub fn round_half_up(value: f32) -> i64 {
    let whole = value.trunc();
    if value - whole >= 0.5 {
        whole as i64 + 1
    } else {
        whole as i64
    }
}
