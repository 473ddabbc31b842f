//! # Surface Mesh Builder
//!
//! Emits one unit cube per Wall cell and keeps only the faces that can be
//! seen.
//!
//! ## Cube Layout
//!
//! Every Wall cell appends 8 corners, top ring first:
//!
//! ```text
//!   top (y = +0.5)        bottom (y = -0.5)
//!   3 ---- 2              7 ---- 6
//!   |      |   +z         |      |
//!   0 ---- 1   ^          4 ---- 5
//!             -x > +x
//! ```
//!
//! Grid row `x` maps to world X, grid column `y` to world Z, both shifted by
//! half the grid extent so the cave is centred on the origin.
//!
//! ## Culling
//!
//! A side face is dropped when the neighbour on that side is Wall. The grid
//! edge counts as open, so the outer shell is closed. When two adjacent
//! sides open onto Empty cells and the side opposite the first is Wall, the
//! cube is cut into a wedge: a diagonal face replaces the two open faces and
//! the top and bottom shrink to triangles.

use grotto_procedural::{CaveResult, Cell, Grid, Phase, Winding};

use crate::buffer::{cross, dot, sub, MeshBuffer};

/// Corner offsets of a unit cube, in emission order.
const CORNERS: [[f32; 3]; 8] = [
    [-0.5, 0.5, -0.5],
    [0.5, 0.5, -0.5],
    [0.5, 0.5, 0.5],
    [-0.5, 0.5, 0.5],
    [-0.5, -0.5, -0.5],
    [0.5, -0.5, -0.5],
    [0.5, -0.5, 0.5],
    [-0.5, -0.5, 0.5],
];

const UP: [f32; 3] = [0.0, 1.0, 0.0];
const DOWN: [f32; 3] = [0.0, -1.0, 0.0];

/// Local triangles with the direction their front must face.
type Face = ([u32; 3], [f32; 3]);

const TOP: [Face; 2] = [([0, 2, 1], UP), ([0, 3, 2], UP)];
const BOTTOM: [Face; 2] = [([4, 6, 5], DOWN), ([4, 7, 6], DOWN)];
const RIGHT: [Face; 2] = [([5, 2, 1], [1.0, 0.0, 0.0]), ([5, 6, 2], [1.0, 0.0, 0.0])];
const LEFT: [Face; 2] = [([4, 3, 0], [-1.0, 0.0, 0.0]), ([4, 7, 3], [-1.0, 0.0, 0.0])];
const FRONT: [Face; 2] = [([7, 2, 3], [0.0, 0.0, 1.0]), ([7, 6, 2], [0.0, 0.0, 1.0])];
const BACK: [Face; 2] = [([4, 1, 0], [0.0, 0.0, -1.0]), ([4, 5, 1], [0.0, 0.0, -1.0])];

/// What lies beyond one side of a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    /// An Empty cell.
    Open,
    /// A Wall cell.
    Solid,
    /// Outside the grid.
    Edge,
}

impl Side {
    fn of(grid: &Grid, x: i64, y: i64) -> Self {
        match grid.get_signed(x, y) {
            Some(Cell::Empty) => Self::Open,
            Some(Cell::Wall) => Self::Solid,
            None => Self::Edge,
        }
    }

    /// Whether a face on this side is visible.
    const fn exposed(self) -> bool {
        !matches!(self, Self::Solid)
    }
}

/// The four horizontal neighbours of a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Neighbors {
    /// Row `x + 1` (world +X).
    pub right: Side,
    /// Row `x - 1` (world -X).
    pub left: Side,
    /// Column `y + 1` (world +Z).
    pub front: Side,
    /// Column `y - 1` (world -Z).
    pub back: Side,
}

impl Neighbors {
    /// Classifies the neighbours of `(x, y)`.
    #[must_use]
    pub fn of(grid: &Grid, x: usize, y: usize) -> Self {
        let (x, y) = (x as i64, y as i64);
        Self {
            right: Side::of(grid, x + 1, y),
            left: Side::of(grid, x - 1, y),
            front: Side::of(grid, x, y + 1),
            back: Side::of(grid, x, y - 1),
        }
    }

    /// The diagonal cut applying to this cell, if any.
    ///
    /// At most one configuration can match.
    #[must_use]
    pub fn seam(self) -> Option<Seam> {
        use Side::{Open, Solid};
        match (self.right, self.front, self.left, self.back) {
            (Open, Open, Solid, _) => Some(Seam::RightFront),
            (_, Open, Open, Solid) => Some(Seam::FrontLeft),
            (Solid, _, Open, Open) => Some(Seam::LeftBack),
            (Open, Solid, _, Open) => Some(Seam::BackRight),
            _ => None,
        }
    }
}

/// A wedge cut, named after the two open sides it replaces.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Seam {
    /// Right and front open, left is Wall.
    RightFront,
    /// Front and left open, back is Wall.
    FrontLeft,
    /// Left and back open, right is Wall.
    LeftBack,
    /// Back and right open, front is Wall.
    BackRight,
}

impl Seam {
    /// Diagonal face plus the top and bottom halves that remain.
    const fn faces(self) -> [Face; 4] {
        match self {
            Self::RightFront => [
                ([7, 5, 1], [1.0, 0.0, 1.0]),
                ([7, 1, 3], [1.0, 0.0, 1.0]),
                ([7, 4, 5], DOWN),
                ([3, 0, 1], UP),
            ],
            Self::FrontLeft => [
                ([0, 2, 6], [-1.0, 0.0, 1.0]),
                ([0, 6, 4], [-1.0, 0.0, 1.0]),
                ([0, 1, 2], UP),
                ([4, 5, 6], DOWN),
            ],
            Self::LeftBack => [
                ([3, 1, 5], [-1.0, 0.0, -1.0]),
                ([3, 5, 7], [-1.0, 0.0, -1.0]),
                ([7, 5, 6], DOWN),
                ([3, 1, 2], UP),
            ],
            Self::BackRight => [
                ([0, 2, 6], [1.0, 0.0, -1.0]),
                ([0, 6, 4], [1.0, 0.0, -1.0]),
                ([4, 6, 7], DOWN),
                ([0, 2, 3], UP),
            ],
        }
    }

    /// Whether this cut replaces the `right`, `left`, `front`, `back` faces.
    const fn covers(self) -> [bool; 4] {
        match self {
            Self::RightFront => [true, false, true, false],
            Self::FrontLeft => [false, true, true, false],
            Self::LeftBack => [false, true, false, true],
            Self::BackRight => [true, false, false, true],
        }
    }
}

/// Builds the wall surface of a finished grid.
#[derive(Clone, Copy, Debug, Default)]
pub struct SurfaceMeshBuilder {
    winding: Winding,
}

impl SurfaceMeshBuilder {
    /// Creates a builder emitting faces in the given mode.
    #[must_use]
    pub const fn new(winding: Winding) -> Self {
        Self { winding }
    }

    /// Emits the surface of every Wall cell of `grid`.
    ///
    /// # Errors
    ///
    /// Returns [`CaveError::BorderBreached`](grotto_procedural::CaveError::BorderBreached)
    /// if the grid is not sealed.
    pub fn build(&self, grid: &Grid) -> CaveResult<MeshBuffer> {
        grid.ensure_border(Phase::Meshing)?;

        let mut mesh = MeshBuffer::new(self.winding == Winding::DoubleSided);
        let walls = grid.count(Cell::Wall);
        mesh.vertices.reserve(walls * CORNERS.len());

        let offset_x = (grid.height() / 2) as f32;
        let offset_z = (grid.width() / 2) as f32;
        let mut local: Vec<[u32; 3]> = Vec::with_capacity(16);

        for coord in grid.coords() {
            if !grid.at(coord).is_wall() {
                continue;
            }

            let center = [coord.x as f32 - offset_x, 0.0, coord.y as f32 - offset_z];
            let base = mesh.vertices.len() as u32;
            mesh.vertices.extend(
                CORNERS
                    .iter()
                    .map(|c| [center[0] + c[0], c[1], center[2] + c[2]]),
            );

            local.clear();
            cell_faces(Neighbors::of(grid, coord.x, coord.y), &mut local);

            for tri in &local {
                mesh.triangles.extend(tri.iter().map(|&i| base + i));
            }
            if self.winding == Winding::Duplicated {
                for tri in &local {
                    mesh.triangles.extend([base + tri[0], base + tri[2], base + tri[1]]);
                }
            }
        }

        tracing::debug!(
            walls,
            vertices = mesh.vertex_count(),
            triangles = mesh.triangle_count(),
            "surface mesh built"
        );
        Ok(mesh)
    }
}

/// Collects the outward-wound local triangles of one Wall cell.
fn cell_faces(neighbors: Neighbors, out: &mut Vec<[u32; 3]>) {
    let seam = neighbors.seam();
    let covered = seam.map_or([false; 4], Seam::covers);

    match seam {
        Some(seam) => push_faces(out, &seam.faces()),
        None => {
            push_faces(out, &TOP);
            push_faces(out, &BOTTOM);
        }
    }

    let sides = [
        (neighbors.right, RIGHT),
        (neighbors.left, LEFT),
        (neighbors.front, FRONT),
        (neighbors.back, BACK),
    ];
    for ((side, faces), covered) in sides.into_iter().zip(covered) {
        if side.exposed() && !covered {
            push_faces(out, &faces);
        }
    }
}

fn push_faces(out: &mut Vec<[u32; 3]>, faces: &[Face]) {
    out.extend(faces.iter().map(|&(tri, outward)| orient(tri, outward)));
}

/// Orders `tri` counter-clockwise as seen from the `outward` side.
fn orient(tri: [u32; 3], outward: [f32; 3]) -> [u32; 3] {
    let [a, b, c] = tri.map(|i| CORNERS[i as usize]);
    if dot(cross(sub(b, a), sub(c, a)), outward) < 0.0 {
        [tri[0], tri[2], tri[1]]
    } else {
        tri
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn faces_of(neighbors: Neighbors) -> Vec<[u32; 3]> {
        let mut out = Vec::new();
        cell_faces(neighbors, &mut out);
        out
    }

    fn all(side: Side) -> Neighbors {
        Neighbors {
            right: side,
            left: side,
            front: side,
            back: side,
        }
    }

    #[test]
    fn test_buried_cell_has_only_caps() {
        assert_eq!(faces_of(all(Side::Solid)).len(), 4);
    }

    #[test]
    fn test_isolated_cell_is_full_cube() {
        assert_eq!(faces_of(all(Side::Open)).len(), 12);
    }

    #[test]
    fn test_edge_faces_always_emitted() {
        let n = Neighbors {
            left: Side::Edge,
            back: Side::Edge,
            right: Side::Solid,
            front: Side::Solid,
        };
        assert_eq!(n.seam(), None);
        assert_eq!(faces_of(n).len(), 8);
    }

    #[test]
    fn test_each_rotation_has_one_seam() {
        use Side::{Open, Solid};
        let cases = [
            (
                Neighbors {
                    right: Open,
                    front: Open,
                    left: Solid,
                    back: Solid,
                },
                Seam::RightFront,
            ),
            (
                Neighbors {
                    right: Solid,
                    front: Open,
                    left: Open,
                    back: Solid,
                },
                Seam::FrontLeft,
            ),
            (
                Neighbors {
                    right: Solid,
                    front: Solid,
                    left: Open,
                    back: Open,
                },
                Seam::LeftBack,
            ),
            (
                Neighbors {
                    right: Open,
                    front: Solid,
                    left: Solid,
                    back: Open,
                },
                Seam::BackRight,
            ),
        ];
        for (neighbors, seam) in cases {
            assert_eq!(neighbors.seam(), Some(seam));
            // Diagonal (2) + half caps (2); remaining sides are Solid.
            assert_eq!(faces_of(neighbors).len(), 4);
        }
    }

    #[test]
    fn test_corridor_cell_has_no_seam() {
        let n = Neighbors {
            right: Side::Open,
            left: Side::Open,
            front: Side::Solid,
            back: Side::Solid,
        };
        assert_eq!(n.seam(), None);
        assert_eq!(faces_of(n).len(), 8);
    }

    #[test]
    fn test_orientation_faces_outward() {
        for neighbors in [all(Side::Open), all(Side::Edge)] {
            for tri in faces_of(neighbors) {
                let [a, b, c] = tri.map(|i| CORNERS[i as usize]);
                let normal = cross(sub(b, a), sub(c, a));
                let centroid = [
                    (a[0] + b[0] + c[0]) / 3.0,
                    (a[1] + b[1] + c[1]) / 3.0,
                    (a[2] + b[2] + c[2]) / 3.0,
                ];
                assert!(dot(normal, centroid) > 0.0, "{tri:?} faces inward");
            }
        }
    }
}
