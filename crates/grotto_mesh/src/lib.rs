//! # GROTTO Mesh
//!
//! Extracts the wall surface of a finished cave grid as plain vertex and
//! index buffers for the host's renderer and collider.
//!
//! ```rust,ignore
//! use grotto_mesh::SurfaceMeshBuilder;
//! use grotto_procedural::Winding;
//!
//! let mesh = SurfaceMeshBuilder::new(Winding::DoubleSided).build(&grid)?;
//! upload(mesh.vertex_bytes(), mesh.index_bytes());
//! ```

#![deny(unsafe_code)]
#![deny(clippy::perf)]
#![warn(clippy::pedantic)]

pub mod buffer;
pub mod surface;

pub use buffer::MeshBuffer;
pub use surface::{Neighbors, Seam, Side, SurfaceMeshBuilder};
