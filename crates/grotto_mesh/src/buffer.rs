//! Mesh output handed to the host renderer.

/// Vertex and index buffers for the cave walls.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshBuffer {
    /// Vertex positions, 8 per wall cell.
    pub vertices: Vec<[f32; 3]>,
    /// Triangle list, 3 indices per triangle.
    pub triangles: Vec<u32>,
    /// The host must render both sides of every triangle.
    pub double_sided: bool,
}

impl MeshBuffer {
    /// Creates an empty buffer.
    #[must_use]
    pub const fn new(double_sided: bool) -> Self {
        Self {
            vertices: Vec::new(),
            triangles: Vec::new(),
            double_sided,
        }
    }

    /// Check if mesh is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Get triangle count
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len() / 3
    }

    /// Get vertex count
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// The three corner positions of triangle `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= triangle_count()`.
    #[must_use]
    pub fn triangle(&self, index: usize) -> [[f32; 3]; 3] {
        let t = &self.triangles[index * 3..index * 3 + 3];
        [
            self.vertices[t[0] as usize],
            self.vertices[t[1] as usize],
            self.vertices[t[2] as usize],
        ]
    }

    /// Unit normal of triangle `index`, following its winding.
    ///
    /// # Panics
    ///
    /// Panics if `index >= triangle_count()`.
    #[must_use]
    pub fn face_normal(&self, index: usize) -> [f32; 3] {
        let [a, b, c] = self.triangle(index);
        normalize(cross(sub(b, a), sub(c, a)))
    }

    /// Raw vertex bytes for upload (`3 x f32` per vertex).
    #[must_use]
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Raw index bytes for upload (`u32` per index).
    #[must_use]
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.triangles)
    }
}

#[inline]
pub(crate) fn sub(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

#[inline]
pub(crate) fn cross(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

#[inline]
pub(crate) fn dot(a: [f32; 3], b: [f32; 3]) -> f32 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

fn normalize(v: [f32; 3]) -> [f32; 3] {
    let len = dot(v, v).sqrt();
    if len == 0.0 {
        v
    } else {
        [v[0] / len, v[1] / len, v[2] / len]
    }
}
