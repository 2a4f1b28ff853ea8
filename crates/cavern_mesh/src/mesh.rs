//! # Mesh Buffers
//!
//! Flat vertex/index buffers as handed to a renderer. Vertices are
//! plain-old-data so a buffer can be uploaded with [`MeshBuffers::vertex_bytes`]
//! without copying.

use bytemuck::{Pod, Zeroable};
use cavern_shared::Vec3;

use crate::outline::Outline;

/// A mesh vertex.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    /// Position in mesh space.
    pub position: Vec3,
}

impl Vertex {
    /// Creates a vertex at `position`.
    #[inline]
    #[must_use]
    pub const fn new(position: Vec3) -> Self {
        Self { position }
    }
}

/// Three vertex indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Triangle {
    /// Vertex indices in winding order.
    pub vertices: [u32; 3],
}

impl Triangle {
    /// Creates a triangle.
    #[inline]
    #[must_use]
    pub const fn new(a: u32, b: u32, c: u32) -> Self {
        Self { vertices: [a, b, c] }
    }

    /// Returns true if `vertex` is one of the corners.
    #[inline]
    #[must_use]
    pub fn contains(&self, vertex: u32) -> bool {
        self.vertices.contains(&vertex)
    }
}

/// Vertex buffer plus triangle index buffer.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshBuffers {
    /// Vertex positions.
    pub vertices: Vec<Vertex>,
    /// Triangle list; length is a multiple of 3.
    pub indices: Vec<u32>,
}

impl MeshBuffers {
    /// Number of triangles.
    #[inline]
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Returns true if there is no geometry.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Iterates triangles.
    pub fn triangles(&self) -> impl Iterator<Item = Triangle> + '_ {
        self.indices
            .chunks_exact(3)
            .map(|t| Triangle::new(t[0], t[1], t[2]))
    }

    /// Vertex buffer as raw bytes.
    #[must_use]
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Index buffer as raw bytes.
    #[must_use]
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    /// Per-vertex normals: area-weighted sum of adjacent face normals,
    /// normalized. Vertices without a triangle get a zero normal.
    #[must_use]
    pub fn compute_normals(&self) -> Vec<Vec3> {
        let mut normals = vec![Vec3::ZERO; self.vertices.len()];

        for triangle in self.triangles() {
            let [a, b, c] = triangle.vertices.map(|i| i as usize);
            let (Some(pa), Some(pb), Some(pc)) =
                (self.vertices.get(a), self.vertices.get(b), self.vertices.get(c))
            else {
                continue;
            };
            // Cross product length is twice the area, which weights the sum.
            let face = (pb.position - pa.position).cross(pc.position - pa.position);
            for index in [a, b, c] {
                normals[index] += face;
            }
        }

        normals.into_iter().map(Vec3::normalize_or_zero).collect()
    }
}

/// Floor and wall geometry for one grid.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CaveMesh {
    /// Triangulated solid area.
    pub floor: MeshBuffers,
    /// Extruded boundary walls.
    pub walls: MeshBuffers,
    /// Closed boundary loops of the floor, as floor vertex indices.
    pub outlines: Vec<Outline>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad() -> MeshBuffers {
        MeshBuffers {
            vertices: vec![
                Vertex::new(Vec3::new(0.0, 0.0, 1.0)),
                Vertex::new(Vec3::new(1.0, 0.0, 1.0)),
                Vertex::new(Vec3::new(1.0, 0.0, 0.0)),
                Vertex::new(Vec3::new(0.0, 0.0, 0.0)),
            ],
            indices: vec![0, 1, 2, 0, 2, 3],
        }
    }

    #[test]
    fn test_triangle_iteration() {
        let mesh = quad();
        assert_eq!(mesh.triangle_count(), 2);
        let triangles: Vec<Triangle> = mesh.triangles().collect();
        assert_eq!(triangles[1], Triangle::new(0, 2, 3));
        assert!(triangles[0].contains(1));
        assert!(!triangles[1].contains(1));
    }

    #[test]
    fn test_normals_of_flat_quad_point_up() {
        let normals = quad().compute_normals();
        for normal in normals {
            assert!((normal - Vec3::Y).length() < 1e-6, "{normal:?}");
        }
    }

    #[test]
    fn test_byte_views() {
        let mesh = quad();
        assert_eq!(mesh.vertex_bytes().len(), 4 * 12);
        assert_eq!(mesh.index_bytes().len(), 6 * 4);
    }

    #[test]
    fn test_orphan_vertex_gets_zero_normal() {
        let mut mesh = quad();
        mesh.vertices.push(Vertex::new(Vec3::new(5.0, 0.0, 5.0)));
        assert_eq!(mesh.compute_normals()[4], Vec3::ZERO);
    }
}
