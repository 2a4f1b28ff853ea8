//! # Wall Extrusion
//!
//! Every outline edge becomes a vertical quad hanging `wall_height` below
//! the floor. Quads do not share vertices, so each wall face can carry its
//! own normal.

use cavern_shared::Vec3;

use crate::error::{MeshError, MeshResult};
use crate::mesh::{MeshBuffers, Vertex};
use crate::outline::Outline;

/// Builds wall geometry for `outlines` over the floor `vertices`.
///
/// For each edge `(p_i, p_i+1)` four vertices are emitted: top-left `p_i`,
/// top-right `p_i+1`, then both again lowered by `wall_height`. The quad is
/// split into triangles `(0, 2, 3)` and `(3, 1, 0)` relative to its first
/// vertex.
///
/// # Errors
///
/// Returns [`MeshError::InvariantViolation`] if an outline names a vertex
/// outside `vertices`.
pub fn extrude_walls(vertices: &[Vertex], outlines: &[Outline], wall_height: f32) -> MeshResult<MeshBuffers> {
    let edge_count: usize = outlines.iter().map(|o| o.vertices.len().saturating_sub(1)).sum();
    let mut walls = MeshBuffers {
        vertices: Vec::with_capacity(edge_count * 4),
        indices: Vec::with_capacity(edge_count * 6),
    };
    let down = Vec3::Y * wall_height;

    let lookup = |index: u32| {
        vertices.get(index as usize).map(|v| v.position).ok_or_else(|| {
            MeshError::InvariantViolation(format!("outline vertex {index} outside floor buffer"))
        })
    };

    for outline in outlines {
        for (a, b) in outline.edges() {
            let top_left = lookup(a)?;
            let top_right = lookup(b)?;

            let base = u32::try_from(walls.vertices.len()).map_err(|_| {
                MeshError::InvariantViolation("wall buffer exceeds u32 indices".to_string())
            })?;
            walls.vertices.extend([
                Vertex::new(top_left),
                Vertex::new(top_right),
                Vertex::new(top_left - down),
                Vertex::new(top_right - down),
            ]);
            walls
                .indices
                .extend([base, base + 2, base + 3, base + 3, base + 1, base]);
        }
    }

    Ok(walls)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square_floor() -> Vec<Vertex> {
        vec![
            Vertex::new(Vec3::new(0.0, 0.0, 0.0)),
            Vertex::new(Vec3::new(1.0, 0.0, 0.0)),
            Vertex::new(Vec3::new(1.0, 0.0, 1.0)),
            Vertex::new(Vec3::new(0.0, 0.0, 1.0)),
        ]
    }

    #[test]
    fn test_one_quad_per_edge() {
        let outline = Outline {
            vertices: vec![0, 1, 2, 3, 0],
        };
        let walls = extrude_walls(&square_floor(), &[outline], 2.0).unwrap();

        assert_eq!(walls.vertices.len(), 16);
        assert_eq!(walls.triangle_count(), 8);
        assert_eq!(&walls.indices[..6], &[0, 2, 3, 3, 1, 0]);
        assert_eq!(walls.vertices[2].position, Vec3::new(0.0, -2.0, 0.0));
        assert_eq!(walls.vertices[3].position, Vec3::new(1.0, -2.0, 0.0));
    }

    #[test]
    fn test_zero_height_walls_are_flat() {
        let outline = Outline {
            vertices: vec![0, 1, 0],
        };
        let walls = extrude_walls(&square_floor(), &[outline], 0.0).unwrap();
        assert_eq!(walls.vertices[0].position, walls.vertices[2].position);
    }

    #[test]
    fn test_bad_outline_index_fails() {
        let outline = Outline {
            vertices: vec![0, 9, 0],
        };
        assert!(matches!(
            extrude_walls(&square_floor(), &[outline], 1.0),
            Err(MeshError::InvariantViolation(_))
        ));
    }

    #[test]
    fn test_no_outlines_no_walls() {
        let walls = extrude_walls(&square_floor(), &[], 5.0).unwrap();
        assert!(walls.is_empty());
    }
}
