//! # Outline Tracing
//!
//! An edge `(u, v)` is a boundary edge when exactly one triangle contains
//! both `u` and `v`. Boundary edges chain into closed loops, one per
//! connected boundary of the floor (outer cave wall and every island).
//!
//! Tracing is iterative: loops of any length run in constant stack depth.

use crate::error::{MeshError, MeshResult};
use crate::mesh::Triangle;

/// Vertex → triangles index.
#[derive(Clone, Debug, Default)]
pub struct TriangleAdjacency {
    by_vertex: Vec<Vec<usize>>,
}

impl TriangleAdjacency {
    /// Creates an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the index for a triangle list over `vertex_count` vertices.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::InvariantViolation`] if a triangle references a
    /// vertex past `vertex_count`.
    pub fn from_triangles(triangles: &[Triangle], vertex_count: usize) -> MeshResult<Self> {
        let mut adjacency = Self {
            by_vertex: vec![Vec::new(); vertex_count],
        };
        for (index, triangle) in triangles.iter().enumerate() {
            adjacency.add_triangle(index, *triangle)?;
        }
        Ok(adjacency)
    }

    /// Registers a new vertex with no triangles yet.
    pub fn push_vertex(&mut self) {
        self.by_vertex.push(Vec::new());
    }

    /// Records triangle `index` against each of its vertices.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::InvariantViolation`] for an unregistered vertex.
    pub fn add_triangle(&mut self, index: usize, triangle: Triangle) -> MeshResult<()> {
        for vertex in triangle.vertices {
            self.by_vertex
                .get_mut(vertex as usize)
                .ok_or_else(|| {
                    MeshError::InvariantViolation(format!(
                        "triangle {index} references unregistered vertex {vertex}"
                    ))
                })?
                .push(index);
        }
        Ok(())
    }

    /// Triangles touching `vertex`.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::InvariantViolation`] if the vertex has no entry.
    pub fn triangles_of(&self, vertex: u32) -> MeshResult<&[usize]> {
        match self.by_vertex.get(vertex as usize) {
            Some(list) if !list.is_empty() => Ok(list),
            _ => Err(MeshError::InvariantViolation(format!(
                "vertex {vertex} has no adjacency entry"
            ))),
        }
    }

    /// Number of registered vertices.
    #[inline]
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.by_vertex.len()
    }
}

/// A closed boundary loop. The first index is repeated at the end.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Outline {
    /// Floor vertex indices in walking order.
    pub vertices: Vec<u32>,
}

impl Outline {
    /// Returns true if the loop ends where it starts.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.vertices.len() > 1 && self.vertices.first() == self.vertices.last()
    }

    /// Consecutive vertex pairs, including the closing pair.
    pub fn edges(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.vertices.windows(2).map(|pair| (pair[0], pair[1]))
    }

    /// Number of distinct vertices on the loop.
    #[must_use]
    pub fn len(&self) -> usize {
        self.vertices.len().saturating_sub(1)
    }

    /// Returns true if the loop has no vertices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

/// Walks boundary edges into closed outlines.
pub struct OutlineTracer<'a> {
    triangles: &'a [Triangle],
    adjacency: &'a TriangleAdjacency,
    checked: Vec<bool>,
}

impl<'a> OutlineTracer<'a> {
    /// Creates a tracer.
    ///
    /// `checked` marks vertices that can never be on a boundary (interior
    /// corners of fully solid squares); it is padded to the vertex count.
    #[must_use]
    pub fn new(
        triangles: &'a [Triangle],
        adjacency: &'a TriangleAdjacency,
        mut checked: Vec<bool>,
    ) -> Self {
        checked.resize(adjacency.vertex_count(), false);
        Self {
            triangles,
            adjacency,
            checked,
        }
    }

    /// Returns true if exactly one triangle contains both vertices.
    ///
    /// # Errors
    ///
    /// Fails if `a` has no adjacency entry.
    pub fn is_outline_edge(&self, a: u32, b: u32) -> MeshResult<bool> {
        let shared = self
            .adjacency
            .triangles_of(a)?
            .iter()
            .filter(|&&t| self.triangles.get(t).is_some_and(|tri| tri.contains(b)))
            .count();
        Ok(shared == 1)
    }

    fn is_checked(&self, vertex: u32) -> bool {
        self.checked.get(vertex as usize).copied().unwrap_or(true)
    }

    /// First unchecked vertex joined to `vertex` by a boundary edge.
    fn next_outline_vertex(&self, vertex: u32) -> MeshResult<Option<u32>> {
        for &t in self.adjacency.triangles_of(vertex)? {
            let triangle = self.triangles.get(t).ok_or_else(|| {
                MeshError::InvariantViolation(format!("adjacency names missing triangle {t}"))
            })?;
            for candidate in triangle.vertices {
                if candidate != vertex
                    && !self.is_checked(candidate)
                    && self.is_outline_edge(vertex, candidate)?
                {
                    return Ok(Some(candidate));
                }
            }
        }
        Ok(None)
    }

    /// Traces every outline, in order of each loop's lowest start vertex.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::InvariantViolation`] if a vertex on a boundary has
    /// no adjacency entry, or if a walk dead-ends before it can close over a
    /// boundary edge.
    pub fn trace(mut self) -> MeshResult<Vec<Outline>> {
        let mut outlines = Vec::new();

        for index in 0..self.checked.len() {
            if self.checked[index] {
                continue;
            }
            let start = u32::try_from(index).map_err(|_| {
                MeshError::InvariantViolation(format!("vertex {index} exceeds u32 range"))
            })?;

            let Some(mut current) = self.next_outline_vertex(start)? else {
                continue;
            };
            self.checked[index] = true;
            let mut vertices = vec![start];

            loop {
                vertices.push(current);
                if let Some(flag) = self.checked.get_mut(current as usize) {
                    *flag = true;
                }
                match self.next_outline_vertex(current)? {
                    Some(next) => current = next,
                    None => break,
                }
            }

            if vertices.len() < 3 || !self.is_outline_edge(current, start)? {
                return Err(MeshError::InvariantViolation(format!(
                    "outline from vertex {start} stops at {current} without closing"
                )));
            }
            vertices.push(start);
            outlines.push(Outline { vertices });
        }

        Ok(outlines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Two triangles sharing the diagonal 0-2 of a quad 0-1-2-3.
    fn quad() -> Vec<Triangle> {
        vec![Triangle::new(0, 1, 2), Triangle::new(0, 2, 3)]
    }

    #[test]
    fn test_shared_edge_is_interior() {
        let triangles = quad();
        let adjacency = TriangleAdjacency::from_triangles(&triangles, 4).unwrap();
        let tracer = OutlineTracer::new(&triangles, &adjacency, Vec::new());

        assert!(!tracer.is_outline_edge(0, 2).unwrap());
        assert!(tracer.is_outline_edge(0, 1).unwrap());
        assert!(tracer.is_outline_edge(3, 0).unwrap());
    }

    #[test]
    fn test_quad_traces_one_closed_loop() {
        let triangles = quad();
        let adjacency = TriangleAdjacency::from_triangles(&triangles, 4).unwrap();
        let outlines = OutlineTracer::new(&triangles, &adjacency, Vec::new())
            .trace()
            .unwrap();

        assert_eq!(outlines.len(), 1);
        assert_eq!(outlines[0].vertices, vec![0, 1, 2, 3, 0]);
        assert!(outlines[0].is_closed());
        assert_eq!(outlines[0].len(), 4);
    }

    #[test]
    fn test_disjoint_triangles_give_two_loops() {
        let triangles = vec![Triangle::new(0, 1, 2), Triangle::new(3, 4, 5)];
        let adjacency = TriangleAdjacency::from_triangles(&triangles, 6).unwrap();
        let outlines = OutlineTracer::new(&triangles, &adjacency, Vec::new())
            .trace()
            .unwrap();

        assert_eq!(outlines.len(), 2);
        assert_eq!(outlines[1].vertices, vec![3, 4, 5, 3]);
    }

    #[test]
    fn test_checked_vertices_never_start_a_loop() {
        let triangles = quad();
        let adjacency = TriangleAdjacency::from_triangles(&triangles, 4).unwrap();
        let outlines = OutlineTracer::new(&triangles, &adjacency, vec![true; 4])
            .trace()
            .unwrap();
        assert!(outlines.is_empty());
    }

    #[test]
    fn test_dead_end_walk_is_rejected() {
        let triangles = quad();
        let adjacency = TriangleAdjacency::from_triangles(&triangles, 4).unwrap();
        // Vertex 2 pre-checked: the walk 0 -> 1 cannot continue back to 0.
        let checked = vec![false, false, true, false];
        let result = OutlineTracer::new(&triangles, &adjacency, checked).trace();
        assert!(matches!(result, Err(MeshError::InvariantViolation(_))));
    }

    #[test]
    fn test_missing_adjacency_is_reported() {
        let triangles = quad();
        // Vertex 4 is registered but touches no triangle.
        let adjacency = TriangleAdjacency::from_triangles(&triangles, 5).unwrap();
        let result = OutlineTracer::new(&triangles, &adjacency, Vec::new()).trace();
        assert!(matches!(result, Err(MeshError::InvariantViolation(_))));
    }

    #[test]
    fn test_unregistered_vertex_rejected() {
        let triangles = vec![Triangle::new(0, 1, 7)];
        assert!(TriangleAdjacency::from_triangles(&triangles, 3).is_err());
    }
}
