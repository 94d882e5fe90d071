//! Closed-surface check for `Solid`s.

use crate::float_types::Real;
use crate::solid::Solid;
use hashbrown::HashMap;
use nalgebra::Point3;
use std::fmt::Debug;

impl<S: Clone + Send + Sync + Debug> Solid<S> {
    /// Checks if the Solid is manifold.
    ///
    /// ### Returns
    /// `true` if every undirected edge of the triangulated surface is
    /// shared by exactly 2 triangles.
    ///
    /// ### Notes
    /// - Vertex positions are quantized before edge counting so that
    ///   positions produced by separate splits still key the same edge.
    pub fn is_manifold(&self) -> bool {
        const QUANTIZATION_FACTOR: Real = 1e7;

        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        struct QuantizedPoint(i64, i64, i64);

        fn quantize_point(p: &Point3<Real>) -> QuantizedPoint {
            QuantizedPoint(
                (p.x * QUANTIZATION_FACTOR).round() as i64,
                (p.y * QUANTIZATION_FACTOR).round() as i64,
                (p.z * QUANTIZATION_FACTOR).round() as i64,
            )
        }

        // Triangulate the whole shape once
        let tri_solid = self.triangulate();
        let mut edge_counts: HashMap<(QuantizedPoint, QuantizedPoint), u32> = HashMap::new();

        for poly in &tri_solid.polygons {
            // Each triangle contributes edges 0->1, 1->2, 2->0.
            for &(i0, i1) in &[(0, 1), (1, 2), (2, 0)] {
                let p0 = quantize_point(&poly.vertices[i0].pos);
                let p1 = quantize_point(&poly.vertices[i1].pos);

                // Order the pair so (p0, p1) and (p1, p0) share a key.
                let (a_key, b_key) = if (p0.0, p0.1, p0.2) < (p1.0, p1.1, p1.2) {
                    (p0, p1)
                } else {
                    (p1, p0)
                };

                *edge_counts.entry((a_key, b_key)).or_insert(0) += 1;
            }
        }

        // A closed manifold surface with no boundary shares every edge
        // between exactly two triangles.
        edge_counts.values().all(|&count| count == 2)
    }
}
