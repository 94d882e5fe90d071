//! Test support library
//! Provides various helper functions & utilities for tests.

#![allow(dead_code)]

use polycut::{Solid, float_types::Real};
use nalgebra::Point3;

/// Returns the bounding box `[min_x, min_y, min_z, max_x, max_y, max_z]`
/// of a solid.
pub fn bounding_box(solid: &Solid<()>) -> [Real; 6] {
    let aabb = solid.bounding_box();
    [
        aabb.mins.x,
        aabb.mins.y,
        aabb.mins.z,
        aabb.maxs.x,
        aabb.maxs.y,
        aabb.maxs.z,
    ]
}

/// Quick helper to compare floating-point results with an acceptable tolerance.
pub fn approx_eq(a: Real, b: Real, eps: Real) -> bool {
    (a - b).abs() < eps
}

/// Enclosed volume of a solid, via mass properties at density 1.
pub fn volume(solid: &Solid<()>) -> Real {
    solid
        .mass_properties(1.0)
        .expect("solid should triangulate")
        .0
}

/// Counts the cell centers of a regular `steps³` grid over
/// `[min, max]³` that fall inside the solid. Point-containment sampling:
/// running it with the same grid over related solids lets set identities
/// be checked exactly, as long as no cell center sits on a boundary.
pub fn grid_count(solid: &Solid<()>, min: Real, max: Real, steps: usize) -> usize {
    let cell = (max - min) / steps as Real;
    let mut count = 0;
    for i in 0..steps {
        for j in 0..steps {
            for k in 0..steps {
                let p = Point3::new(
                    min + (i as Real + 0.5) * cell,
                    min + (j as Real + 0.5) * cell,
                    min + (k as Real + 0.5) * cell,
                );
                if solid.contains_vertex(&p) {
                    count += 1;
                }
            }
        }
    }
    count
}
