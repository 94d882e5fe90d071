//! Struct and functions for working with `Vertex`s from which `Polygon`s are composed.

use crate::float_types::Real;
use core::hash::{Hash, Hasher};
use nalgebra::{Point3, Vector3};

/// A vertex of a polygon, holding position and normal.
#[derive(Debug, Clone)]
pub struct Vertex {
    pub pos: Point3<Real>,
    pub normal: Vector3<Real>,
}

impl Vertex {
    /// Create a new [`Vertex`].
    ///
    /// * `pos`    – the position in model space
    /// * `normal` – (optionally non-unit) normal; it will be **copied
    ///   verbatim**, so make sure it is oriented the way you need it for
    ///   lighting / BSP tests.
    pub const fn new(pos: Point3<Real>, normal: Vector3<Real>) -> Self {
        Vertex { pos, normal }
    }

    /// Flip vertex normal
    pub fn flip(&mut self) {
        self.normal = -self.normal;
    }

    /// Return the linear interpolation between `self` (`t = 0`) and `other` (`t = 1`).
    ///
    /// Normals are linearly interpolated as well.
    pub fn interpolate(&self, other: &Vertex, t: Real) -> Vertex {
        // For positions (Point3): p(t) = p0 + t * (p1 - p0)
        let new_pos = self.pos + (other.pos - self.pos) * t;

        // For normals (Vector3): n(t) = n0 + t * (n1 - n0)
        let new_normal = self.normal + (other.normal - self.normal) * t;
        Vertex::new(new_pos, new_normal)
    }
}

// Vertices serve as deduplication keys when extracting indexed buffers.
// Equality and hashing are both bit-level over the six coordinates so the
// two stay consistent as map keys (and so NaN cannot break reflexivity).
// Compare coordinates directly when geometric tolerance is wanted.
impl PartialEq for Vertex {
    fn eq(&self, other: &Self) -> bool {
        self.pos.x.to_bits() == other.pos.x.to_bits()
            && self.pos.y.to_bits() == other.pos.y.to_bits()
            && self.pos.z.to_bits() == other.pos.z.to_bits()
            && self.normal.x.to_bits() == other.normal.x.to_bits()
            && self.normal.y.to_bits() == other.normal.y.to_bits()
            && self.normal.z.to_bits() == other.normal.z.to_bits()
    }
}

impl Eq for Vertex {}

impl Hash for Vertex {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.pos.x.to_bits().hash(state);
        self.pos.y.to_bits().hash(state);
        self.pos.z.to_bits().hash(state);
        self.normal.x.to_bits().hash(state);
        self.normal.y.to_bits().hash(state);
        self.normal.z.to_bits().hash(state);
    }
}
