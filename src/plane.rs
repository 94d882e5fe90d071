//! Planes in 3D space, point classification, and the polygon splitter
//! used by BSP construction and clipping.

use crate::float_types::{EPSILON, Real};
use crate::polygon::Polygon;
use crate::vertex::Vertex;
use nalgebra::{Point3, Vector3};

/// Position of geometry relative to a plane, within [`EPSILON`] tolerance.
///
/// The four values form a small lattice under [`Orientation::combine`]:
/// `Coplanar` is the identity, `Front` and `Back` absorb themselves, and any
/// mix of the two sides is `Spanning`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Coplanar,
    Front,
    Back,
    Spanning,
}

impl Orientation {
    /// Fold another classification into this one, yielding the verdict for
    /// the combined geometry. Folding a polygon's per-vertex classifications
    /// with this gives the classification of the whole polygon.
    pub const fn combine(self, other: Orientation) -> Orientation {
        match (self, other) {
            (Orientation::Coplanar, o) | (o, Orientation::Coplanar) => o,
            (Orientation::Front, Orientation::Front) => Orientation::Front,
            (Orientation::Back, Orientation::Back) => Orientation::Back,
            _ => Orientation::Spanning,
        }
    }
}

/// A plane in 3D space, stored as a unit normal and the signed distance `w`
/// from the origin, so that `normal.dot(p) == w` for every point `p` on the
/// plane.
#[derive(Debug, Clone, PartialEq)]
pub struct Plane {
    /// Unit normal
    pub normal: Vector3<Real>,
    /// Signed distance from the origin along `normal`
    pub w: Real,
}

impl Plane {
    /// Build a plane from a `normal` (not necessarily unit) and offset `w`
    /// for the equation `normal.dot(p) == w`; both are rescaled so the
    /// stored normal is unit length.
    pub fn from_normal(normal: Vector3<Real>, w: Real) -> Self {
        let len = normal.norm();
        Plane {
            normal: normal / len,
            w: w / len,
        }
    }

    /// Derive the plane supporting the triangle `a`, `b`, `c` with the
    /// right-hand winding rule: `normal = normalize((b - a) × (c - a))`.
    ///
    /// A degenerate triple (collinear or coincident points) has no
    /// well-defined normal; the result will misclassify every subsequent
    /// split. [`Polygon::try_new`] rejects such loops up front for callers
    /// that want the check.
    pub fn from_points(a: &Point3<Real>, b: &Point3<Real>, c: &Point3<Real>) -> Plane {
        let normal = (b - a).cross(&(c - a)).normalize();
        Plane {
            normal,
            w: normal.dot(&a.coords),
        }
    }

    /// Derive the supporting plane of a vertex loop from its first three
    /// vertices.
    ///
    /// # Panics
    /// Panics if `vertices` has fewer than three elements.
    pub fn from_vertices(vertices: &[Vertex]) -> Plane {
        Plane::from_points(&vertices[0].pos, &vertices[1].pos, &vertices[2].pos)
    }

    /// The plane's unit normal.
    pub const fn normal(&self) -> Vector3<Real> {
        self.normal
    }

    /// Signed distance of the plane from the origin along [`Self::normal`].
    pub const fn offset(&self) -> Real {
        self.w
    }

    /// Flip the plane in place, reversing which side counts as front.
    pub fn flip(&mut self) {
        self.normal = -self.normal;
        self.w = -self.w;
    }

    /// Return a flipped copy of this plane.
    #[must_use = "flipped returns a new Plane and does not modify the original"]
    pub fn flipped(&self) -> Self {
        Plane {
            normal: -self.normal,
            w: -self.w,
        }
    }

    /// Classify `point` against the plane within [`EPSILON`] tolerance.
    pub fn orient_point(&self, point: &Point3<Real>) -> Orientation {
        let t = self.normal.dot(&point.coords) - self.w;
        if t < -EPSILON {
            Orientation::Back
        } else if t > EPSILON {
            Orientation::Front
        } else {
            Orientation::Coplanar
        }
    }

    /// Parametric `t` at which the ray `origin + t * direction` meets the
    /// plane.
    ///
    /// A ray parallel to the plane divides by a near-zero denominator and
    /// yields an infinite or NaN `t`; callers filter those out.
    pub fn intersect_ray(&self, origin: &Point3<Real>, direction: &Vector3<Real>) -> Real {
        (self.w - self.normal.dot(&origin.coords)) / self.normal.dot(direction)
    }

    /// Split `polygon` by this plane if needed, then put the polygon or
    /// polygon fragments in the appropriate lists.
    ///
    /// Coplanar polygons go into either `coplanar_front` or `coplanar_back`
    /// depending on their orientation with respect to this plane. Polygons
    /// in front or in back of this plane go into either `front` or `back`.
    /// A spanning polygon is cut along the plane: each side keeps its
    /// vertices plus a shared interpolated vertex per crossing edge, and a
    /// side that ends up with fewer than three vertices is a zero-area
    /// sliver and is dropped.
    pub fn split_polygon<S: Clone>(
        &self,
        polygon: &Polygon<S>,
        coplanar_front: &mut Vec<Polygon<S>>,
        coplanar_back: &mut Vec<Polygon<S>>,
        front: &mut Vec<Polygon<S>>,
        back: &mut Vec<Polygon<S>>,
    ) {
        let types: Vec<Orientation> = polygon
            .vertices
            .iter()
            .map(|v| self.orient_point(&v.pos))
            .collect();
        let polygon_type = types
            .iter()
            .fold(Orientation::Coplanar, |acc, &t| acc.combine(t));

        match polygon_type {
            Orientation::Coplanar => {
                // Same-facing coplanar polygons are kept apart from
                // opposite-facing ones so boolean ops can resolve
                // overlapping coplanar faces.
                if self.normal.dot(&polygon.plane.normal) > 0.0 {
                    coplanar_front.push(polygon.clone());
                } else {
                    coplanar_back.push(polygon.clone());
                }
            },
            Orientation::Front => front.push(polygon.clone()),
            Orientation::Back => back.push(polygon.clone()),
            Orientation::Spanning => {
                let mut f = Vec::new();
                let mut b = Vec::new();
                for i in 0..polygon.vertices.len() {
                    // j wraps around to close the loop on the last edge
                    let j = (i + 1) % polygon.vertices.len();
                    let ti = types[i];
                    let tj = types[j];
                    let vi = &polygon.vertices[i];
                    let vj = &polygon.vertices[j];

                    if ti != Orientation::Back {
                        f.push(vi.clone());
                    }
                    if ti != Orientation::Front {
                        b.push(vi.clone());
                    }
                    // An edge with one endpoint on each side crosses the
                    // plane; both fragments share the intersection vertex.
                    if ti.combine(tj) == Orientation::Spanning {
                        let t = (self.w - self.normal.dot(&vi.pos.coords))
                            / self.normal.dot(&(vj.pos - vi.pos));
                        let v = vi.interpolate(vj, t);
                        f.push(v.clone());
                        b.push(v);
                    }
                }
                if f.len() >= 3 {
                    front.push(Polygon::new(f, polygon.metadata.clone()));
                }
                if b.len() >= 3 {
                    back.push(Polygon::new(b, polygon.metadata.clone()));
                }
            },
        }
    }
}
