//! Struct and functions for working with `Polygon`s from which `Solid`s are composed.

use crate::errors::ValidationError;
use crate::float_types::{EPSILON, Real};
use crate::plane::Plane;
use crate::vertex::Vertex;
use nalgebra::Vector3;

/// A polygon, defined by a loop of three or more vertices, the plane the
/// loop lies in, and an optional metadata payload carried through splits.
#[derive(Debug, Clone)]
pub struct Polygon<S: Clone> {
    /// Vertices defining the polygon, in counter-clockwise winding order
    pub vertices: Vec<Vertex>,
    /// The plane on which this polygon lies, derived from the first three
    /// vertices
    pub plane: Plane,
    /// Generic metadata associated with the polygon
    pub metadata: Option<S>,
}

impl<S: Clone> Polygon<S> {
    /// Create a polygon from vertices, deriving its plane from the first
    /// three.
    ///
    /// # Panics
    /// Panics if `vertices` has fewer than three elements. Use
    /// [`Polygon::try_new`] to validate the loop instead of panicking.
    pub fn new(vertices: Vec<Vertex>, metadata: Option<S>) -> Self {
        assert!(
            vertices.len() >= 3,
            "degenerate polygon: fewer than 3 vertices"
        );
        let plane = Plane::from_vertices(&vertices);
        Polygon {
            vertices,
            plane,
            metadata,
        }
    }

    /// Validating constructor for vertex loops of unknown provenance.
    ///
    /// Returns [`ValidationError::TooFewVertices`] for loops shorter than
    /// three and [`ValidationError::DegeneratePolygon`] when the first three
    /// vertices are collinear or coincident and so cannot define a plane.
    pub fn try_new(vertices: Vec<Vertex>, metadata: Option<S>) -> Result<Self, ValidationError> {
        if vertices.len() < 3 {
            return Err(ValidationError::TooFewVertices(vertices.len()));
        }
        let a = &vertices[0].pos;
        let b = &vertices[1].pos;
        let c = &vertices[2].pos;
        if (b - a).cross(&(c - a)).norm_squared() < EPSILON * EPSILON {
            return Err(ValidationError::DegeneratePolygon(*a));
        }
        Ok(Polygon::new(vertices, metadata))
    }

    /// Reverses winding order, flips vertex normals, and flips the plane
    pub fn flip(&mut self) {
        self.vertices.reverse();
        for v in &mut self.vertices {
            v.flip();
        }
        self.plane.flip();
    }

    /// Fan-triangulate the polygon into triangles `[v0, v[i-1], v[i]]`.
    ///
    /// Correct for the convex loops the splitter and the primitive
    /// generators produce.
    pub fn triangulate(&self) -> Vec<[Vertex; 3]> {
        let mut triangles = Vec::new();
        for i in 2..self.vertices.len() {
            triangles.push([
                self.vertices[0].clone(),
                self.vertices[i - 1].clone(),
                self.vertices[i].clone(),
            ]);
        }
        triangles
    }

    /// Returns an iterator over paired vertices each forming an edge of the polygon
    pub fn edges(&self) -> impl Iterator<Item = (&Vertex, &Vertex)> {
        let len = self.vertices.len();
        (0..len).map(move |i| {
            let j = (i + 1) % len;
            (&self.vertices[i], &self.vertices[j])
        })
    }

    /// Recompute this polygon's normal from all vertices, then set all
    /// vertices' normals to match (flat shading).
    pub fn set_new_normal(&mut self) {
        let n = self.calculate_new_normal();
        for v in &mut self.vertices {
            v.normal = n;
        }
    }

    /// Recompute the polygon normal with Newell's method over every vertex,
    /// oriented to agree with the polygon's current plane.
    ///
    /// More robust than the first-three-vertices cross product when vertex
    /// positions have shifted slightly, since every edge contributes.
    pub fn calculate_new_normal(&self) -> Vector3<Real> {
        let n = self.vertices.len();
        if n < 3 {
            return Vector3::z();
        }

        let mut normal = Vector3::zeros();
        for i in 0..n {
            let current = &self.vertices[i].pos;
            let next = &self.vertices[(i + 1) % n].pos;
            normal.x += (current.y - next.y) * (current.z + next.z);
            normal.y += (current.z - next.z) * (current.x + next.x);
            normal.z += (current.x - next.x) * (current.y + next.y);
        }
        let mut poly_normal = normal.normalize();

        if poly_normal.dot(&self.plane.normal()) < 0.0 {
            poly_normal = -poly_normal;
        }
        poly_normal
    }

    /// Returns a reference to the metadata, if any.
    pub const fn metadata(&self) -> Option<&S> {
        self.metadata.as_ref()
    }

    /// Returns a mutable reference to the metadata, if any.
    pub const fn metadata_mut(&mut self) -> Option<&mut S> {
        self.metadata.as_mut()
    }

    /// Sets the metadata to the given value.
    pub fn set_metadata(&mut self, metadata: S) {
        self.metadata = Some(metadata);
    }
}
