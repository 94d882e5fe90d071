//! `Solid` struct, the boolean operations over it, and its transform and
//! query helpers.

use crate::bsp::Node;
use crate::errors::ValidationError;
use crate::float_types::{
    EPSILON, Real,
    parry3d::{
        bounding_volume::Aabb,
        query::{Ray, RayCast},
        shape::{Shape, TriMesh, Triangle},
    },
};
use crate::plane::Plane;
use crate::polygon::Polygon;
use crate::vertex::Vertex;
use nalgebra::{
    Isometry3, Matrix3, Matrix4, Point3, Quaternion, Rotation3, Translation3, Unit, Vector3,
    partial_max, partial_min,
};
use std::{fmt::Debug, sync::OnceLock};

/// A solid bounded by a list of polygons. The unit a boolean operation
/// takes in and hands back.
#[derive(Debug, Clone)]
pub struct Solid<S: Clone + Send + Sync + Debug> {
    /// 3D polygons bounding the volume
    pub polygons: Vec<Polygon<S>>,

    /// Lazily calculated AABB that spans `polygons`.
    pub bounding_box: OnceLock<Aabb>,

    /// Metadata
    pub metadata: Option<S>,
}

impl<S: Clone + Send + Sync + Debug> Default for Solid<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Clone + Send + Sync + Debug> Solid<S> {
    /// Create an empty Solid
    pub const fn new() -> Self {
        Solid {
            polygons: Vec::new(),
            bounding_box: OnceLock::new(),
            metadata: None,
        }
    }

    /// Build a Solid from an existing polygon list
    pub fn from_polygons(polygons: &[Polygon<S>], metadata: Option<S>) -> Self {
        let mut solid = Solid::new();
        solid.polygons = polygons.to_vec();
        solid.metadata = metadata;
        solid
    }

    /// Helper to collect all vertices from the Solid.
    pub fn vertices(&self) -> Vec<Vertex> {
        self.polygons
            .iter()
            .flat_map(|p| p.vertices.clone())
            .collect()
    }

    /// Return a new Solid representing union of the two Solids.
    ///
    /// ```text
    /// let c = a.union(b);
    ///     +-------+            +-------+
    ///     |       |            |       |
    ///     |   a   |            |   c   |
    ///     |    +--+----+   =   |       +----+
    ///     +----+--+    |       +----+       |
    ///          |   b   |            |   c   |
    ///          |       |            |       |
    ///          +-------+            +-------+
    /// ```
    #[must_use = "Use new Solid representing space in both Solids"]
    pub fn union(&self, other: &Solid<S>) -> Solid<S> {
        let mut a = Node::from_polygons(&self.polygons);
        let mut b = Node::from_polygons(&other.polygons);

        a.clip_to(&b);
        b.clip_to(&a);
        b.invert();
        b.clip_to(&a);
        b.invert();
        a.build(&b.all_polygons());

        Solid {
            polygons: a.all_polygons(),
            bounding_box: OnceLock::new(),
            metadata: self.metadata.clone(),
        }
    }

    /// Return a new Solid representing difference of the two Solids.
    ///
    /// ```text
    /// let c = a.difference(b);
    ///     +-------+            +-------+
    ///     |       |            |       |
    ///     |   a   |            |   c   |
    ///     |    +--+----+   =   |    +--+
    ///     +----+--+    |       +----+
    ///          |   b   |
    ///          |       |
    ///          +-------+
    /// ```
    #[must_use = "Use new Solid representing space of self not shared with other"]
    pub fn difference(&self, other: &Solid<S>) -> Solid<S> {
        let mut a = Node::from_polygons(&self.polygons);
        let mut b = Node::from_polygons(&other.polygons);

        a.invert();
        a.clip_to(&b);
        b.clip_to(&a);
        b.invert();
        b.clip_to(&a);
        b.invert();
        a.build(&b.all_polygons());
        a.invert();

        Solid {
            polygons: a.all_polygons(),
            bounding_box: OnceLock::new(),
            metadata: self.metadata.clone(),
        }
    }

    /// Return a new Solid representing intersection of the two Solids.
    ///
    /// ```text
    /// let c = a.intersection(b);
    ///     +-------+
    ///     |       |
    ///     |   a   |
    ///     |    +--+----+   =   +--+
    ///     +----+--+    |       +--+
    ///          |   b   |
    ///          |       |
    ///          +-------+
    /// ```
    #[must_use = "Use new Solid representing space shared by both Solids"]
    pub fn intersection(&self, other: &Solid<S>) -> Solid<S> {
        let mut a = Node::from_polygons(&self.polygons);
        let mut b = Node::from_polygons(&other.polygons);

        a.invert();
        b.clip_to(&a);
        b.invert();
        a.clip_to(&b);
        b.clip_to(&a);
        a.build(&b.all_polygons());
        a.invert();

        Solid {
            polygons: a.all_polygons(),
            bounding_box: OnceLock::new(),
            metadata: self.metadata.clone(),
        }
    }

    /// Return a new Solid representing space in this Solid excluding the
    /// space in the other Solid plus the space in the other Solid
    /// excluding the space in this Solid.
    ///
    /// ```text
    /// let c = a.xor(b);
    ///     +-------+            +-------+
    ///     |       |            |       |
    ///     |   a   |            |   a   |
    ///     |    +--+----+   =   |    +--+----+
    ///     +----+--+    |       +----+--+    |
    ///          |   b   |            |       |
    ///          |       |            |       |
    ///          +-------+            +-------+
    /// ```
    #[must_use = "Use new Solid representing space in one of the Solids but not both"]
    pub fn xor(&self, other: &Solid<S>) -> Solid<S> {
        // A \ B
        let a_sub_b = self.difference(other);

        // B \ A
        let b_sub_a = other.difference(self);

        // Union those two
        a_sub_b.union(&b_sub_a)
    }

    /// Invert this Solid (flip inside vs. outside)
    pub fn inverse(&self) -> Solid<S> {
        let mut solid = self.clone();
        for p in &mut solid.polygons {
            p.flip();
        }
        solid
    }

    /// Triangulate each polygon in the Solid returning a Solid containing triangles
    #[must_use = "Use the new Solid"]
    pub fn triangulate(&self) -> Solid<S> {
        let triangles = self
            .polygons
            .iter()
            .flat_map(|poly| {
                poly.triangulate()
                    .into_iter()
                    .map(move |triangle| Polygon::new(triangle.to_vec(), poly.metadata.clone()))
            })
            .collect::<Vec<_>>();

        Solid::from_polygons(&triangles, self.metadata.clone())
    }

    /// Recompute each polygon's normal from its full vertex loop and push
    /// the result into its vertices (flat shading).
    pub fn renormalize(&mut self) {
        for poly in &mut self.polygons {
            poly.set_new_normal();
        }
    }

    /// Apply an arbitrary 3D transform (as a 4x4 matrix) to the solid.
    /// Vertex positions are transformed by the matrix, normals by its
    /// inverse transpose, and each polygon's plane is recomputed from its
    /// transformed vertices.
    ///
    /// # Panics
    /// Panics if `mat` is not invertible or maps a vertex to infinity.
    #[must_use = "Use the new Solid"]
    pub fn transform(&self, mat: &Matrix4<Real>) -> Solid<S> {
        let mat_inv_transpose = mat
            .try_inverse()
            .expect("Matrix not invertible?")
            .transpose();
        let mut solid = self.clone();

        for poly in &mut solid.polygons {
            for vert in &mut poly.vertices {
                let hom_pos = mat * vert.pos.to_homogeneous();
                vert.pos =
                    Point3::from_homogeneous(hom_pos).expect("Matrix mapped a vertex to infinity");

                vert.normal = mat_inv_transpose.transform_vector(&vert.normal).normalize();
            }

            if poly.vertices.len() >= 3 {
                poly.plane = Plane::from_vertices(&poly.vertices);
            }
        }

        solid.bounding_box = OnceLock::new();
        solid
    }

    /// Returns a new Solid translated by x, y, and z.
    #[must_use = "Use the new Solid"]
    pub fn translate(&self, x: Real, y: Real, z: Real) -> Solid<S> {
        self.translate_vector(Vector3::new(x, y, z))
    }

    /// Returns a new Solid translated by vector.
    #[must_use = "Use the new Solid"]
    pub fn translate_vector(&self, vector: Vector3<Real>) -> Solid<S> {
        let translation = Translation3::from(vector);
        self.transform(&translation.to_homogeneous())
    }

    /// Returns a new Solid translated so that its bounding-box center is
    /// at the origin (0,0,0).
    #[must_use = "Use the new Solid"]
    pub fn center(&self) -> Self {
        let aabb = self.bounding_box();

        let center_x = (aabb.mins.x + aabb.maxs.x) * 0.5;
        let center_y = (aabb.mins.y + aabb.maxs.y) * 0.5;
        let center_z = (aabb.mins.z + aabb.maxs.z) * 0.5;

        self.translate(-center_x, -center_y, -center_z)
    }

    /// Translates the Solid so that its bottommost points sit exactly at
    /// z = 0.
    #[must_use = "Use the new Solid"]
    pub fn float(&self) -> Self {
        let aabb = self.bounding_box();
        self.translate(0.0, 0.0, -aabb.mins.z)
    }

    /// Rotates the Solid by `x_deg`, `y_deg`, `z_deg` degrees, applied as
    /// successive rotations about the x, y, then z axis.
    #[must_use = "Use the new Solid"]
    pub fn rotate(&self, x_deg: Real, y_deg: Real, z_deg: Real) -> Solid<S> {
        let rx = Rotation3::from_axis_angle(&Vector3::x_axis(), x_deg.to_radians());
        let ry = Rotation3::from_axis_angle(&Vector3::y_axis(), y_deg.to_radians());
        let rz = Rotation3::from_axis_angle(&Vector3::z_axis(), z_deg.to_radians());

        let rot = rz * ry * rx;
        self.transform(&rot.to_homogeneous())
    }

    /// Scales the Solid by `sx`, `sy`, `sz`
    #[must_use = "Use the new Solid"]
    pub fn scale(&self, sx: Real, sy: Real, sz: Real) -> Solid<S> {
        let mat4 = Matrix4::new_nonuniform_scaling(&Vector3::new(sx, sy, sz));
        self.transform(&mat4)
    }

    /// Reflect (mirror) this Solid about an arbitrary plane `plane`.
    ///
    /// The plane is specified by:
    ///   `plane.normal` = the plane's normal vector (need not be unit),
    ///   `plane.w`      = the dot-product with that normal for points on the plane (offset).
    ///
    /// Returns a new Solid whose geometry is mirrored accordingly.
    #[must_use = "Use the new Solid"]
    pub fn mirror(&self, plane: &Plane) -> Self {
        // Normal might not be unit, so compute its length:
        let len = plane.normal.norm();
        if len.abs() < EPSILON {
            // Degenerate plane? Just return clone (no transform)
            return self.clone();
        }

        // Unit normal and adjusted offset
        let n = plane.normal / len;
        let w = plane.w / len;

        // Translate the plane to the origin, reflect with R = I - 2 n n^T,
        // then translate back.
        let offset = n * w;
        let t1 = Translation3::from(-offset).to_homogeneous();

        let mut reflect_4 = Matrix4::identity();
        let reflect_3 = Matrix3::identity() - 2.0 * n * n.transpose();
        reflect_4.fixed_view_mut::<3, 3>(0, 0).copy_from(&reflect_3);

        let t2 = Translation3::from(offset).to_homogeneous();

        let mirror_mat = t2 * reflect_4 * t1;

        // Reflection reverses winding, so flip the result back outward.
        self.transform(&mirror_mat).inverse()
    }

    /// Returns an AABB spanning all polygons, cached after the first call.
    pub fn bounding_box(&self) -> Aabb {
        *self.bounding_box.get_or_init(|| {
            // Track overall min/max in x, y, z among all 3D polygons
            let mut min_x = Real::MAX;
            let mut min_y = Real::MAX;
            let mut min_z = Real::MAX;
            let mut max_x = -Real::MAX;
            let mut max_y = -Real::MAX;
            let mut max_z = -Real::MAX;

            for poly in &self.polygons {
                for v in &poly.vertices {
                    min_x = *partial_min(&min_x, &v.pos.x).unwrap();
                    min_y = *partial_min(&min_y, &v.pos.y).unwrap();
                    min_z = *partial_min(&min_z, &v.pos.z).unwrap();

                    max_x = *partial_max(&max_x, &v.pos.x).unwrap();
                    max_y = *partial_max(&max_y, &v.pos.y).unwrap();
                    max_z = *partial_max(&max_z, &v.pos.z).unwrap();
                }
            }

            // If still uninitialized (e.g., no polygons), return a trivial AABB at origin
            if min_x > max_x {
                return Aabb::new(Point3::origin(), Point3::origin());
            }

            let mins = Point3::new(min_x, min_y, min_z);
            let maxs = Point3::new(max_x, max_y, max_z);
            Aabb::new(mins, maxs)
        })
    }

    /// Casts a ray defined by `origin` + t * `direction` against all triangles
    /// of this Solid and returns a list of (intersection_point, distance),
    /// sorted by ascending distance.
    ///
    /// # Parameters
    /// - `origin`: The ray's start point.
    /// - `direction`: The ray's direction vector.
    ///
    /// # Returns
    /// A `Vec` of `(Point3<Real>, Real)` where:
    /// - `Point3<Real>` is the intersection coordinate in 3D,
    /// - `Real` is the distance (the ray parameter t) from `origin`.
    pub fn ray_intersections(
        &self,
        origin: &Point3<Real>,
        direction: &Vector3<Real>,
    ) -> Vec<(Point3<Real>, Real)> {
        let ray = Ray::new(*origin, *direction);
        let iso = Isometry3::identity(); // No transformation on the triangles themselves.

        let mut hits = Vec::new();

        for poly in &self.polygons {
            for tri in poly.triangulate() {
                let triangle = Triangle::new(tri[0].pos, tri[1].pos, tri[2].pos);

                if let Some(hit) = triangle.cast_ray_and_get_normal(&iso, &ray, Real::MAX, true) {
                    let point_on_ray = ray.point_at(hit.time_of_impact);
                    hits.push((Point3::from(point_on_ray.coords), hit.time_of_impact));
                }
            }
        }

        // Sort hits by ascending distance, then remove duplicate hits that
        // fall within tolerance (shared triangle edges report twice).
        hits.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));
        hits.dedup_by(|a, b| (a.1 - b.1).abs() < EPSILON);

        hits
    }

    /// Uses ray parity against the boundary to check whether a point is
    /// inside the solid.
    ///
    /// ## Example
    /// ```
    /// # use polycut::Solid;
    /// # use nalgebra::{Point3, Vector3};
    /// let cube = Solid::<()>::cube(Point3::origin(), Vector3::new(3.0, 3.0, 3.0), None);
    ///
    /// assert!(cube.contains_vertex(&Point3::new(0.2, 0.5, -1.0)));
    ///
    /// assert!(!cube.contains_vertex(&Point3::new(4.0, 0.0, 0.0)));
    /// assert!(!cube.contains_vertex(&Point3::new(0.1, 0.3, -3.5)));
    /// ```
    pub fn contains_vertex(&self, point: &Point3<Real>) -> bool {
        self.ray_intersections(point, &Vector3::new(1.0, 1.0, 1.0))
            .len()
            % 2
            == 1
    }

    /// Convert the polygons in this Solid to a Parry `TriMesh`, useful for
    /// collision detection or physics simulations.
    ///
    /// ## Errors
    /// Fails when the triangulated polygon set is empty or topologically
    /// unusable for a triangle mesh.
    pub fn to_trimesh(&self) -> Result<TriMesh, ValidationError> {
        let tri_solid = self.triangulate();
        let vertices = tri_solid
            .polygons
            .iter()
            .flat_map(|p| [p.vertices[0].pos, p.vertices[1].pos, p.vertices[2].pos])
            .collect();

        let indices = (0..tri_solid.polygons.len())
            .map(|i| {
                let offset = i as u32 * 3;
                [offset, offset + 1, offset + 2]
            })
            .collect();

        Ok(TriMesh::new(vertices, indices)?)
    }

    /// Approximate mass properties using Parry. Returns
    /// `(mass, center_of_mass, principal_inertia_local_frame)` for the
    /// solid at the given `density`.
    ///
    /// ## Errors
    /// Propagates any [`ValidationError`] from [`Solid::to_trimesh`].
    pub fn mass_properties(
        &self,
        density: Real,
    ) -> Result<(Real, Point3<Real>, Unit<Quaternion<Real>>), ValidationError> {
        let trimesh = self.to_trimesh()?;
        let mp = trimesh.mass_properties(density);

        Ok((
            mp.mass(),
            mp.local_com,                     // a Point3<Real>
            mp.principal_inertia_local_frame, // a Unit<Quaternion<Real>>
        ))
    }
}
