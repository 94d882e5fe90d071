//! Primitive solid generators: cube, sphere, frustum/cylinder, and raw
//! polyhedron input. Each returns a flat polygon list ready to feed into
//! boolean composition.

use crate::errors::ValidationError;
use crate::float_types::{EPSILON, PI, Real, TAU};
use crate::polygon::Polygon;
use crate::solid::Solid;
use crate::vertex::Vertex;
use nalgebra::{Point3, Vector3};
use std::fmt::Debug;

impl<S: Clone + Send + Sync + Debug> Solid<S> {
    /// An axis-aligned cuboid spanning `center ± radius` on each axis.
    ///
    /// Produces 6 quads with outward counter-clockwise winding; all 4
    /// vertices of a face share that face's axis-aligned normal (flat
    /// shading).
    pub fn cube(center: Point3<Real>, radius: Vector3<Real>, metadata: Option<S>) -> Solid<S> {
        let min = center - radius;
        let max = center + radius;

        // Corner naming: pXYZ, 0 = min coordinate, 1 = max coordinate.
        let p000 = Point3::new(min.x, min.y, min.z);
        let p100 = Point3::new(max.x, min.y, min.z);
        let p110 = Point3::new(max.x, max.y, min.z);
        let p010 = Point3::new(min.x, max.y, min.z);

        let p001 = Point3::new(min.x, min.y, max.z);
        let p101 = Point3::new(max.x, min.y, max.z);
        let p111 = Point3::new(max.x, max.y, max.z);
        let p011 = Point3::new(min.x, max.y, max.z);

        // Bottom face (z = min, normal -Z)
        let bottom_normal = -Vector3::z();
        let bottom = Polygon::new(
            vec![
                Vertex::new(p000, bottom_normal),
                Vertex::new(p010, bottom_normal),
                Vertex::new(p110, bottom_normal),
                Vertex::new(p100, bottom_normal),
            ],
            metadata.clone(),
        );

        // Top face (z = max, normal +Z)
        let top_normal = Vector3::z();
        let top = Polygon::new(
            vec![
                Vertex::new(p001, top_normal),
                Vertex::new(p101, top_normal),
                Vertex::new(p111, top_normal),
                Vertex::new(p011, top_normal),
            ],
            metadata.clone(),
        );

        // Front face (y = min, normal -Y)
        let front_normal = -Vector3::y();
        let front = Polygon::new(
            vec![
                Vertex::new(p000, front_normal),
                Vertex::new(p100, front_normal),
                Vertex::new(p101, front_normal),
                Vertex::new(p001, front_normal),
            ],
            metadata.clone(),
        );

        // Back face (y = max, normal +Y)
        let back_normal = Vector3::y();
        let back = Polygon::new(
            vec![
                Vertex::new(p010, back_normal),
                Vertex::new(p011, back_normal),
                Vertex::new(p111, back_normal),
                Vertex::new(p110, back_normal),
            ],
            metadata.clone(),
        );

        // Left face (x = min, normal -X)
        let left_normal = -Vector3::x();
        let left = Polygon::new(
            vec![
                Vertex::new(p000, left_normal),
                Vertex::new(p001, left_normal),
                Vertex::new(p011, left_normal),
                Vertex::new(p010, left_normal),
            ],
            metadata.clone(),
        );

        // Right face (x = max, normal +X)
        let right_normal = Vector3::x();
        let right = Polygon::new(
            vec![
                Vertex::new(p100, right_normal),
                Vertex::new(p110, right_normal),
                Vertex::new(p111, right_normal),
                Vertex::new(p101, right_normal),
            ],
            metadata.clone(),
        );

        Solid::from_polygons(&[bottom, top, front, back, left, right], metadata)
    }

    /// A UV sphere of the given `radius` centered at the origin,
    /// tessellated into `segments` slices around the pole axis and
    /// `stacks` rows between the poles (16 × 8 is the usual density).
    ///
    /// Vertex normals are the unit direction from the center, so the
    /// surface shades smooth. Pole rows emit triangles, interior rows
    /// quads.
    pub fn sphere(
        radius: Real,
        segments: usize,
        stacks: usize,
        metadata: Option<S>,
    ) -> Solid<S> {
        let mut polygons = Vec::new();

        for i in 0..segments {
            for j in 0..stacks {
                let mut vertices = Vec::new();

                let vertex = |theta: Real, phi: Real| {
                    let dir =
                        Vector3::new(theta.cos() * phi.sin(), phi.cos(), theta.sin() * phi.sin());
                    Vertex::new(
                        Point3::new(dir.x * radius, dir.y * radius, dir.z * radius),
                        dir,
                    )
                };

                let theta0 = i as Real / segments as Real * TAU;
                let theta1 = (i + 1) as Real / segments as Real * TAU;
                let phi0 = j as Real / stacks as Real * PI;
                let phi1 = (j + 1) as Real / stacks as Real * PI;

                vertices.push(vertex(theta0, phi0));
                if j > 0 {
                    vertices.push(vertex(theta1, phi0));
                }
                if j < stacks - 1 {
                    vertices.push(vertex(theta1, phi1));
                }
                vertices.push(vertex(theta0, phi1));

                polygons.push(Polygon::new(vertices, metadata.clone()));
            }
        }
        Solid::from_polygons(&polygons, metadata)
    }

    /// A frustum from `start` to `end` with bottom radius `radius1` and top
    /// radius `radius2`, tessellated into `segments` slices (must be ≥ 3).
    ///
    /// Caps are triangle fans; the side is a ruled quad strip whose normals
    /// blend the radial direction with the axis direction at the cap
    /// boundaries, giving smooth side shading with sharp cap transitions.
    /// A radius within [`EPSILON`] of zero collapses that end to an apex:
    /// no cap there and triangle sides. Both ends degenerate, or start and
    /// end coincident, yields an empty Solid.
    pub fn frustum_ptp(
        start: Point3<Real>,
        end: Point3<Real>,
        radius1: Real,
        radius2: Real,
        segments: usize,
        metadata: Option<S>,
    ) -> Solid<S> {
        let s = start.coords;
        let ray = end.coords - s;
        if ray.norm_squared() < EPSILON {
            return Solid::new();
        }
        let axis_z = ray.normalize();
        // Pick a seed axis not parallel to axis_z for the radial frame.
        let axis_x = if axis_z.y.abs() > 0.5 {
            Vector3::x()
        } else {
            Vector3::y()
        }
        .cross(&axis_z)
        .normalize();
        let axis_y = axis_x.cross(&axis_z).normalize();

        let start_v = Vertex::new(start, -axis_z);
        let end_v = Vertex::new(end, axis_z);

        // Vertex on the lateral surface: `stack` 0 at the bottom ring and 1
        // at the top, `slice` the fraction around the circle, `normal_blend`
        // -1 / 0 / 1 for bottom cap / side / top cap shading.
        let point = |stack: Real, slice: Real, normal_blend: Real| {
            let r = radius1 * (1.0 - stack) + radius2 * stack;
            let angle = slice * TAU;
            let radial_dir = axis_x * angle.cos() + axis_y * angle.sin();
            let pos = s + ray * stack + radial_dir * r;
            let normal = radial_dir * (1.0 - normal_blend.abs()) + axis_z * normal_blend;
            Vertex::new(Point3::from(pos), normal.normalize())
        };

        let bottom_degenerate = radius1.abs() < EPSILON;
        let top_degenerate = radius2.abs() < EPSILON;
        if bottom_degenerate && top_degenerate {
            return Solid::new();
        }

        let mut polygons = Vec::new();
        for i in 0..segments {
            let slice0 = i as Real / segments as Real;
            let slice1 = (i + 1) as Real / segments as Real;

            if !bottom_degenerate {
                polygons.push(Polygon::new(
                    vec![
                        start_v.clone(),
                        point(0.0, slice0, -1.0),
                        point(0.0, slice1, -1.0),
                    ],
                    metadata.clone(),
                ));
            }
            if !top_degenerate {
                polygons.push(Polygon::new(
                    vec![
                        end_v.clone(),
                        point(1.0, slice1, 1.0),
                        point(1.0, slice0, 1.0),
                    ],
                    metadata.clone(),
                ));
            }

            if bottom_degenerate {
                // Bottom ring is the apex point; sides are triangles.
                polygons.push(Polygon::new(
                    vec![
                        start_v.clone(),
                        point(1.0, slice0, 0.0),
                        point(1.0, slice1, 0.0),
                    ],
                    metadata.clone(),
                ));
            } else if top_degenerate {
                polygons.push(Polygon::new(
                    vec![
                        point(0.0, slice1, 0.0),
                        point(0.0, slice0, 0.0),
                        end_v.clone(),
                    ],
                    metadata.clone(),
                ));
            } else {
                polygons.push(Polygon::new(
                    vec![
                        point(0.0, slice1, 0.0),
                        point(0.0, slice0, 0.0),
                        point(1.0, slice0, 0.0),
                        point(1.0, slice1, 0.0),
                    ],
                    metadata.clone(),
                ));
            }
        }

        Solid::from_polygons(&polygons, metadata)
    }

    /// A vertical cylinder along +Z from the origin to `(0, 0, height)`
    /// with the given `radius` (not diameter).
    pub fn cylinder(radius: Real, height: Real, segments: usize, metadata: Option<S>) -> Solid<S> {
        Solid::frustum_ptp(
            Point3::origin(),
            Point3::new(0.0, 0.0, height),
            radius,
            radius,
            segments,
            metadata,
        )
    }

    /// A polyhedron from raw vertex data (`points`) and face index loops.
    ///
    /// Every vertex of a face gets the face plane's normal (flat shading).
    ///
    /// ## Errors
    /// - [`ValidationError::InvalidCoordinate`] for a NaN or infinite point,
    /// - [`ValidationError::IndexOutOfRange`] for a face index past the end
    ///   of `points`,
    /// - [`ValidationError::TooFewVertices`] /
    ///   [`ValidationError::DegeneratePolygon`] for faces that do not
    ///   define a plane.
    pub fn polyhedron(
        points: &[[Real; 3]],
        faces: &[Vec<usize>],
        metadata: Option<S>,
    ) -> Result<Solid<S>, ValidationError> {
        for &[x, y, z] in points {
            if !(x.is_finite() && y.is_finite() && z.is_finite()) {
                return Err(ValidationError::InvalidCoordinate(Point3::new(x, y, z)));
            }
        }

        let mut polygons = Vec::with_capacity(faces.len());
        for face in faces {
            let mut face_vertices = Vec::with_capacity(face.len());
            for &idx in face {
                if idx >= points.len() {
                    return Err(ValidationError::IndexOutOfRange {
                        index: idx,
                        len: points.len(),
                    });
                }
                let [x, y, z] = points[idx];
                // Normals are filled in from the face plane below.
                face_vertices.push(Vertex::new(Point3::new(x, y, z), Vector3::zeros()));
            }

            let mut poly = Polygon::try_new(face_vertices, metadata.clone())?;
            let plane_normal = poly.plane.normal;
            for v in &mut poly.vertices {
                v.normal = plane_normal;
            }
            polygons.push(poly);
        }

        Ok(Solid::from_polygons(&polygons, metadata))
    }
}
