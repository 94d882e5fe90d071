//! Boolean operations (*union*, *difference*, *intersection*, *xor*) on
//! polygon meshes, implemented over [BSP](bsp) trees.
//!
//! A [`Solid`] is a list of polygons bounding a volume. Build one from the
//! [primitive generators](shapes3d) (cube, sphere, cylinder/frustum,
//! polyhedron) or raw polygons, compose solids with the boolean operations,
//! then hand the result to a renderer via [`Solid::to_buffers`] or to a
//! collision/physics layer via [`Solid::to_trimesh`].
//!
//! ```
//! use polycut::Solid;
//! use nalgebra::{Point3, Vector3};
//!
//! let cube = Solid::<()>::cube(Point3::origin(), Vector3::new(1.0, 1.0, 1.0), None);
//! let sphere = Solid::<()>::sphere(1.3, 16, 8, None);
//! let rounded = cube.intersection(&sphere);
//! assert!(!rounded.polygons.is_empty());
//! ```
//!
//! # Features
//! - **f64** (default): use f64 as [`Real`](float_types::Real)
//! - **f32**: use f32 as Real, this conflicts with f64

#![forbid(unsafe_code)]
#![deny(unused)]
#![warn(clippy::missing_const_for_fn, clippy::approx_constant, clippy::all)]

pub mod errors;
pub mod float_types;
pub mod vertex;
pub mod plane;
pub mod polygon;
pub mod bsp;
pub mod solid;
pub mod shapes3d;
pub mod manifold;
pub mod buffers;

#[cfg(any(all(feature = "f64", feature = "f32"), not(any(feature = "f64", feature = "f32"))))]
compile_error!("Either 'f64' or 'f32' feature must be specified, but not both");

pub use plane::Plane;
pub use polygon::Polygon;
pub use solid::Solid;
pub use vertex::Vertex;
