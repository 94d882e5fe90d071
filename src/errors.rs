//! Validation errors

use crate::float_types::Real;
use nalgebra::Point3;
use std::fmt::Display;

/// All the possible validation issues we might encounter
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// (TooFewVertices) A polygon or face has fewer than 3 vertices
    TooFewVertices(usize),
    /// (DegeneratePolygon) The first three vertices are collinear or
    /// coincident and do not define a plane
    DegeneratePolygon(Point3<Real>),
    /// (IndexOutOfRange) A face refers to a point index past the end of the
    /// point list
    IndexOutOfRange { index: usize, len: usize },
    /// (InvalidCoordinate) The coordinate has a NaN or infinite
    InvalidCoordinate(Point3<Real>),
    /// Indicates an inconsistency while building a triangle mesh
    TriMesh(#[from] crate::float_types::parry3d::shape::TriMeshBuilderError),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::TooFewVertices(count) => write!(
                f,
                "(TooFewVertices) A polygon needs at least 3 vertices, got: {}",
                count
            ),
            ValidationError::DegeneratePolygon(opoint) => write!(
                f,
                "(DegeneratePolygon) Vertices do not define a plane at: {}",
                opoint
            ),
            ValidationError::IndexOutOfRange { index, len } => write!(
                f,
                "(IndexOutOfRange) Face index {} is out of range (points.len = {})",
                index, len
            ),
            ValidationError::InvalidCoordinate(opoint) => write!(
                f,
                "(InvalidCoordinate) The coordinate ({}) has a NaN or infinite",
                opoint
            ),
            ValidationError::TriMesh(tri_mesh_builder_error) => {
                tri_mesh_builder_error.fmt(f)
            },
        }
    }
}
