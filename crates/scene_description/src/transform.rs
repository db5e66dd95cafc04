//! Chainable affine transform builder
//!
//! Each operation left-multiplies its elementary matrix onto the accumulated
//! one, so operations apply to points in the order they are called:
//! `Transform::new().scale(2.0, 2.0, 2.0).translate(0.0, 0.0, 3.0)` scales
//! first and then translates. Column vectors, right-handed basis.
//!
//! The emitted form carries the matrix and its inverse-transpose, the
//! latter being what the renderer uses to carry normals.

use approx::abs_diff_eq;
use serde::Serialize;

use crate::foundation::math::{
    constants::{DEGENERATE_EPSILON, SINGULAR_EPSILON},
    utils::{deg_to_rad, from_row_major, to_row_major, vec3},
    Mat3, Mat4, Point3, RowMajor4, Unit, Vec3,
};

/// Transform errors
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum TransformError {
    /// The linear part cannot be inverted
    #[error("Singular matrix: determinant {determinant:e} of the linear block is too close to zero")]
    SingularMatrix {
        /// Determinant of the upper-left 3x3 block
        determinant: f64,
    },

    /// A basis could not be built from the given directions
    #[error("Degenerate basis: {0}")]
    DegenerateBasis(String),

    /// A raw matrix whose last row is not `[0, 0, 0, 1]`
    #[error("Matrix is not affine, last row is {0:?}")]
    NonAffine([f64; 4]),
}

/// Affine 4x4 transform builder
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    matrix: Mat4,
}

impl Default for Transform {
    fn default() -> Self {
        Self::new()
    }
}

impl Transform {
    /// Identity transform
    pub fn new() -> Self {
        Self { matrix: Mat4::identity() }
    }

    /// Accumulated matrix
    pub const fn matrix(&self) -> &Mat4 {
        &self.matrix
    }

    fn then(mut self, piece: &Mat4) -> Self {
        self.matrix = piece * self.matrix;
        self
    }

    /// Append a translation
    pub fn translate(self, x: f64, y: f64, z: f64) -> Self {
        self.then(&Mat4::new_translation(&Vec3::new(x, y, z)))
    }

    /// Append a per-axis scale
    pub fn scale(self, x: f64, y: f64, z: f64) -> Self {
        self.then(&Mat4::new_nonuniform_scaling(&Vec3::new(x, y, z)))
    }

    /// Append a uniform scale
    pub fn scale_uniform(self, s: f64) -> Self {
        self.scale(s, s, s)
    }

    /// Append a rotation of `degrees` around `axis` (right-hand rule)
    pub fn rotate(self, axis: [f64; 3], degrees: f64) -> Result<Self, TransformError> {
        let axis = Unit::try_new(vec3(axis), DEGENERATE_EPSILON).ok_or_else(|| {
            TransformError::DegenerateBasis(format!("rotation axis {axis:?} has zero length"))
        })?;
        Ok(self.then(&Mat4::from_axis_angle(&axis, deg_to_rad(degrees))))
    }

    /// Append a camera-style frame placed at `origin` looking at `target`
    ///
    /// The frame's local +Z maps to the view direction, +Y to the
    /// re-orthogonalized `up` and +X to `cross(up, forward)`.
    pub fn look_at(self, origin: [f64; 3], target: [f64; 3], up: [f64; 3]) -> Result<Self, TransformError> {
        Ok(self.then(&look_at_matrix(vec3(origin), vec3(target), vec3(up))?))
    }

    /// Append a raw matrix given as rows
    pub fn matrix_rows(self, rows: RowMajor4) -> Result<Self, TransformError> {
        if rows[3] != [0.0, 0.0, 0.0, 1.0] {
            return Err(TransformError::NonAffine(rows[3]));
        }
        Ok(self.then(&from_row_major(&rows)))
    }

    /// Apply the transform to a point
    pub fn transform_point(&self, point: [f64; 3]) -> [f64; 3] {
        let p = self.matrix.transform_point(&Point3::from(vec3(point)));
        [p.x, p.y, p.z]
    }

    /// Inverse-transpose of the full affine matrix
    ///
    /// Fails when the determinant of the linear block is within
    /// `SINGULAR_EPSILON` of zero, relative to the cube of its largest entry,
    /// so uniformly tiny but invertible scales still pass.
    pub fn inverse_transpose(&self) -> Result<Mat4, TransformError> {
        let linear: Mat3 = self.matrix.fixed_view::<3, 3>(0, 0).into_owned();
        let determinant = linear.determinant();
        let magnitude = linear.amax();
        if abs_diff_eq!(determinant, 0.0, epsilon = SINGULAR_EPSILON * magnitude.powi(3)) {
            return Err(TransformError::SingularMatrix { determinant });
        }
        let linear_inv = linear
            .try_inverse()
            .ok_or(TransformError::SingularMatrix { determinant })?;
        let translation: Vec3 = self.matrix.fixed_view::<3, 1>(0, 3).into_owned();

        // inverse of [A t; 0 1] is [A^-1  -A^-1 t; 0 1]
        let mut inverse = linear_inv.to_homogeneous();
        inverse
            .fixed_view_mut::<3, 1>(0, 3)
            .copy_from(&(-(linear_inv * translation)));
        Ok(inverse.transpose())
    }

    /// Emitted form of the transform
    pub fn to_document(&self) -> Result<TransformDocument, TransformError> {
        Ok(TransformDocument {
            matrix: to_row_major(&self.matrix),
            inverse_transpose: to_row_major(&self.inverse_transpose()?),
        })
    }
}

fn look_at_matrix(origin: Vec3, target: Vec3, up: Vec3) -> Result<Mat4, TransformError> {
    let view = target - origin;
    if view.norm() <= DEGENERATE_EPSILON {
        return Err(TransformError::DegenerateBasis(
            "look_at target coincides with origin".to_string(),
        ));
    }
    let forward = view.normalize();

    let side = up.cross(&forward);
    if side.norm() <= DEGENERATE_EPSILON {
        return Err(TransformError::DegenerateBasis(
            "look_at up vector is parallel to the view direction".to_string(),
        ));
    }
    let right = side.normalize();
    let true_up = forward.cross(&right);

    Ok(Mat4::new(
        right.x, true_up.x, forward.x, origin.x,
        right.y, true_up.y, forward.y, origin.y,
        right.z, true_up.z, forward.z, origin.z,
        0.0, 0.0, 0.0, 1.0,
    ))
}

/// Transform as written into a scene document
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransformDocument {
    /// Row-major 4x4 matrix
    pub matrix: RowMajor4,
    /// Row-major inverse-transpose of `matrix`
    pub inverse_transpose: RowMajor4,
}
