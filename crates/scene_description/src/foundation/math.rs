//! Math utilities and types
//!
//! Double precision aliases over nalgebra used by the transform engine.
//! Scene documents are consumed by a renderer that does its own conversion
//! to single precision, so everything on this side stays in `f64`.

pub use nalgebra::{Matrix3, Matrix4, Unit, Vector3};

/// 3D vector type
pub type Vec3 = Vector3<f64>;

/// 3x3 matrix type
pub type Mat3 = Matrix3<f64>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f64>;

/// 3D point type
pub type Point3 = nalgebra::Point3<f64>;

/// Row-major 4x4 matrix as it appears in an emitted document
pub type RowMajor4 = [[f64; 4]; 4];

/// Math constants
pub mod constants {
    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f64 = std::f64::consts::PI / 180.0;

    /// Radians to degrees conversion factor
    pub const RAD_TO_DEG: f64 = 180.0 / std::f64::consts::PI;

    /// Tolerance below which a determinant counts as zero, relative to the
    /// cube of the largest matrix entry
    pub const SINGULAR_EPSILON: f64 = 1e-12;

    /// Tolerance below which a direction vector counts as zero length
    pub const DEGENERATE_EPSILON: f64 = 1e-9;
}

/// Math utility functions
pub mod utils {
    use super::{constants, Mat4, RowMajor4, Vec3};

    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f64) -> f64 {
        degrees * constants::DEG_TO_RAD
    }

    /// Convert radians to degrees
    pub fn rad_to_deg(radians: f64) -> f64 {
        radians * constants::RAD_TO_DEG
    }

    /// Build a vector from a `[x, y, z]` array
    pub fn vec3(v: [f64; 3]) -> Vec3 {
        Vec3::new(v[0], v[1], v[2])
    }

    /// Copy a matrix out into row-major nested arrays
    ///
    /// Negative zeros are written as `0.0`.
    pub fn to_row_major(m: &Mat4) -> RowMajor4 {
        let mut rows = [[0.0; 4]; 4];
        for (r, row) in rows.iter_mut().enumerate() {
            for (c, cell) in row.iter_mut().enumerate() {
                *cell = m[(r, c)] + 0.0;
            }
        }
        rows
    }

    /// Build a matrix from row-major nested arrays
    pub fn from_row_major(rows: &RowMajor4) -> Mat4 {
        Mat4::from_fn(|r, c| rows[r][c])
    }
}
