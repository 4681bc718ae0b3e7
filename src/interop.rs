//! Conversions to and from `cgmath`, for renderers that keep their
//! transforms in cgmath types.
//!
//! `cgmath::Matrix3` stores columns, so the row-major [`Mat3x3`] is
//! transposed on the way in and out.

use cgmath::{Matrix3, Vector3};

use crate::matrix::Mat3x3;
use crate::quaternion::Quaternion;

impl From<cgmath::Quaternion<f64>> for Quaternion {
    fn from(quat: cgmath::Quaternion<f64>) -> Quaternion {
        Quaternion::new(quat.s, quat.v.x, quat.v.y, quat.v.z)
    }
}

impl From<Quaternion> for cgmath::Quaternion<f64> {
    fn from(quat: Quaternion) -> cgmath::Quaternion<f64> {
        cgmath::Quaternion::new(quat.w, quat.x, quat.y, quat.z)
    }
}

impl From<Matrix3<f64>> for Mat3x3 {
    fn from(mat: Matrix3<f64>) -> Mat3x3 {
        Mat3x3::new(
            mat.x.x, mat.y.x, mat.z.x,
            mat.x.y, mat.y.y, mat.z.y,
            mat.x.z, mat.y.z, mat.z.z,
        )
    }
}

impl From<Mat3x3> for Matrix3<f64> {
    fn from(mat: Mat3x3) -> Matrix3<f64> {
        Matrix3::from_cols(
            Vector3::new(mat[(0, 0)], mat[(1, 0)], mat[(2, 0)]),
            Vector3::new(mat[(0, 1)], mat[(1, 1)], mat[(2, 1)]),
            Vector3::new(mat[(0, 2)], mat[(1, 2)], mat[(2, 2)]),
        )
    }
}


#[cfg(test)]
use approx::assert_abs_diff_eq;
#[cfg(test)]
use crate::random::Randf64;

#[test]
fn quaternion_components_line_up() {
    let q = Quaternion::new(1.0, 2.0, 3.0, 4.0);
    let cg: cgmath::Quaternion<f64> = q.into();

    assert!(cg.s == 1.0);
    assert!(cg.v == Vector3::new(2.0, 3.0, 4.0));
    assert!(Quaternion::from(cg) == q);
}

#[test]
fn matrix_layout_is_transposed() {
    let mat = Mat3x3::new(
        1.0, 2.0, 3.0,
        4.0, 5.0, 6.0,
        7.0, 8.0, 9.0,
    );
    let cg: Matrix3<f64> = mat.into();

    // cgmath indexes [column][row]
    assert!(cg[0][1] == 4.0);
    assert!(cg[2][0] == 3.0);
    assert!(Mat3x3::from(cg) == mat);
}

#[test]
fn rotation_matrix_agrees_with_cgmath() {
    let mut rand = Randf64::seed(29);
    for _ in 0..128 {
        let q = rand.unit_quat();
        let ours = q.to_rotation_matrix();
        let theirs = Mat3x3::from(Matrix3::from(cgmath::Quaternion::from(q)));

        for r in 0..3 {
            for c in 0..3 {
                assert_abs_diff_eq!(ours[(r, c)], theirs[(r, c)], epsilon = 1e-12);
            }
        }
    }
}
