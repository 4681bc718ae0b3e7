use std::ops::{Index, Mul};
use std::fmt;

use bytemuck::{Pod, Zeroable};

use crate::error::{QuatError, QuatResult};
use crate::quaternion::Quaternion;

/// 3 x 3 matrix of `f64`, stored row-major and indexed `[(row, column)]`.
#[repr(C)]
#[derive(Clone, Copy, PartialEq, Debug, Default, Pod, Zeroable)]
pub struct Mat3x3 {
    pub rows: [[f64; 3]; 3],
}
impl Mat3x3 {
    #[allow(clippy::too_many_arguments)]
    pub const fn new(
        r0c0: f64, r0c1: f64, r0c2: f64,
        r1c0: f64, r1c1: f64, r1c2: f64,
        r2c0: f64, r2c1: f64, r2c2: f64,
    ) -> Self {
        Self::from_rows(
            [r0c0, r0c1, r0c2],
            [r1c0, r1c1, r1c2],
            [r2c0, r2c1, r2c2],
        )
    }

    pub const fn from_rows(r0: [f64; 3], r1: [f64; 3], r2: [f64; 3]) -> Self {
        Self { rows: [r0, r1, r2] }
    }

    pub const fn identity() -> Self {
        Self::new(
            1.0, 0.0, 0.0,
            0.0, 1.0, 0.0,
            0.0, 0.0, 1.0,
        )
    }

    /// Builds a matrix from dynamically sized rows, rejecting anything
    /// that is not exactly 3 x 3.
    pub fn try_from_rows<R: AsRef<[f64]>>(rows: &[R]) -> QuatResult<Self> {
        let cols = rows.first().map_or(0, |row| row.as_ref().len());
        let bad_cols = rows.iter()
            .map(|row| row.as_ref().len())
            .find(|&len| len != 3);

        if rows.len() != 3 || bad_cols.is_some() {
            return Err(QuatError::InvalidMatrixShape {
                rows: rows.len(),
                cols: bad_cols.unwrap_or(cols),
            });
        }

        let mut mat = Self::default();
        for (dst, src) in mat.rows.iter_mut().zip(rows) {
            dst.copy_from_slice(src.as_ref());
        }
        Ok(mat)
    }

    pub fn transpose(&self) -> Self {
        let m = &self.rows;
        Self::new(
            m[0][0], m[1][0], m[2][0],
            m[0][1], m[1][1], m[2][1],
            m[0][2], m[1][2], m[2][2],
        )
    }

    pub fn trace(&self) -> f64 {
        self.rows[0][0] + self.rows[1][1] + self.rows[2][2]
    }
}

impl Index<(usize, usize)> for Mat3x3 {
    type Output = f64;

    fn index(&self, (row, col): (usize, usize)) -> &f64 {
        &self.rows[row][col]
    }
}

impl Mul for Mat3x3 {
    type Output = Self;

    fn mul(self, other: Self) -> Self::Output {
        let mut out = Self::default();
        for r in 0..3 {
            for c in 0..3 {
                out.rows[r][c] = self[(r, 0)] * other[(0, c)]
                    + self[(r, 1)] * other[(1, c)]
                    + self[(r, 2)] * other[(2, c)];
            }
        }
        out
    }
}

impl From<[[f64; 3]; 3]> for Mat3x3 {
    fn from(rows: [[f64; 3]; 3]) -> Mat3x3 {
        Self { rows }
    }
}

impl From<Mat3x3> for [[f64; 3]; 3] {
    fn from(mat: Mat3x3) -> [[f64; 3]; 3] {
        mat.rows
    }
}

impl From<Quaternion> for Mat3x3 {
    /// Convert the quaternion to a 3 x 3 rotation matrix.
    ///
    /// The quaternion is taken to be of unit length. It is not normalized
    /// or checked here; a non-unit input yields a scaled, non-orthonormal
    /// matrix.
    fn from(q: Quaternion) -> Mat3x3 {
        let (w, x, y, z) = (q.w, q.x, q.y, q.z);

        Mat3x3::new(
            1.0 - 2.0 * (y*y + z*z), 2.0 * (x*y - w*z),       2.0 * (x*z + w*y),
            2.0 * (x*y + w*z),       1.0 - 2.0 * (x*x + z*z), 2.0 * (y*z - w*x),
            2.0 * (x*z - w*y),       2.0 * (y*z + w*x),       1.0 - 2.0 * (x*x + y*y),
        )
    }
}

impl Quaternion {
    pub fn to_rotation_matrix(&self) -> Mat3x3 {
        Mat3x3::from(*self)
    }

    /// Recover a quaternion from a rotation matrix.
    ///
    /// Picks the branch with the largest divisor: the trace when positive,
    /// otherwise the largest diagonal entry, checked in the order
    /// `m00`, `m11`, `m22` with ties falling through to the later entry.
    /// `q` and `-q` give the same matrix, so a round trip may come back
    /// sign-flipped. The matrix is assumed orthonormal with determinant +1;
    /// other inputs still follow the formulas but do not describe a rotation.
    pub fn from_rotation_matrix(m: &Mat3x3) -> Quaternion {
        let trace = m.trace();

        if trace > 0.0 {
            let s = 0.5 / (trace + 1.0).sqrt();
            Quaternion::new(
                0.25 / s,
                (m[(2, 1)] - m[(1, 2)]) * s,
                (m[(0, 2)] - m[(2, 0)]) * s,
                (m[(1, 0)] - m[(0, 1)]) * s,
            )
        }
        else if m[(0, 0)] > m[(1, 1)] && m[(0, 0)] > m[(2, 2)] {
            let s = 2.0 * (1.0 + m[(0, 0)] - m[(1, 1)] - m[(2, 2)]).sqrt();
            Quaternion::new(
                (m[(2, 1)] - m[(1, 2)]) / s,
                0.25 * s,
                (m[(0, 1)] + m[(1, 0)]) / s,
                (m[(0, 2)] + m[(2, 0)]) / s,
            )
        }
        else if m[(1, 1)] > m[(2, 2)] {
            let s = 2.0 * (1.0 + m[(1, 1)] - m[(0, 0)] - m[(2, 2)]).sqrt();
            Quaternion::new(
                (m[(0, 2)] - m[(2, 0)]) / s,
                (m[(0, 1)] + m[(1, 0)]) / s,
                0.25 * s,
                (m[(1, 2)] + m[(2, 1)]) / s,
            )
        }
        else {
            let s = 2.0 * (1.0 + m[(2, 2)] - m[(0, 0)] - m[(1, 1)]).sqrt();
            Quaternion::new(
                (m[(1, 0)] - m[(0, 1)]) / s,
                (m[(0, 2)] + m[(2, 0)]) / s,
                (m[(1, 2)] + m[(2, 1)]) / s,
                0.25 * s,
            )
        }
    }

    /// Shape-checked variant of [`Quaternion::from_rotation_matrix`] for
    /// matrices whose dimensions are only known at runtime.
    pub fn try_from_rotation_rows<R: AsRef<[f64]>>(rows: &[R]) -> QuatResult<Quaternion> {
        let mat = Mat3x3::try_from_rows(rows)?;
        Ok(Self::from_rotation_matrix(&mat))
    }
}

impl fmt::Display for Mat3x3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            writeln!(f, "{} {} {}", row[0], row[1], row[2])?;
        }
        Ok(())
    }
}


#[cfg(test)]
use approx::assert_abs_diff_eq;
#[cfg(test)]
use crate::random::Randf64;

#[cfg(test)]
fn assert_same_rotation(actual: Quaternion, expected: Quaternion) {
    let flip = if actual.w * expected.w + actual.x * expected.x
        + actual.y * expected.y + actual.z * expected.z < 0.0 { -1.0 } else { 1.0 };

    assert_abs_diff_eq!(actual.w, flip * expected.w, epsilon = 1e-9);
    assert_abs_diff_eq!(actual.x, flip * expected.x, epsilon = 1e-9);
    assert_abs_diff_eq!(actual.y, flip * expected.y, epsilon = 1e-9);
    assert_abs_diff_eq!(actual.z, flip * expected.z, epsilon = 1e-9);
}

#[test]
fn mat_multiply() {
    let mat1 = Mat3x3::new(
        1.0, 2.0, 3.0,
        4.0, 5.0, 6.0,
        7.0, 8.0, 9.0,
    );
    let mat2 = Mat3x3::new(
        9.0, 8.0, 7.0,
        6.0, 5.0, 4.0,
        3.0, 2.0, 1.0,
    );
    let res = mat1 * mat2;

    assert!(res == Mat3x3::new(
        30.0,  24.0,  18.0,
        84.0,  69.0,  54.0,
        138.0, 114.0, 90.0,
    ));
    assert!(mat1 * Mat3x3::identity() == mat1);
    assert!(mat1.transpose()[(0, 2)] == 7.0);

    let rows: [[f64; 3]; 3] = mat2.into();
    assert!(rows == [[9.0, 8.0, 7.0], [6.0, 5.0, 4.0], [3.0, 2.0, 1.0]]);
    assert!(Mat3x3::from(rows) == mat2);
}

#[test]
fn identity_rotation() {
    let mat = Quaternion::identity().to_rotation_matrix();
    assert!(mat == Mat3x3::identity());
}

#[test]
fn non_unit_input_is_not_normalized() {
    let mat = Quaternion::new(1.0, 2.0, 3.0, 4.0).to_rotation_matrix();
    assert!(mat == Mat3x3::new(
        -49.0,   4.0,  22.0,
         20.0, -39.0,  20.0,
         10.0,  28.0, -25.0,
    ));
}

#[test]
fn rotation_matrices_are_orthonormal() {
    let mut rand = Randf64::seed(5);
    for _ in 0..128 {
        let mat = rand.unit_quat().to_rotation_matrix();
        let prod = mat * mat.transpose();
        for r in 0..3 {
            for c in 0..3 {
                let expected = if r == c { 1.0 } else { 0.0 };
                assert_abs_diff_eq!(prod[(r, c)], expected, epsilon = 1e-12);
            }
        }
    }
}

#[test]
fn quarter_turn_about_z() {
    let half = std::f64::consts::FRAC_PI_4;
    let q = Quaternion::new(half.cos(), 0.0, 0.0, half.sin());
    let mat = q.to_rotation_matrix();

    assert_abs_diff_eq!(mat[(0, 0)], 0.0, epsilon = 1e-15);
    assert_abs_diff_eq!(mat[(0, 1)], -1.0, epsilon = 1e-15);
    assert_abs_diff_eq!(mat[(1, 0)], 1.0, epsilon = 1e-15);
    assert_abs_diff_eq!(mat[(2, 2)], 1.0, epsilon = 1e-15);
}

#[test]
fn positive_trace_branch() {
    assert!(Quaternion::from_rotation_matrix(&Mat3x3::identity()) == Quaternion::identity());

    let half = 0.3_f64;
    let q = Quaternion::new(half.cos(), half.sin(), 0.0, 0.0);
    assert!(q.to_rotation_matrix().trace() > 0.0);
    assert_same_rotation(Quaternion::from_rotation_matrix(&q.to_rotation_matrix()), q);
}

#[test]
fn half_turns_pick_each_diagonal_branch() {
    let about_x = Quaternion::new(0.0, 1.0, 0.0, 0.0);
    let about_y = Quaternion::new(0.0, 0.0, 1.0, 0.0);
    let about_z = Quaternion::new(0.0, 0.0, 0.0, 1.0);

    for q in [about_x, about_y, about_z] {
        let mat = q.to_rotation_matrix();
        assert!(mat.trace() == -1.0);
        assert!(Quaternion::from_rotation_matrix(&mat) == q);
    }
}

#[test]
fn tie_on_first_two_diagonals_uses_second() {
    let h = std::f64::consts::FRAC_1_SQRT_2;
    let q = Quaternion::new(0.0, h, h, 0.0);
    let mat = q.to_rotation_matrix();

    assert!(mat[(0, 0)] == mat[(1, 1)]);
    let back = Quaternion::from_rotation_matrix(&mat);
    assert!(back.y == 0.25 * 2.0 * (1.0 + mat[(1, 1)] - mat[(0, 0)] - mat[(2, 2)]).sqrt());
    assert_same_rotation(back, q);
}

#[test]
fn tie_on_outer_diagonals_uses_last() {
    let h = std::f64::consts::FRAC_1_SQRT_2;
    let q = Quaternion::new(0.0, h, 0.0, h);
    let mat = q.to_rotation_matrix();

    assert!(mat.trace() <= 0.0);
    assert!(mat[(0, 0)] == mat[(2, 2)] && mat[(0, 0)] > mat[(1, 1)]);
    let back = Quaternion::from_rotation_matrix(&mat);
    assert!(back.z == 0.25 * 2.0 * (1.0 + mat[(2, 2)] - mat[(0, 0)] - mat[(1, 1)]).sqrt());
    assert_same_rotation(back, q);
}

#[test]
fn full_tie_falls_through_to_last_branch() {
    let mat = Mat3x3::new(
        -1.0,  0.0,  0.0,
         0.0, -1.0,  0.0,
         0.0,  0.0, -1.0,
    );
    let q = Quaternion::from_rotation_matrix(&mat);

    assert!(q.w == 0.0 && q.x == 0.0 && q.y == 0.0);
    assert!(q.z == 0.25 * 2.0 * 2.0_f64.sqrt());
}

#[test]
fn round_trip_up_to_sign() {
    let mut rand = Randf64::seed(23);
    for _ in 0..512 {
        let q = rand.unit_quat();
        let back = Quaternion::from_rotation_matrix(&q.to_rotation_matrix());
        assert_same_rotation(back, q);
    }
    let q = Quaternion::new(-0.5, 0.5, -0.5, 0.5);
    assert_same_rotation(Quaternion::from_rotation_matrix(&q.to_rotation_matrix()), q);
}

#[test]
fn shape_is_checked() {
    let two = vec![vec![1.0, 0.0], vec![0.0, 1.0]];
    assert_eq!(
        Quaternion::try_from_rotation_rows(&two).unwrap_err(),
        QuatError::InvalidMatrixShape { rows: 2, cols: 2 },
    );

    let four = [[0.0; 4]; 4];
    assert_eq!(
        Quaternion::try_from_rotation_rows(&four).unwrap_err(),
        QuatError::InvalidMatrixShape { rows: 4, cols: 4 },
    );

    let ragged: [&[f64]; 3] = [&[1.0, 0.0, 0.0], &[0.0, 1.0], &[0.0, 0.0, 1.0]];
    assert_eq!(
        Mat3x3::try_from_rows(&ragged).unwrap_err(),
        QuatError::InvalidMatrixShape { rows: 3, cols: 2 },
    );

    let empty: [[f64; 3]; 0] = [];
    assert_eq!(
        Mat3x3::try_from_rows(&empty).unwrap_err(),
        QuatError::InvalidMatrixShape { rows: 0, cols: 0 },
    );

    let rows = vec![vec![1.0, 0.0, 0.0], vec![0.0, 1.0, 0.0], vec![0.0, 0.0, 1.0]];
    assert!(Quaternion::try_from_rotation_rows(&rows).unwrap() == Quaternion::identity());
}

#[test]
fn display_rows() {
    assert_eq!(Mat3x3::identity().to_string(), "1 0 0\n0 1 0\n0 0 1\n");
}
