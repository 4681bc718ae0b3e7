use std::ops::{Neg, Add, Sub, Mul};
use std::fmt;

use bytemuck::{Pod, Zeroable};

use crate::error::{QuatError, QuatResult};

/// A quaternion `w + xi + yj + zk`.
///
/// Values are never mutated by the operators below, every operation
/// returns a fresh quaternion. Quaternions of norm 1 represent rotations,
/// with `q` and `-q` describing the same one.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, Pod, Zeroable)]
pub struct Quaternion {
    pub w: f64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}
impl Quaternion {
    pub const fn new(w: f64, x: f64, y: f64, z: f64) -> Self {
        Self { w, x, y, z }
    }

    pub const fn identity() -> Self {
        Self::new(1.0, 0.0, 0.0, 0.0)
    }

    pub fn norm_sq(&self) -> f64 {
        self.w*self.w + self.x*self.x + self.y*self.y + self.z*self.z
    }

    pub fn norm(&self) -> f64 {
        self.norm_sq().sqrt()
    }

    pub fn conjugate(&self) -> Self {
        Self::new(self.w, -self.x, -self.y, -self.z)
    }

    /// Multiplicative inverse, `conjugate / norm²`.
    ///
    /// Only an exactly zero squared norm is rejected; tiny but non-zero
    /// quaternions are inverted as-is.
    pub fn inverse(&self) -> QuatResult<Self> {
        let norm_sq = self.norm_sq();
        if norm_sq == 0.0 {
            return Err(QuatError::DegenerateQuaternion);
        }
        let inv = 1.0 / norm_sq;

        Ok(Self::new(self.w * inv, -self.x * inv, -self.y * inv, -self.z * inv))
    }
}

impl Neg for Quaternion {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self::new(-self.w, -self.x, -self.y, -self.z)
    }
}

impl Add for Quaternion {
    type Output = Self;

    fn add(self, other: Self) -> Self::Output {
        Self::new(self.w + other.w, self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl Sub for Quaternion {
    type Output = Self;

    fn sub(self, other: Self) -> Self::Output {
        Self::new(self.w - other.w, self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl Mul for Quaternion {
    type Output = Self;

    /// Hamilton product. Term order is fixed so results are bit-reproducible.
    fn mul(self, other: Self) -> Self::Output {
        let (a, b) = (self, other);

        let w = a.w*b.w - a.x*b.x - a.y*b.y - a.z*b.z;
        let x = a.w*b.x + a.x*b.w + a.y*b.z - a.z*b.y;
        let y = a.w*b.y - a.x*b.z + a.y*b.w + a.z*b.x;
        let z = a.w*b.z + a.x*b.y - a.y*b.x + a.z*b.w;

        Self::new(w, x, y, z)
    }
}

impl From<[f64; 4]> for Quaternion {
    fn from(arr: [f64; 4]) -> Quaternion {
        Quaternion::new(arr[0], arr[1], arr[2], arr[3])
    }
}

impl From<Quaternion> for [f64; 4] {
    fn from(quat: Quaternion) -> [f64; 4] {
        [quat.w, quat.x, quat.y, quat.z]
    }
}

impl fmt::Display for Quaternion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {}, {})", self.w, self.x, self.y, self.z)
    }
}


#[cfg(test)]
use approx::assert_abs_diff_eq;
#[cfg(test)]
use crate::random::Randf64;

#[test]
fn add_sub_test() {
    let q1 = Quaternion::new(1.0, 2.0, 3.0, 4.0);
    let q2 = Quaternion::new(5.0, 6.0, 7.0, 8.0);

    assert!(q1 + q2 == Quaternion::new(6.0, 8.0, 10.0, 12.0));
    assert!(q1 - q2 == Quaternion::new(-4.0, -4.0, -4.0, -4.0));
}

#[test]
fn add_commutes() {
    let mut rand = Randf64::seed(7);
    for _ in 0..256 {
        let a = rand.quat_in(-100.0..100.0);
        let b = rand.quat_in(-100.0..100.0);
        assert!(a + b == b + a);
    }
}

#[test]
fn hamilton_product() {
    let a = Quaternion::new(1.0, 2.0, 3.0, 4.0);
    let b = Quaternion::new(5.0, 6.0, 7.0, 8.0);

    assert!(a * b == Quaternion::new(-60.0, 12.0, 30.0, 24.0));
    assert!(b * a == Quaternion::new(-60.0, 20.0, 14.0, 32.0));
    assert!(a * b != b * a);
}

#[test]
fn basis_units() {
    let i = Quaternion::new(0.0, 1.0, 0.0, 0.0);
    let j = Quaternion::new(0.0, 0.0, 1.0, 0.0);
    let k = Quaternion::new(0.0, 0.0, 0.0, 1.0);
    let minus_one = Quaternion::new(-1.0, 0.0, 0.0, 0.0);

    assert!(i * i == minus_one);
    assert!(j * j == minus_one);
    assert!(k * k == minus_one);
    assert!(i * j == k);
    assert!(j * i == -k);
    assert!(i * j * k == minus_one);
}

#[test]
fn norm_test() {
    let q = Quaternion::new(1.0, 2.0, 3.0, 4.0);

    assert!(q.norm_sq() == 30.0);
    assert!(q.norm() == 30.0_f64.sqrt());
    assert!(Quaternion::default().norm() == 0.0);
    assert!(Quaternion::new(-1.0, 0.0, 0.0, 0.0).norm() == 1.0);
}

#[test]
fn conjugate_is_involution() {
    let q = Quaternion::new(1.0, 2.0, 3.0, 4.0);
    assert!(q.conjugate() == Quaternion::new(1.0, -2.0, -3.0, -4.0));

    let mut rand = Randf64::seed(11);
    for _ in 0..256 {
        let q = rand.quat_in(-10.0..10.0);
        assert!(q.conjugate().conjugate() == q);
    }
}

#[test]
fn inverse_test() {
    let q = Quaternion::new(1.0, 2.0, 3.0, 4.0);
    let inv = q.inverse().unwrap();

    let s = 1.0 / 30.0;
    assert!(inv == Quaternion::new(s, -2.0 * s, -3.0 * s, -4.0 * s));

    let mut rand = Randf64::seed(3);
    for _ in 0..256 {
        let q = rand.quat_in(-10.0..10.0);
        let prod = q * q.inverse().unwrap();
        assert_abs_diff_eq!(prod.w, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(prod.x, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(prod.y, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(prod.z, 0.0, epsilon = 1e-12);
    }
}

#[test]
fn inverse_of_zero_fails() {
    let zero = Quaternion::new(0.0, 0.0, 0.0, 0.0);
    assert_eq!(zero.inverse().unwrap_err(), QuatError::DegenerateQuaternion);

    let neg_zero = Quaternion::new(-0.0, 0.0, -0.0, 0.0);
    assert_eq!(neg_zero.inverse().unwrap_err(), QuatError::DegenerateQuaternion);
}

#[test]
fn display_test() {
    let q = Quaternion::new(1.0, -2.5, 3.0, 4.0);
    assert_eq!(q.to_string(), "(1, -2.5, 3, 4)");
}

#[test]
fn array_conversions() {
    let q = Quaternion::from([1.0, -2.5, 3.0, 4.0]);
    assert!(q == Quaternion::new(1.0, -2.5, 3.0, 4.0));

    let arr: [f64; 4] = q.into();
    assert!(arr == [1.0, -2.5, 3.0, 4.0]);
}
