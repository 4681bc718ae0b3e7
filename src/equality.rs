use std::hash::{Hash, Hasher};

use const_fnv1a_hash::fnv1a_hash_64;

use crate::quaternion::Quaternion;

/// Bit pattern of a component with both zeros mapped to the same value,
/// since `0.0 == -0.0`.
fn canonical_bits(v: f64) -> u64 {
    if v == 0.0 {
        0
    }
    else {
        v.to_bits()
    }
}

/// Exact IEEE-754 comparison of all four components: `0.0 == -0.0` holds
/// and any NaN component makes the quaternion unequal to everything,
/// itself included. Wrap the type if a tolerance is needed.
impl PartialEq for Quaternion {
    fn eq(&self, other: &Self) -> bool {
        self.w == other.w && self.x == other.x && self.y == other.y && self.z == other.z
    }
}

impl Hash for Quaternion {
    fn hash<H: Hasher>(&self, state: &mut H) {
        canonical_bits(self.w).hash(state);
        canonical_bits(self.x).hash(state);
        canonical_bits(self.y).hash(state);
        canonical_bits(self.z).hash(state);
    }
}

impl Quaternion {
    /// Stable 64-bit hash, consistent with `==`.
    ///
    /// FNV-1a over the little-endian bit patterns of `w, x, y, z` in that
    /// order, so permuted components hash differently.
    pub fn hash_code(&self) -> u64 {
        let mut bytes = [0u8; 32];
        for (chunk, v) in bytes.chunks_exact_mut(8).zip([self.w, self.x, self.y, self.z]) {
            chunk.copy_from_slice(&canonical_bits(v).to_le_bytes());
        }
        fnv1a_hash_64(&bytes, None)
    }
}


#[cfg(test)]
use std::collections::hash_map::DefaultHasher;
#[cfg(test)]
use crate::random::Randf64;

#[cfg(test)]
fn std_hash(q: &Quaternion) -> u64 {
    let mut hasher = DefaultHasher::new();
    q.hash(&mut hasher);
    hasher.finish()
}

#[test]
fn exact_equality() {
    let q1 = Quaternion::new(1.0, 2.0, 3.0, 4.0);
    let q2 = Quaternion::new(5.0, 6.0, 7.0, 8.0);

    assert!(q1 == Quaternion::new(1.0, 2.0, 3.0, 4.0));
    assert!(q1 != q2);
    assert!(q1 != Quaternion::new(1.0, 2.0, 3.0, 4.0 + f64::EPSILON * 4.0));
}

#[test]
fn ieee_semantics() {
    let pos = Quaternion::new(0.0, 1.0, 0.0, 0.0);
    let neg = Quaternion::new(-0.0, 1.0, -0.0, 0.0);
    assert!(pos == neg);

    let nan = Quaternion::new(f64::NAN, 0.0, 0.0, 0.0);
    assert!(nan != nan);
}

#[test]
fn hash_matches_equality() {
    let pos = Quaternion::new(0.0, 1.0, 0.0, 0.0);
    let neg = Quaternion::new(-0.0, 1.0, -0.0, 0.0);
    assert_eq!(pos.hash_code(), neg.hash_code());
    assert_eq!(std_hash(&pos), std_hash(&neg));

    let mut rand = Randf64::seed(19);
    for _ in 0..256 {
        let q = rand.quat_in(-5.0..5.0);
        let copy = Quaternion::new(q.w, q.x, q.y, q.z);
        assert!(q == copy);
        assert_eq!(q.hash_code(), copy.hash_code());
        assert_eq!(std_hash(&q), std_hash(&copy));
    }
}

#[test]
fn hash_is_order_sensitive() {
    let q = Quaternion::new(1.0, 2.0, 3.0, 4.0);
    let reversed = Quaternion::new(4.0, 3.0, 2.0, 1.0);
    let swapped = Quaternion::new(2.0, 1.0, 3.0, 4.0);

    assert_ne!(q.hash_code(), reversed.hash_code());
    assert_ne!(q.hash_code(), swapped.hash_code());
    assert_ne!(std_hash(&q), std_hash(&reversed));
}

#[test]
fn hash_code_is_fnv1a_of_component_bytes() {
    let q = Quaternion::new(1.0, 2.0, 3.0, 4.0);

    let bytes: Vec<u8> = [1.0_f64, 2.0, 3.0, 4.0]
        .iter()
        .flat_map(|v| v.to_bits().to_le_bytes())
        .collect();
    assert_eq!(q.hash_code(), fnv1a_hash_64(&bytes, None));
    assert_eq!(q.hash_code(), 0x93b2_be02_cd28_82a0);
}
