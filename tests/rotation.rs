use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::thread;

use approx::assert_relative_eq;
use cgmath::{Matrix3, Rad, Rotation3, Vector3};

use hamilton::random::Randf64;
use hamilton::{Mat3x3, QuatError, Quaternion};

#[test]
fn demo_values() {
    let q1 = Quaternion::new(1.0, 2.0, 3.0, 4.0);
    let q2 = Quaternion::new(5.0, 6.0, 7.0, 8.0);

    assert_eq!(q1 + q2, Quaternion::new(6.0, 8.0, 10.0, 12.0));
    assert_eq!(q1 - q2, Quaternion::new(-4.0, -4.0, -4.0, -4.0));
    assert_eq!(q1 * q2, Quaternion::new(-60.0, 12.0, 30.0, 24.0));
    assert_ne!(q2 * q1, q1 * q2);
    assert_eq!(q1.norm(), 30.0_f64.sqrt());
    assert_eq!(q1.conjugate(), Quaternion::new(1.0, -2.0, -3.0, -4.0));
}

#[test]
fn errors_surface_to_caller() {
    assert_eq!(Quaternion::default().inverse(), Err(QuatError::DegenerateQuaternion));

    let four_by_four = vec![vec![0.0; 4]; 4];
    assert_eq!(
        Quaternion::try_from_rotation_rows(&four_by_four),
        Err(QuatError::InvalidMatrixShape { rows: 4, cols: 4 }),
    );
}

#[test]
fn axis_angle_rotations_from_cgmath() {
    let axes = [
        Vector3::new(1.0, 0.0, 0.0),
        Vector3::new(0.0, 1.0, 0.0),
        Vector3::new(0.0, 0.0, 1.0),
        Vector3::new(1.0, 1.0, 1.0) / 3.0_f64.sqrt(),
    ];
    for axis in axes {
        for step in 0..16 {
            let angle = Rad(step as f64 * std::f64::consts::PI / 8.0);
            let q = Quaternion::from(cgmath::Quaternion::from_axis_angle(axis, angle));

            let expected = Mat3x3::from(Matrix3::from_axis_angle(axis, angle));
            let mat = q.to_rotation_matrix();
            for r in 0..3 {
                for c in 0..3 {
                    assert_relative_eq!(mat[(r, c)], expected[(r, c)], epsilon = 1e-12);
                }
            }

            let back = Quaternion::from_rotation_matrix(&mat);
            let same = (back - q).norm() < 1e-9;
            let flipped = (back + q).norm() < 1e-9;
            assert!(same || flipped, "{q} came back as {back}");
        }
    }
}

#[test]
fn composition_matches_matrix_product() {
    let mut rand = Randf64::seed(31);
    for _ in 0..64 {
        let a = rand.unit_quat();
        let b = rand.unit_quat();
        let composed = (a * b).to_rotation_matrix();
        let product = a.to_rotation_matrix() * b.to_rotation_matrix();
        for r in 0..3 {
            for c in 0..3 {
                assert_relative_eq!(composed[(r, c)], product[(r, c)], epsilon = 1e-12);
            }
        }
    }
}

#[test]
fn hash_consistent_through_std_hasher() {
    fn hash_of(q: &Quaternion) -> u64 {
        let mut hasher = DefaultHasher::new();
        q.hash(&mut hasher);
        hasher.finish()
    }
    let q = Quaternion::new(0.25, -0.0, 3.5, 1e-300);
    let same = Quaternion::new(0.25, 0.0, 3.5, 1e-300);

    assert_eq!(q, same);
    assert_eq!(hash_of(&q), hash_of(&same));
    assert_eq!(q.hash_code(), same.hash_code());
}

#[test]
fn gpu_layout() {
    let q = Quaternion::new(1.0, 2.0, 3.0, 4.0);
    let raw: &[f64] = bytemuck::cast_slice(std::slice::from_ref(&q));
    assert_eq!(raw, &[1.0, 2.0, 3.0, 4.0]);

    let ident = Mat3x3::identity();
    let bytes = bytemuck::bytes_of(&ident);
    assert_eq!(bytes.len(), 9 * std::mem::size_of::<f64>());
}

#[test]
fn shared_across_threads() {
    let q = Quaternion::new(0.5, 0.5, 0.5, 0.5);
    let handles: Vec<_> = (0..4)
        .map(|_| thread::spawn(move || Quaternion::from_rotation_matrix(&q.to_rotation_matrix())))
        .collect();

    for handle in handles {
        let back = handle.join().unwrap();
        assert_eq!(back, Quaternion::from_rotation_matrix(&q.to_rotation_matrix()));
    }
}
