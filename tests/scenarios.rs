//! End-to-end checks across the math and geometry layers.

#![allow(clippy::unwrap_used)]

use approx::assert_relative_eq;
use geolis_math::geometry::{Plane, Ray3d, Shape, Sphere};
use geolis_math::math::{MajorOrder, Matrix2d, Matrix3d, Matrix4d, Quaternion, Vector2d, Vector3d};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn p(x: f64, y: f64, z: f64) -> Vector3d {
    Vector3d::new(x, y, z)
}

fn sample_matrix4() -> Matrix4d {
    Matrix4d::from_rows([
        [2.0, 0.0, 1.0, 0.0],
        [1.0, 3.0, 0.0, 1.0],
        [0.0, 1.0, 4.0, 0.0],
        [1.0, 0.0, 0.0, 2.0],
    ])
}

fn sample_rotations() -> Vec<Quaternion> {
    vec![
        Quaternion::IDENTITY,
        Quaternion::from_angle_axis(0.3, &p(1.0, 2.0, 3.0)),
        Quaternion::from_angle_axis(3.0, &p(-1.0, 0.5, 0.0)),
        Quaternion::from_angles(0.2, -1.1, 2.5),
        Quaternion::from_angle_axis(std::f64::consts::PI, &Vector3d::UNIT_Y),
    ]
}

// ── Concrete scenarios ──

#[test]
fn cross_product_of_unit_axes() {
    assert_eq!(p(1.0, 0.0, 0.0).cross(&p(0.0, 1.0, 0.0)), p(0.0, 0.0, 1.0));
}

#[test]
fn ray_hits_unit_sphere_top() {
    init_tracing();
    let sphere = Sphere::new(Vector3d::ORIGIN, 1.0).unwrap();
    let ray = Ray3d::new(p(0.0, 0.0, 5.0), p(0.0, 0.0, -1.0));
    assert_eq!(sphere.get_intersection(&ray).unwrap(), p(0.0, 0.0, 1.0));
}

#[test]
fn segment_crosses_plane_at_origin() {
    let plane = Plane::new(Vector3d::ORIGIN, Vector3d::UNIT_Z);
    let hit = plane.get_intersection(&p(0.0, 0.0, -1.0), &p(0.0, 0.0, 1.0));
    assert_eq!(hit.unwrap(), p(0.0, 0.0, 0.0));
}

#[test]
fn bounding_sphere_of_collinear_points() {
    init_tracing();
    let s = Sphere::gen_minimum_bounding_sphere(&p(0.0, 0.0, 0.0), &p(1.0, 0.0, 0.0), &p(2.0, 0.0, 0.0)).unwrap();
    assert_eq!(s.center(), p(1.0, 0.0, 0.0));
    assert_relative_eq!(s.radius(), 1.0);
}

#[test]
fn matrix2_inverse_identity_and_singular() {
    init_tracing();
    assert_eq!(Matrix2d::new(1.0, 0.0, 0.0, 1.0).invert(), Matrix2d::IDENTITY);
    assert_eq!(Matrix2d::new(0.0, 0.0, 0.0, 0.0).invert(), Matrix2d::ZERO);
}

#[test]
fn slerp_with_itself_is_unchanged() {
    for q in sample_rotations() {
        for t in [0.0, 0.25, 0.5, 0.9, 1.0] {
            let r = Quaternion::slerp(&q, &q, t);
            assert_eq!(r.to_string(), q.to_string());
        }
    }
}

// ── Properties ──

#[test]
fn array_round_trip_is_exact() {
    for order in [MajorOrder::Row, MajorOrder::Column] {
        let m2 = Matrix2d::new(1.5, -2.0, 0.25, 7.0);
        assert_eq!(Matrix2d::from_array(&m2.to_array(order), order).unwrap().to_array(order), m2.to_array(order));

        let m3 = Matrix3d::new(1.0, 2.0, 3.0, -4.0, 5.5, 6.0, 7.0, 8.0, -9.25);
        assert_eq!(Matrix3d::from_array(&m3.to_array(order), order).unwrap().to_array(order), m3.to_array(order));

        let m4 = sample_matrix4();
        assert_eq!(Matrix4d::from_array(&m4.to_array(order), order).unwrap().to_array(order), m4.to_array(order));
    }
}

#[test]
fn normalization_is_idempotent() {
    for v in [p(3.0, -4.0, 12.0), p(1e-3, 2e-3, 0.0), p(-7.0, 0.0, 0.5)] {
        let once = v.normalized();
        assert_eq!(once.normalized(), once);
    }
    let w = Vector2d::new(-5.0, 2.0).normalized();
    assert_eq!(w.normalized(), w);
}

#[test]
fn inverse_law() {
    let m3 = Matrix3d::new(2.0, -1.0, 0.0, -1.0, 2.0, -1.0, 0.0, -1.0, 2.0);
    assert_eq!(m3 * m3.invert(), Matrix3d::IDENTITY);
    let m4 = sample_matrix4();
    assert_eq!(m4 * m4.invert(), Matrix4d::IDENTITY);
    let rigid = Matrix4d::from_rotation_translation(
        &Matrix3d::from_quaternion(&Quaternion::from_angle_axis(1.2, &p(0.0, 1.0, 1.0))),
        &p(3.0, -2.0, 1.0),
    );
    assert_eq!(rigid * rigid.invert(), Matrix4d::IDENTITY);
}

#[test]
fn quaternion_matrix_round_trip_up_to_sign() {
    for q in sample_rotations() {
        let back = Matrix3d::from_quaternion(&q).to_quaternion();
        assert!(back == q || back == q.negated(), "{q} came back as {back}");
    }
}

#[test]
fn sphere_boundary_is_inclusive() {
    let center = p(1.0, 2.0, 3.0);
    let s = Sphere::new(center, 2.0).unwrap();
    assert!(s.contains(&(center + p(0.0, 2.0, 0.0))));
    assert!(!s.contains(&(center + p(0.0, 2.0 + 1e-9, 0.0))));
}
