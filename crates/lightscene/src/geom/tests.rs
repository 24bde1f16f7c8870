use super::*;
use nalgebra::vector;
use std::f64::consts::{FRAC_PI_2, PI, TAU};

#[test]
fn angle_and_rotation_agree() {
    let v = vector![1.0, 0.0];
    let r = rotate_vector(v, FRAC_PI_2);
    assert!((r - vector![0.0, 1.0]).norm() < 1e-12);
    assert!((angle_of_vector(r) - FRAC_PI_2).abs() < 1e-12);
    assert!((angle_of_vector(vector![-1.0, 0.0]) - PI).abs() < 1e-12);
}

#[test]
fn normalize_wraps_into_half_open_turn() {
    assert!((normalize_angle(-FRAC_PI_2) - 1.5 * PI).abs() < 1e-12);
    assert!(normalize_angle(TAU).abs() < 1e-12);
    assert!(normalize_angle(-1e-300) < TAU);
}

#[test]
fn sector_membership_across_seam() {
    // window from 170° to 190° straddles the ±π seam
    let s = AnnularSector {
        center: vector![0.0, 0.0],
        inner_radius: 0.0,
        outer_radius: 2.0,
        start_angle: 170f64.to_radians(),
        angle_span: 20f64.to_radians(),
        fill_opacity: 1.0,
        color: Color::YELLOW,
    };
    assert!(s.contains_eps(vector![-1.0, 0.0], 1e-12));
    assert!(s.contains_eps(rotate_vector(vector![1.0, 0.0], -175f64.to_radians()), 1e-12));
    assert!(!s.contains_eps(vector![1.0, 0.0], 1e-12));
    assert!(!s.contains_eps(vector![-3.0, 0.0], 1e-12));
}

#[test]
fn polygon_area_and_vertices() {
    let p = Polygon {
        vertices: vec![
            vector![0.0, 0.0],
            vector![2.0, 0.0],
            vector![2.0, 1.0],
            vector![0.0, 1.0],
        ],
        fill_color: Color::BLACK,
        fill_opacity: 1.0,
    };
    assert!((p.signed_area() - 2.0).abs() < 1e-12);
    assert!(p.has_vertex_eps(vector![2.0, 1.0], 1e-12));
    assert!(!p.has_vertex_eps(vector![1.0, 1.0], 1e-12));
}

#[test]
fn annulus_shift_and_contains() {
    let mut a = Annulus {
        center: vector![0.0, 0.0],
        inner_radius: 1.0,
        outer_radius: 2.0,
        fill_opacity: 0.5,
        color: Color::YELLOW,
    };
    a.shift(vector![3.0, 0.0]);
    assert!(a.contains(vector![4.5, 0.0]));
    assert!(!a.contains(vector![3.0, 0.0]));
    assert!((a.width() - 1.0).abs() < 1e-12);
}
