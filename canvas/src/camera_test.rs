#![allow(clippy::float_cmp)]

use super::*;

const EPSILON: f64 = 1e-10;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn point_approx_eq(a: Point, b: Point) -> bool {
    approx_eq(a.x, b.x) && approx_eq(a.y, b.y)
}

fn cam(pan_x: f64, pan_y: f64, zoom: f64) -> Camera {
    Camera { pan_x, pan_y, zoom, ..Camera::default() }
}

// --- Point ---

#[test]
fn point_new() {
    let p = Point::new(3.0, 4.0);
    assert_eq!(p.x, 3.0);
    assert_eq!(p.y, 4.0);
}

#[test]
fn point_equality() {
    assert_eq!(Point::new(1.0, 2.0), Point::new(1.0, 2.0));
    assert_ne!(Point::new(1.0, 2.0), Point::new(1.0, 3.0));
}

// --- Camera defaults ---

#[test]
fn camera_default_pan_is_zero() {
    let cam = Camera::default();
    assert_eq!(cam.pan_x, 0.0);
    assert_eq!(cam.pan_y, 0.0);
}

#[test]
fn camera_default_zoom_is_one() {
    assert_eq!(Camera::default().zoom, 1.0);
}

#[test]
fn camera_default_rotation_is_zero() {
    assert_eq!(Camera::default().rotation_deg, 0.0);
}

// --- Zoom clamping ---

#[test]
fn set_zoom_clamps_low() {
    let mut c = Camera::default();
    c.set_zoom(0.01);
    assert_eq!(c.zoom, 0.1);
}

#[test]
fn set_zoom_clamps_high() {
    let mut c = Camera::default();
    c.set_zoom(50.0);
    assert_eq!(c.zoom, 2.0);
}

#[test]
fn set_zoom_within_range_unchanged() {
    let mut c = Camera::default();
    c.set_zoom(1.5);
    assert_eq!(c.zoom, 1.5);
}

#[test]
fn zoom_by_multiplies() {
    let mut c = Camera::default();
    c.zoom_by(1.1);
    assert!(approx_eq(c.zoom, 1.1));
}

#[test]
fn zoom_by_saturates_at_min() {
    let mut c = cam(0.0, 0.0, 0.1);
    c.zoom_by(0.9);
    assert_eq!(c.zoom, 0.1);
}

#[test]
fn zoom_by_saturates_at_max() {
    let mut c = cam(0.0, 0.0, 2.0);
    c.zoom_by(1.1);
    assert_eq!(c.zoom, 2.0);
}

#[test]
fn repeated_zoom_out_never_leaves_range() {
    let mut c = Camera::default();
    for _ in 0..100 {
        c.zoom_by(0.9);
    }
    assert_eq!(c.zoom, 0.1);
}

// --- screen_to_world ---

#[test]
fn screen_to_world_identity() {
    let world = Camera::default().screen_to_world(Point::new(50.0, 75.0));
    assert!(point_approx_eq(world, Point::new(50.0, 75.0)));
}

#[test]
fn screen_to_world_with_zoom() {
    let world = cam(0.0, 0.0, 2.0).screen_to_world(Point::new(40.0, 80.0));
    assert!(approx_eq(world.x, 20.0));
    assert!(approx_eq(world.y, 40.0));
}

#[test]
fn screen_to_world_with_pan() {
    let world = cam(100.0, 50.0, 1.0).screen_to_world(Point::new(100.0, 50.0));
    assert!(point_approx_eq(world, Point::new(0.0, 0.0)));
}

#[test]
fn screen_to_world_with_pan_and_zoom() {
    // (30-20)/2 = 5, (20-10)/2 = 5
    let world = cam(20.0, 10.0, 2.0).screen_to_world(Point::new(30.0, 20.0));
    assert!(point_approx_eq(world, Point::new(5.0, 5.0)));
}

// --- world_to_screen ---

#[test]
fn world_to_screen_identity() {
    let screen = Camera::default().world_to_screen(Point::new(50.0, 75.0));
    assert!(point_approx_eq(screen, Point::new(50.0, 75.0)));
}

#[test]
fn world_to_screen_with_pan_and_zoom() {
    // 5*2 + 20 = 30, 5*2 + 10 = 20
    let screen = cam(20.0, 10.0, 2.0).world_to_screen(Point::new(5.0, 5.0));
    assert!(point_approx_eq(screen, Point::new(30.0, 20.0)));
}

// --- Rotation ---

#[test]
fn rotation_quarter_turn_about_center() {
    let c = Camera {
        rotation_deg: 90.0,
        center_x: 100.0,
        center_y: 100.0,
        ..Camera::default()
    };
    // World (110, 100) is 10px right of center; a 90° turn puts it 10px below.
    let screen = c.world_to_screen(Point::new(110.0, 100.0));
    assert!(approx_eq(screen.x, 100.0));
    assert!(approx_eq(screen.y, 110.0));
}

#[test]
fn rotation_center_is_fixed_point() {
    let c = Camera {
        rotation_deg: 37.0,
        center_x: 400.0,
        center_y: 300.0,
        ..Camera::default()
    };
    let screen = c.world_to_screen(Point::new(400.0, 300.0));
    assert!(point_approx_eq(screen, Point::new(400.0, 300.0)));
}

#[test]
fn rotation_does_not_change_distances() {
    let c = Camera { rotation_deg: 45.0, center_x: 50.0, center_y: 50.0, ..Camera::default() };
    let a = c.world_to_screen(Point::new(0.0, 0.0));
    let b = c.world_to_screen(Point::new(30.0, 40.0));
    let dist = (b.x - a.x).hypot(b.y - a.y);
    assert!(approx_eq(dist, 50.0));
}

// --- Round trips ---

#[test]
fn round_trip_identity() {
    let c = Camera::default();
    let world = Point::new(100.0, 200.0);
    assert!(point_approx_eq(world, c.screen_to_world(c.world_to_screen(world))));
}

#[test]
fn round_trip_with_pan_and_zoom() {
    let c = cam(50.0, -30.0, 2.0);
    let world = Point::new(100.0, 200.0);
    assert!(point_approx_eq(world, c.screen_to_world(c.world_to_screen(world))));
}

#[test]
fn round_trip_with_rotation() {
    let c = Camera {
        pan_x: 13.7,
        pan_y: -42.3,
        zoom: 0.75,
        rotation_deg: 123.0,
        center_x: 320.0,
        center_y: 240.0,
    };
    let world = Point::new(333.3, -999.9);
    assert!(point_approx_eq(world, c.screen_to_world(c.world_to_screen(world))));
}

#[test]
fn round_trip_screen_first() {
    let c = Camera {
        pan_x: 10.0,
        pan_y: 20.0,
        zoom: 1.5,
        rotation_deg: -30.0,
        center_x: 200.0,
        center_y: 150.0,
    };
    let screen = Point::new(400.0, 300.0);
    assert!(point_approx_eq(screen, c.world_to_screen(c.screen_to_world(screen))));
}

// --- screen_dist_to_world ---

#[test]
fn screen_dist_to_world_identity_at_zoom_one() {
    assert!(approx_eq(Camera::default().screen_dist_to_world(42.0), 42.0));
}

#[test]
fn screen_dist_to_world_with_zoom() {
    assert!(approx_eq(cam(0.0, 0.0, 2.0).screen_dist_to_world(10.0), 5.0));
}

#[test]
fn screen_dist_to_world_ignores_pan() {
    assert!(approx_eq(cam(999.0, -999.0, 0.5).screen_dist_to_world(8.0), 16.0));
}
