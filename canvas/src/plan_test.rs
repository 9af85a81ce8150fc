#![allow(clippy::float_cmp)]

use super::*;
use crate::template;

fn horizontal(position: f64, a: f64, b: f64) -> Wall {
    Wall::new(WallAxis::Horizontal, position, a, b)
}

fn vertical(position: f64, a: f64, b: f64) -> Wall {
    Wall::new(WallAxis::Vertical, position, a, b)
}

fn store_with(walls: &[Wall]) -> PlanStore {
    let mut store = PlanStore::new();
    for wall in walls {
        store.add_wall(*wall);
    }
    store
}

// --- Wall construction ---

#[test]
fn new_normalises_swapped_endpoints() {
    let wall = horizontal(200.0, 260.0, 100.0);
    assert_eq!(wall.start, 100.0);
    assert_eq!(wall.end, 260.0);
}

#[test]
fn new_keeps_ordered_endpoints() {
    let wall = vertical(50.0, 10.0, 90.0);
    assert_eq!(wall.start, 10.0);
    assert_eq!(wall.end, 90.0);
}

// --- Length and labels ---

#[test]
fn length_px_is_extent() {
    assert_eq!(horizontal(0.0, 100.0, 260.0).length_px(), 160.0);
}

#[test]
fn length_m_converts_at_100px_per_meter() {
    assert_eq!(horizontal(0.0, 100.0, 260.0).length_m(), 1.6);
}

#[test]
fn label_text_two_decimals() {
    assert_eq!(horizontal(0.0, 100.0, 260.0).label_text(), "1.60m");
}

#[test]
fn label_text_rounds() {
    assert_eq!(horizontal(0.0, 0.0, 333.4).label_text(), "3.33m");
    assert_eq!(horizontal(0.0, 0.0, 333.6).label_text(), "3.34m");
}

// --- Endpoints ---

#[test]
fn horizontal_endpoints() {
    let (a, b) = horizontal(200.0, 100.0, 260.0).endpoints();
    assert_eq!(a, Point::new(100.0, 200.0));
    assert_eq!(b, Point::new(260.0, 200.0));
}

#[test]
fn vertical_endpoints() {
    let (a, b) = vertical(150.0, 20.0, 80.0).endpoints();
    assert_eq!(a, Point::new(150.0, 20.0));
    assert_eq!(b, Point::new(150.0, 80.0));
}

#[test]
fn endpoint_selects_end() {
    let wall = horizontal(200.0, 100.0, 260.0);
    assert_eq!(wall.endpoint(WallEnd::Start), Point::new(100.0, 200.0));
    assert_eq!(wall.endpoint(WallEnd::End), Point::new(260.0, 200.0));
}

// --- Label anchor ---

#[test]
fn label_anchor_above_horizontal_wall() {
    let anchor = horizontal(200.0, 100.0, 260.0).label_anchor(1.0);
    assert_eq!(anchor, Point::new(180.0, 185.0));
}

#[test]
fn label_anchor_right_of_vertical_wall() {
    let anchor = vertical(150.0, 20.0, 80.0).label_anchor(1.0);
    assert_eq!(anchor, Point::new(165.0, 50.0));
}

#[test]
fn label_anchor_offset_shrinks_with_zoom() {
    let wall = horizontal(200.0, 100.0, 260.0);
    let far = wall.label_anchor(0.5);
    let near = wall.label_anchor(2.0);
    assert_eq!(far.y, 170.0);
    assert_eq!(near.y, 192.5);
}

// --- Store: wall mutations ---

#[test]
fn add_wall_returns_index() {
    let mut store = PlanStore::new();
    assert_eq!(store.add_wall(horizontal(0.0, 0.0, 100.0)), 0);
    assert_eq!(store.add_wall(vertical(0.0, 0.0, 100.0)), 1);
    assert_eq!(store.len(), 2);
}

#[test]
fn move_wall_changes_position_only() {
    let mut store = store_with(&[horizontal(200.0, 100.0, 260.0)]);
    assert!(store.move_wall(0, 250.0));
    let wall = store.walls()[0];
    assert_eq!(wall.position, 250.0);
    assert_eq!(wall.start, 100.0);
    assert_eq!(wall.end, 260.0);
}

#[test]
fn move_wall_out_of_range_is_noop() {
    let mut store = store_with(&[horizontal(200.0, 100.0, 260.0)]);
    assert!(!store.move_wall(5, 250.0));
}

#[test]
fn resize_start_moves_endpoint() {
    let mut store = store_with(&[horizontal(200.0, 100.0, 260.0)]);
    assert!(store.resize_wall(0, WallEnd::Start, 150.0));
    assert_eq!(store.walls()[0].start, 150.0);
}

#[test]
fn resize_start_clamps_to_min_length() {
    let mut store = store_with(&[horizontal(200.0, 100.0, 260.0)]);
    assert!(store.resize_wall(0, WallEnd::Start, 255.0));
    let wall = store.walls()[0];
    assert_eq!(wall.start, 240.0);
    assert_eq!(wall.end, 260.0);
    assert_eq!(wall.length_px(), 20.0);
}

#[test]
fn resize_end_clamps_to_min_length() {
    let mut store = store_with(&[horizontal(200.0, 100.0, 260.0)]);
    assert!(store.resize_wall(0, WallEnd::End, 90.0));
    let wall = store.walls()[0];
    assert_eq!(wall.start, 100.0);
    assert_eq!(wall.end, 120.0);
}

#[test]
fn resize_past_far_end_never_inverts() {
    let mut store = store_with(&[vertical(0.0, 50.0, 200.0)]);
    assert!(store.resize_wall(0, WallEnd::Start, 500.0));
    let wall = store.walls()[0];
    assert!(wall.end > wall.start);
}

// --- Store: exact length edit ---

#[test]
fn set_wall_length_keeps_midpoint() {
    let mut store = store_with(&[horizontal(200.0, 100.0, 260.0)]);
    assert!(store.set_wall_length(0, 2.0));
    let wall = store.walls()[0];
    assert_eq!(wall.start, 80.0);
    assert_eq!(wall.end, 280.0);
    assert_eq!(wall.label_text(), "2.00m");
}

#[test]
fn set_wall_length_rejects_zero() {
    let mut store = store_with(&[horizontal(200.0, 100.0, 260.0)]);
    assert!(!store.set_wall_length(0, 0.0));
    assert_eq!(store.walls()[0].length_px(), 160.0);
}

#[test]
fn set_wall_length_rejects_negative() {
    let mut store = store_with(&[horizontal(200.0, 100.0, 260.0)]);
    assert!(!store.set_wall_length(0, -1.5));
}

#[test]
fn set_wall_length_rejects_nan() {
    let mut store = store_with(&[horizontal(200.0, 100.0, 260.0)]);
    assert!(!store.set_wall_length(0, f64::NAN));
}

// --- Store: backgrounds ---

#[test]
fn default_background_is_none() {
    assert_eq!(*PlanStore::new().background(), Background::None);
}

#[test]
fn set_background_image_keeps_walls() {
    let mut store = store_with(&[horizontal(200.0, 100.0, 260.0)]);
    store.set_rooms(vec![Room { name: "old".into(), data: serde_json::Value::Null }]);
    store.set_background_image("plan.png", 800.0, 600.0);
    assert_eq!(store.len(), 1);
    assert!(store.rooms().is_empty());
    assert_eq!(
        *store.background(),
        Background::Image { src: "plan.png".into(), width: 800.0, height: 600.0 }
    );
}

#[test]
fn apply_template_resets_everything() {
    let mut store = store_with(&[horizontal(200.0, 100.0, 260.0)]);
    store.set_measurements(vec![Measurement { x: 1.0, y: 2.0, text: "3m".into() }]);
    let Some(t) = template::find("light_luxury") else {
        panic!("catalog is missing light_luxury");
    };
    let active = store.apply_template(t);
    assert!(store.is_empty());
    assert!(store.measurements().is_empty());
    assert_eq!(active.as_deref(), Some("Living room"));
    assert_eq!(*store.background(), Background::Template { id: "light_luxury".into() });
}

#[test]
fn background_image_equality_is_fieldwise() {
    let a = Background::Image { src: "plan.png".into(), width: 640.0, height: 480.0 };
    let b = Background::Image { src: "plan.png".into(), width: 640.0, height: 480.0 };
    assert_eq!(a, b);
    assert_ne!(a, Background::Image { src: "plan.png".into(), width: 640.0, height: 481.0 });
    assert_ne!(a, Background::Template { id: "plan.png".into() });
}

#[test]
fn clear_removes_all_state() {
    let mut store = store_with(&[horizontal(200.0, 100.0, 260.0)]);
    store.set_background_image("plan.png", 800.0, 600.0);
    store.clear();
    assert!(store.is_empty());
    assert_eq!(*store.background(), Background::None);
}

// --- Serde ---

#[test]
fn wall_serialises_with_lowercase_axis() {
    let json = serde_json::to_value(horizontal(200.0, 100.0, 260.0));
    let Ok(value) = json else {
        panic!("wall should serialise");
    };
    assert_eq!(value["axis"], "horizontal");
    assert_eq!(value["position"], 200.0);
}

#[test]
fn background_round_trips_through_json() {
    let bg = Background::Image { src: "plan.png".into(), width: 800.0, height: 600.0 };
    let Ok(json) = serde_json::to_string(&bg) else {
        panic!("background should serialise");
    };
    assert!(json.contains("\"kind\":\"image\""));
    let Ok(back) = serde_json::from_str::<Background>(&json) else {
        panic!("background should deserialise");
    };
    assert_eq!(back, bg);
}

#[test]
fn plan_store_round_trips_through_json() {
    let mut store = store_with(&[horizontal(200.0, 100.0, 260.0), vertical(50.0, 0.0, 100.0)]);
    store.set_measurements(vec![Measurement { x: 10.0, y: 20.0, text: "2.5m".into() }]);
    let Ok(json) = serde_json::to_string(&store) else {
        panic!("store should serialise");
    };
    let Ok(back) = serde_json::from_str::<PlanStore>(&json) else {
        panic!("store should deserialise");
    };
    assert_eq!(back.walls(), store.walls());
    assert_eq!(back.measurements(), store.measurements());
}
