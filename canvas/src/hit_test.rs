use super::*;

fn store_with(walls: &[Wall]) -> PlanStore {
    let mut store = PlanStore::new();
    for wall in walls {
        store.add_wall(*wall);
    }
    store
}

fn horizontal(position: f64, a: f64, b: f64) -> Wall {
    Wall::new(WallAxis::Horizontal, position, a, b)
}

fn vertical(position: f64, a: f64, b: f64) -> Wall {
    Wall::new(WallAxis::Vertical, position, a, b)
}

fn test_at(x: f64, y: f64, plan: &PlanStore) -> Option<Hit> {
    hit_test(Point::new(x, y), plan, &Camera::default(), true)
}

// --- Misses ---

#[test]
fn empty_plan_hits_nothing() {
    assert_eq!(test_at(100.0, 100.0, &PlanStore::new()), None);
}

#[test]
fn far_from_wall_hits_nothing() {
    let plan = store_with(&[horizontal(200.0, 100.0, 260.0)]);
    assert_eq!(test_at(500.0, 500.0, &plan), None);
}

// --- Body ---

#[test]
fn horizontal_body_hit_inside_band() {
    let plan = store_with(&[horizontal(200.0, 100.0, 260.0)]);
    assert_eq!(test_at(180.0, 205.0, &plan), Some(Hit::Body { index: 0 }));
}

#[test]
fn horizontal_body_miss_outside_band() {
    let plan = store_with(&[horizontal(200.0, 100.0, 260.0)]);
    assert_eq!(test_at(180.0, 211.0, &plan), None);
}

#[test]
fn vertical_body_hit() {
    let plan = store_with(&[vertical(150.0, 20.0, 200.0)]);
    assert_eq!(test_at(145.0, 100.0, &plan), Some(Hit::Body { index: 0 }));
}

#[test]
fn body_hit_just_past_handle_radius() {
    let plan = store_with(&[horizontal(200.0, 100.0, 260.0)]);
    assert_eq!(test_at(107.0, 200.0, &plan), Some(Hit::Body { index: 0 }));
}

#[test]
fn body_beyond_extent_misses() {
    let plan = store_with(&[horizontal(200.0, 100.0, 260.0)]);
    assert_eq!(test_at(270.0, 200.0, &plan), None);
}

// --- Handles ---

#[test]
fn start_handle_hit() {
    let plan = store_with(&[horizontal(200.0, 100.0, 260.0)]);
    assert_eq!(
        test_at(102.0, 198.0, &plan),
        Some(Hit::Handle { index: 0, end: WallEnd::Start })
    );
}

#[test]
fn end_handle_hit() {
    let plan = store_with(&[horizontal(200.0, 100.0, 260.0)]);
    assert_eq!(
        test_at(258.0, 203.0, &plan),
        Some(Hit::Handle { index: 0, end: WallEnd::End })
    );
}

#[test]
fn handle_beats_body() {
    // The endpoint sits inside the body band too; the handle must win.
    let plan = store_with(&[horizontal(200.0, 100.0, 260.0)]);
    assert_eq!(
        test_at(100.0, 200.0, &plan),
        Some(Hit::Handle { index: 0, end: WallEnd::Start })
    );
}

#[test]
fn handle_radius_scales_with_zoom() {
    let plan = store_with(&[horizontal(200.0, 100.0, 260.0)]);
    let camera = Camera { zoom: 0.5, ..Camera::default() };
    // 6px at zoom 0.5 is a 3-world-unit radius; 4 units off misses.
    let hit = hit_test(Point::new(104.0, 200.0), &plan, &camera, true);
    assert_eq!(hit, Some(Hit::Body { index: 0 }));
    let hit = hit_test(Point::new(102.0, 200.0), &plan, &camera, true);
    assert_eq!(hit, Some(Hit::Handle { index: 0, end: WallEnd::Start }));
}

// --- Labels ---

#[test]
fn label_hit_above_horizontal_wall() {
    let plan = store_with(&[horizontal(200.0, 100.0, 260.0)]);
    // Anchor is (180, 185).
    assert_eq!(test_at(180.0, 185.0, &plan), Some(Hit::Label { index: 0 }));
}

#[test]
fn label_ignored_when_measurements_hidden() {
    let plan = store_with(&[horizontal(200.0, 100.0, 260.0)]);
    let hit = hit_test(Point::new(180.0, 185.0), &plan, &Camera::default(), false);
    assert_eq!(hit, None);
}

#[test]
fn label_beats_body_when_boxes_overlap() {
    // The second wall's body band covers the first wall's label anchor;
    // the label still wins.
    let plan = store_with(&[horizontal(200.0, 100.0, 260.0), horizontal(185.0, 100.0, 260.0)]);
    assert_eq!(test_at(180.0, 185.0, &plan), Some(Hit::Label { index: 0 }));
}

// --- Stacking ---

#[test]
fn topmost_wall_wins() {
    let plan = store_with(&[horizontal(200.0, 100.0, 260.0), horizontal(200.0, 100.0, 260.0)]);
    assert_eq!(test_at(180.0, 200.0, &plan), Some(Hit::Body { index: 1 }));
}

#[test]
fn lower_wall_hit_where_top_absent() {
    let plan = store_with(&[horizontal(200.0, 100.0, 260.0), horizontal(400.0, 100.0, 260.0)]);
    assert_eq!(test_at(180.0, 200.0, &plan), Some(Hit::Body { index: 0 }));
}
