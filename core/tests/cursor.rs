use epiviz_core::cursor::ChartCursor;
use epiviz_core::error::VizError;
use epiviz_core::recipes::ArmPoint;
use epiviz_core::scale::LinearScale;
use epiviz_core::types::MitigationType;
use std::cell::RefCell;
use std::rc::Rc;

// ── Helpers ──────────────────────────────────────────────────────────────────

/// Days 0, 10, 20, ... 200, one point per arm per day.
fn grid_points() -> Vec<ArmPoint> {
    (0..=20)
        .flat_map(|i| {
            let x = f64::from(i) * 10.0;
            MitigationType::ALL.into_iter().map(move |arm| ArmPoint {
                x,
                y: x * 2.0,
                mitigation_type: arm,
            })
        })
        .collect()
}

/// Identity-ish x scale: data [0, 200] onto pixels [0, 200].
fn identity_scale() -> LinearScale {
    LinearScale::new("x", (0.0, 200.0), (0.0, 200.0)).unwrap()
}

fn cursor_with_log(
    points: &[ArmPoint],
) -> (ChartCursor<ArmPoint>, Rc<RefCell<Vec<(f64, usize)>>>) {
    let log: Rc<RefCell<Vec<(f64, usize)>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    let cursor = ChartCursor::new(
        identity_scale(),
        (20.0, 370.0),
        points,
        |p| p.x,
        Box::new(move |x, rows| sink.borrow_mut().push((x, rows.len()))),
    )
    .unwrap();
    (cursor, log)
}

// ── Tests ────────────────────────────────────────────────────────────────────

/// Pointer at data-x 14 resolves to 10 (4 < 6); at 16 it resolves to 20.
#[test]
fn resolves_nearest_x_by_midpoint() {
    let points = grid_points();
    let (mut cursor, _log) = cursor_with_log(&points);

    let hit = cursor.pointer_move(14.0).expect("hit");
    assert_eq!(hit.x, 10.0);
    let hit = cursor.pointer_move(16.0).expect("hit");
    assert_eq!(hit.x, 20.0);
}

/// The guide line lands on the resolved value's screen position, not the
/// raw pointer position.
#[test]
fn guide_snaps_to_resolved_value() {
    let points = grid_points();
    let (mut cursor, _log) = cursor_with_log(&points);

    let hit = cursor.pointer_move(14.0).expect("hit");
    assert_eq!(hit.screen_x, 10.0);
    assert_eq!(cursor.guide_x(), Some(10.0));
}

/// The renderer receives every row sharing the resolved x — one per arm
/// here.
#[test]
fn renderer_gets_all_rows_at_x() {
    let points = grid_points();
    let (mut cursor, log) = cursor_with_log(&points);

    cursor.pointer_move(101.0);
    assert_eq!(log.borrow().as_slice(), &[(100.0, 2)]);

    let rows = cursor.points_at(100.0).expect("bucket at 100");
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|p| p.x == 100.0));
}

/// A move without a preceding enter counts as an enter.
#[test]
fn move_implies_enter() {
    let points = grid_points();
    let (mut cursor, _log) = cursor_with_log(&points);

    assert_eq!(cursor.guide_x(), None);
    cursor.pointer_move(50.0);
    assert!(cursor.guide_x().is_some());

    cursor.pointer_leave();
    assert_eq!(cursor.guide_x(), None, "leave hides the guide");
}

/// After cleanup the cursor is detached: it resolves nothing and never
/// fires the renderer again.
#[test]
fn cleanup_fully_detaches() {
    let points = grid_points();
    let (mut cursor, log) = cursor_with_log(&points);

    cursor.pointer_move(14.0);
    assert_eq!(log.borrow().len(), 1);

    cursor.cleanup();
    assert!(cursor.is_detached());
    assert_eq!(cursor.pointer_move(14.0), None);
    cursor.pointer_enter();
    assert_eq!(cursor.pointer_move(50.0), None);
    assert_eq!(log.borrow().len(), 1, "no callback after cleanup");
}

/// A degenerate guide range is a fatal configuration error at
/// construction.
#[test]
fn degenerate_guide_range_is_construction_error() {
    let points = grid_points();
    let result = ChartCursor::new(
        identity_scale(),
        (100.0, 100.0),
        &points,
        |p| p.x,
        Box::new(|_, _| {}),
    );
    assert!(matches!(
        result,
        Err(VizError::DegenerateGuideRange(v)) if v == 100.0
    ));
}

/// A scale that cannot invert (zero-span domain or range) never gets
/// constructed in the first place.
#[test]
fn degenerate_scales_are_rejected() {
    assert!(matches!(
        LinearScale::new("x", (5.0, 5.0), (0.0, 100.0)),
        Err(VizError::DegenerateDomain { axis: "x", .. })
    ));
    assert!(matches!(
        LinearScale::new("y", (0.0, 100.0), (40.0, 40.0)),
        Err(VizError::DegenerateRange { axis: "y", .. })
    ));
}

/// An empty chart resolves nothing but does not panic.
#[test]
fn empty_points_resolve_to_nothing() {
    let (mut cursor, log) = cursor_with_log(&[]);
    assert_eq!(cursor.pointer_move(50.0), None);
    assert!(log.borrow().is_empty());
}

/// A non-trivial scale: pixels invert into data space before bisecting.
#[test]
fn resolution_happens_in_data_space() {
    let points = grid_points();
    // Data [0, 200] drawn across pixels [40, 640]: 3 px per data unit.
    let scale = LinearScale::new("x", (0.0, 200.0), (40.0, 640.0)).unwrap();
    let mut cursor = ChartCursor::new(
        scale,
        (20.0, 370.0),
        &points,
        |p| p.x,
        Box::new(|_, _| {}),
    )
    .unwrap();

    // Pixel 82 -> data 14 -> nearest day 10.
    let hit = cursor.pointer_move(82.0).expect("hit");
    assert_eq!(hit.x, 10.0);
    assert_eq!(hit.screen_x, 70.0, "guide at apply(10) = 40 + 30");
}
