use super::*;

#[test]
fn moveto_stores_collapsed_triplet() {
    let stroke = BezierStroke::new_moveto(Point::new(1.0, 2.0));
    let kinds: Vec<AnchorKind> = stroke.anchors().iter().map(|a| a.kind).collect();
    assert_eq!(kinds, vec![AnchorKind::Control, AnchorKind::Anchor, AnchorKind::Control]);
    assert!(stroke.segments().is_empty());
    assert!(stroke.interpolate(0.1).is_none());
}

#[test]
fn straight_segment_interpolates_on_the_line() {
    let mut stroke = BezierStroke::new_moveto(Point::ZERO);
    stroke.line_to(Point::new(10.0, 0.0)).unwrap();

    let (points, closed) = stroke.interpolate(0.01).unwrap();
    assert!(!closed);
    assert!(points.len() > 2);
    assert_eq!(points[0], Point::ZERO);
    assert_eq!(*points.last().unwrap(), Point::new(10.0, 0.0));
    assert!(points.iter().all(|p| p.y == 0.0 && (0.0..=10.0).contains(&p.x)));
    assert!(points.windows(2).all(|w| w[0].x <= w[1].x));
}

#[test]
fn coarse_precision_emits_one_triple_per_half() {
    let mut stroke = BezierStroke::new_moveto(Point::ZERO);
    stroke
        .cubic_to(Point::new(1.0, 0.0), Point::new(2.0, 0.0), Point::new(3.0, 0.0))
        .unwrap();
    let (points, _) = stroke.interpolate(1.0).unwrap();
    assert_eq!(points.len(), 7);
}

#[test]
fn closed_stroke_returns_to_start() {
    let mut stroke = BezierStroke::new_moveto(Point::ZERO);
    stroke.line_to(Point::new(10.0, 0.0)).unwrap();
    stroke.line_to(Point::new(10.0, 10.0)).unwrap();
    stroke.close();
    assert!(stroke.is_closed());
    assert_eq!(stroke.segments().len(), 3);

    let (points, closed) = stroke.interpolate(0.1).unwrap();
    assert!(closed);
    assert_eq!(*points.last().unwrap(), Point::ZERO);
    assert!(stroke.line_to(Point::ZERO).is_err());
}

#[test]
fn close_folds_redundant_return_segment() {
    let mut stroke = BezierStroke::new_moveto(Point::ZERO);
    stroke.line_to(Point::new(10.0, 0.0)).unwrap();
    stroke.line_to(Point::new(10.0, 10.0)).unwrap();
    stroke.line_to(Point::ZERO).unwrap();
    assert_eq!(stroke.anchors().len(), 12);
    stroke.close();
    assert_eq!(stroke.anchors().len(), 9);
    assert_eq!(stroke.segments().len(), 3);
}

#[test]
fn conic_is_stored_as_equivalent_cubic() {
    let mut stroke = BezierStroke::new_moveto(Point::ZERO);
    stroke.conic_to(Point::new(3.0, 3.0), Point::new(6.0, 0.0)).unwrap();
    let segment = stroke.segments()[0];
    assert!((segment.p1 - Point::new(2.0, 2.0)).hypot() < 1e-12);
    assert!((segment.p2 - Point::new(4.0, 2.0)).hypot() < 1e-12);
    assert!((segment.eval(0.5) - Point::new(3.0, 1.5)).hypot() < 1e-12);
}

#[test]
fn reverse_keeps_first_anchor_of_closed_strokes() {
    let mut stroke = BezierStroke::new_moveto(Point::ZERO);
    stroke.line_to(Point::new(10.0, 0.0)).unwrap();
    stroke.line_to(Point::new(10.0, 10.0)).unwrap();

    let mut open = stroke.clone();
    open.reverse();
    assert_eq!(open.segments()[0].p0, Point::new(10.0, 10.0));

    stroke.close();
    stroke.reverse();
    let segments = stroke.segments();
    assert_eq!(segments[0].p0, Point::ZERO);
    assert_eq!(segments[0].p3, Point::new(10.0, 10.0));
}

#[test]
fn circle_has_expected_radius_and_length() {
    let center = Point::new(5.0, 5.0);
    let circle = BezierStroke::new_ellipse(center, 10.0, 10.0, 0.3);
    assert!(circle.is_closed());
    assert_eq!(circle.segments().len(), 4);

    let (points, _) = circle.interpolate(0.01).unwrap();
    for p in &points {
        let r = (*p - center).hypot();
        assert!((r - 10.0).abs() < 0.01, "{r}");
    }
    assert!((*points.last().unwrap() - points[0]).hypot() < 1e-9);

    let circumference = 2.0 * std::f64::consts::PI * 10.0;
    assert!((circle.length(1e-6) - circumference).abs() < 0.02);
}

#[test]
fn nearest_point_on_a_line() {
    let mut stroke = BezierStroke::new_moveto(Point::ZERO);
    stroke.line_to(Point::new(10.0, 0.0)).unwrap();
    stroke.line_to(Point::new(10.0, 10.0)).unwrap();

    let nearest = stroke.nearest_point(Point::new(12.0, 4.0), 1e-9).unwrap();
    assert_eq!(nearest.segment, 1);
    assert!((nearest.point - Point::new(10.0, 4.0)).hypot() < 1e-6);
    assert!((nearest.distance - 2.0).abs() < 1e-6);
}
