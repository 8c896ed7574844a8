use cadview_core::geom::{Vec2, ViewBounds};
use cadview_core::normalize::{denormalize, normalize, normalize_point, NormalizeConfig};

#[test]
fn normalized_points_round_trip_through_bounds() {
    let cfg = NormalizeConfig::default();
    let bounds = ViewBounds::new(-12.5, 40.0, 3.0, 3.75);
    for &(x, y) in &[(0.0, 0.0), (1.0, 1.0), (0.25, 0.8), (0.5, 0.5), (0.999, 0.001)] {
        let p = Vec2::new(x, y);
        let back = normalize_point(denormalize(p, &bounds), &bounds, &cfg);
        assert!((back.x - x).abs() < 1e-9, "x drifted: {back:?}");
        assert!((back.y - y).abs() < 1e-9, "y drifted: {back:?}");
    }
}

#[test]
fn repeated_point_normalizes_to_center() {
    let cfg = NormalizeConfig::default();
    let pts = vec![Vec2::new(7.0, -2.0); 3];
    let (norm, bounds) = normalize(&pts, &cfg);
    for p in &norm {
        assert!(p.is_finite());
        assert_eq!(Vec2::new(0.5, 0.5), *p);
    }
    assert_eq!(ViewBounds::new(6.5, 7.5, -2.5, -1.5), bounds);
    assert_eq!(Vec2::new(7.0, -2.0), denormalize(norm[0], &bounds));
}

#[test]
fn collapsed_axis_keeps_other_axis_scaled() {
    let cfg = NormalizeConfig::default();
    let pts = vec![Vec2::new(0.0, 4.0), Vec2::new(10.0, 4.0), Vec2::new(5.0, 4.0)];
    let (norm, bounds) = normalize(&pts, &cfg);
    assert_eq!(vec![0.0, 1.0, 0.5], norm.iter().map(|p| p.x).collect::<Vec<_>>());
    assert!(norm.iter().all(|p| p.y == 0.5));
    assert_eq!(0.0, bounds.min_x);
    assert_eq!(10.0, bounds.max_x);
}

#[test]
fn empty_input_yields_unit_bounds() {
    let (norm, bounds) = normalize(&[], &NormalizeConfig::default());
    assert!(norm.is_empty());
    assert_eq!(ViewBounds::UNIT, bounds);
}

#[test]
fn normalization_maps_extremes_to_unit_square() {
    let pts = vec![Vec2::new(-3.0, 10.0), Vec2::new(5.0, 30.0), Vec2::new(1.0, 20.0)];
    let (norm, bounds) = normalize(&pts, &NormalizeConfig::default());
    assert_eq!(Vec2::new(0.0, 0.0), norm[0]);
    assert_eq!(Vec2::new(1.0, 1.0), norm[1]);
    assert_eq!(Vec2::new(0.5, 0.5), norm[2]);
    assert_eq!(ViewBounds::new(-3.0, 5.0, 10.0, 30.0), bounds);
}
