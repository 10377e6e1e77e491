use super::*;

fn square(mode: CageMode) -> CageConfig {
    let mut cage = CageConfig::new(mode);
    for (x, y) in [(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)] {
        cage.add_point(Point::new(x, y));
    }
    cage
}

#[test]
fn undeformed_cage_has_unit_scaling_and_unit_normals() {
    let cage = square(CageMode::CageChange);
    for p in cage.points() {
        assert_eq!(p.edge_scaling_factor, 1.0);
        assert!((p.edge_normal.hypot() - 1.0).abs() < 1e-12);
    }
    assert_eq!(cage.points()[0].edge_normal, Vec2::new(0.0, -1.0));
}

#[test]
fn insert_and_remove_keep_derived_fields_consistent() {
    let mut cage = square(CageMode::CageChange);
    cage.insert_point(1, Point::new(5.0, 0.0)).unwrap();
    assert_eq!(cage.len(), 5);
    assert_eq!(cage.points()[1].src_point, Point::new(5.0, 0.0));
    assert!(cage.insert_point(9, Point::ZERO).is_err());

    cage.remove_last_point();
    assert_eq!(cage.len(), 4);
    let last = cage.points()[3];
    assert!((last.edge_normal.hypot() - 1.0).abs() < 1e-12);
}

#[test]
fn duplicate_points_give_zero_normal_and_unit_scale() {
    let mut cage = CageConfig::new(CageMode::CageChange);
    cage.add_point(Point::new(1.0, 1.0));
    cage.add_point(Point::new(1.0, 1.0));
    assert_eq!(cage.points()[0].edge_scaling_factor, 1.0);
    assert_eq!(cage.points()[0].edge_normal, Vec2::ZERO);
}

#[test]
fn reverse_if_needed_fixes_orientation() {
    let mut cage = square(CageMode::CageChange);
    assert!(cage.reverse_if_needed());
    assert_eq!(cage.points()[0].src_point, Point::new(0.0, 10.0));
    assert!(!cage.reverse_if_needed());
}

#[test]
fn selection_operations() {
    let mut cage = square(CageMode::CageChange);
    cage.select_point(2).unwrap();
    assert!(cage.points()[2].selected);
    assert_eq!(cage.points().iter().filter(|p| p.selected).count(), 1);

    cage.toggle_selection(0).unwrap();
    assert!(cage.points()[0].selected);
    assert!(cage.toggle_selection(4).is_err());

    cage.select_area(Rect::new(-1.0, -1.0, 11.0, 1.0));
    let selected: Vec<bool> = cage.points().iter().map(|p| p.selected).collect();
    assert_eq!(selected, vec![true, true, false, false]);

    cage.remove_selected_points();
    assert_eq!(cage.len(), 2);
    cage.deselect_all();
    assert!(cage.points().iter().all(|p| !p.selected));
}

#[test]
fn deform_displacement_moves_destinations_only() {
    let mut cage = square(CageMode::Deform);
    cage.select_point(1).unwrap();
    cage.add_displacement(Vec2::new(10.0, 0.0));
    assert_eq!(cage.dest_position(1), Point::new(20.0, 0.0));
    assert_eq!(cage.src_position(1), Point::new(10.0, 0.0));
    assert_eq!(cage.points()[0].edge_scaling_factor, 2.0);

    cage.commit_displacement();
    assert_eq!(cage.displacement(), Vec2::ZERO);
    assert_eq!(cage.points()[1].dest_point, Point::new(20.0, 0.0));
    assert_eq!(cage.points()[1].src_point, Point::new(10.0, 0.0));
    assert_eq!(cage.points()[0].edge_scaling_factor, 2.0);
}

#[test]
fn cage_change_displacement_moves_both_and_reset_discards_it() {
    let mut cage = square(CageMode::CageChange);
    cage.select_point(0).unwrap();
    cage.add_displacement(Vec2::new(-2.0, -3.0));
    assert_eq!(cage.src_position(0), Point::new(-2.0, -3.0));
    assert_eq!(cage.bounding_box(), Roi::new(-2, -3, 12, 13));

    cage.reset_displacement();
    assert_eq!(cage.src_position(0), Point::ZERO);

    cage.add_displacement(Vec2::new(1.0, 1.0));
    cage.commit_displacement();
    assert_eq!(cage.points()[0].src_point, Point::new(1.0, 1.0));
    assert_eq!(cage.points()[0].dest_point, Point::new(1.0, 1.0));
}

#[test]
fn point_inside_and_bounding_box() {
    let cage = square(CageMode::CageChange);
    assert!(cage.point_inside(Point::new(5.0, 5.0)));
    assert!(!cage.point_inside(Point::new(15.0, 5.0)));
    assert!(!cage.point_inside(Point::new(5.0, -0.5)));
    assert_eq!(cage.bounding_box(), Roi::new(0, 0, 10, 10));
    assert_eq!(CageConfig::default().bounding_box(), Roi::default());
    assert!(!CageConfig::default().point_inside(Point::ZERO));
}

#[test]
fn bounding_box_of_a_very_wide_cage() {
    let mut cage = CageConfig::new(CageMode::CageChange);
    for p in [Point::new(-2e9, 0.0), Point::new(2e9, 0.0), Point::new(0.0, 10.0)] {
        cage.add_point(p);
    }
    assert_eq!(cage.bounding_box(), Roi::new(-2_000_000_000, 0, 4_000_000_000, 10));
}
