// Unit tests for Pontos BH

use pontos_bh::core::{count_free_within_radius, distance_meters};
use pontos_bh::models::{Coordinate, InvalidPoint, Point, PointStatus};

fn free_point(latitude: f64, longitude: f64) -> Point {
    Point {
        latitude,
        longitude,
        name: format!("point at {latitude},{longitude}"),
        status: PointStatus::Free,
    }
}

#[test]
fn test_distance_zero_for_same_coordinate() {
    let praca = Coordinate::new(-19.9329, -43.9391);
    assert!(distance_meters(praca, praca).abs() < 0.01);
}

#[test]
fn test_distance_symmetry() {
    let pairs = [
        (
            Coordinate::new(-19.9329, -43.9391),
            Coordinate::new(-19.8651, -43.9664),
        ),
        (
            Coordinate::new(51.5074, -0.1278),
            Coordinate::new(48.8566, 2.3522),
        ),
        (Coordinate::new(90.0, 0.0), Coordinate::new(-90.0, 0.0)),
    ];

    for (a, b) in pairs {
        assert_eq!(distance_meters(a, b), distance_meters(b, a));
    }
}

#[test]
fn test_distance_praca_to_mercado_central() {
    // Praça da Liberdade to Mercado Central is a little over 1 km
    let praca = Coordinate::new(-19.9329, -43.9391);
    let mercado = Coordinate::new(-19.9230, -43.9387);

    let distance = distance_meters(praca, mercado);
    assert!(distance > 1_000.0 && distance < 1_300.0, "got {}m", distance);
}

#[test]
fn test_radius_boundary_inclusive_exclusive() {
    let center = Coordinate::new(0.0, 0.0);
    let target = free_point(0.0, 0.02);
    let exact = distance_meters(center, target.coordinate());
    let points = vec![target];

    let at_boundary = count_free_within_radius(&points, center, exact);
    assert_eq!(at_boundary.total_in_radius, 1);
    assert_eq!(at_boundary.free_in_radius, 1);

    let just_under = count_free_within_radius(&points, center, exact - 0.5);
    assert_eq!(just_under.total_in_radius, 0);
    assert_eq!(just_under.free_in_radius, 0);
}

#[test]
fn test_empty_collection_counts_zero() {
    let count = count_free_within_radius(&[], Coordinate::new(-19.93, -43.94), 2000.0);
    assert_eq!(count.total_in_radius, 0);
    assert_eq!(count.free_in_radius, 0);
}

#[test]
fn test_only_nearby_points_counted() {
    let praca = Coordinate::new(-19.9329, -43.9391);
    let points = vec![
        free_point(-19.9329, -43.9391), // distance 0
        free_point(-19.9230, -43.9387), // ~1.1 km
        free_point(-19.8651, -43.9664), // ~8 km, outside
    ];

    let count = count_free_within_radius(&points, praca, 2000.0);
    assert_eq!(count.total_in_radius, 2);
    assert_eq!(count.free_in_radius, 2);
}

#[test]
fn test_point_validation_rejects_out_of_range() {
    assert!(matches!(
        Point::new(90.1, 0.0, "north of north").unwrap_err(),
        InvalidPoint::LatitudeOutOfRange(_)
    ));
    assert!(matches!(
        Point::new(0.0, -180.1, "west of west").unwrap_err(),
        InvalidPoint::LongitudeOutOfRange(_)
    ));
    assert!(matches!(
        Point::new(0.0, 0.0, "  ").unwrap_err(),
        InvalidPoint::EmptyName
    ));
}

#[test]
fn test_point_boundary_values_accepted() {
    assert!(Point::new(90.0, 180.0, "edge").is_ok());
    assert!(Point::new(-90.0, -180.0, "other edge").is_ok());
}
