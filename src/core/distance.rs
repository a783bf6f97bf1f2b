use crate::models::Coordinate;

/// Mean Earth radius in meters (IUGG)
const EARTH_RADIUS_M: f64 = 6_371_008.8;

/// Great-circle distance between two coordinates in meters
///
/// Uses the haversine formula. Symmetric in its arguments and zero for
/// coincident coordinates within floating-point tolerance. This is not a
/// validation layer: NaN in, NaN out.
#[inline]
pub fn distance_meters(a: Coordinate, b: Coordinate) -> f64 {
    let lat_a = a.latitude.to_radians();
    let lat_b = b.latitude.to_radians();
    let delta_lat = (b.latitude - a.latitude).to_radians();
    let delta_lon = (b.longitude - a.longitude).to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + lat_a.cos() * lat_b.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_M * c
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_coincident_is_zero() {
        let praca = Coordinate::new(-19.9329, -43.9391);
        assert!(distance_meters(praca, praca).abs() < 1e-6);
    }

    #[test]
    fn test_distance_london_to_paris() {
        // London to Paris is approximately 344 km
        let london = Coordinate::new(51.5074, -0.1278);
        let paris = Coordinate::new(48.8566, 2.3522);

        let distance = distance_meters(london, paris);
        assert!(
            (distance - 344_000.0).abs() < 10_000.0,
            "Distance should be ~344km, got {}m",
            distance
        );
    }

    #[test]
    fn test_distance_within_belo_horizonte() {
        // Praça da Liberdade to Estádio Mineirão is roughly 8 km
        let praca = Coordinate::new(-19.9329, -43.9391);
        let mineirao = Coordinate::new(-19.8651, -43.9664);

        let distance = distance_meters(praca, mineirao);
        assert!(distance > 7_000.0 && distance < 9_000.0, "got {}m", distance);
    }

    #[test]
    fn test_distance_is_symmetric() {
        let a = Coordinate::new(-19.9329, -43.9391);
        let b = Coordinate::new(-19.8651, -43.9664);
        assert_eq!(distance_meters(a, b), distance_meters(b, a));
    }

    #[test]
    fn test_nan_in_nan_out() {
        let a = Coordinate::new(f64::NAN, 0.0);
        let b = Coordinate::new(0.0, 0.0);
        assert!(distance_meters(a, b).is_nan());
    }
}
