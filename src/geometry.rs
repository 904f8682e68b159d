use crate::catalog::{CatalogStreet, GeoPoint};

const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Project onto a plane tangent at the query latitude. Any monotone
/// planar metric gives the same nearest-street argmin; meters keep the
/// numbers meaningful in tests.
fn project(p: &GeoPoint, cos_lat: f64) -> (f64, f64) {
    (
        p.lng.to_radians() * cos_lat * EARTH_RADIUS_M,
        p.lat.to_radians() * EARTH_RADIUS_M,
    )
}

/// Minimum distance in meters from `point` to the segment `a..b`
/// (the segment, not the infinite line).
pub fn point_to_segment_distance(point: &GeoPoint, a: &GeoPoint, b: &GeoPoint) -> f64 {
    let cos_lat = point.lat.to_radians().cos();
    let (px, py) = project(point, cos_lat);
    let (ax, ay) = project(a, cos_lat);
    let (bx, by) = project(b, cos_lat);

    let dx = bx - ax;
    let dy = by - ay;
    let len_sq = dx * dx + dy * dy;

    let t = if len_sq == 0.0 {
        0.0
    } else {
        (((px - ax) * dx + (py - ay) * dy) / len_sq).clamp(0.0, 1.0)
    };

    let cx = ax + t * dx;
    let cy = ay + t * dy;
    (px - cx).hypot(py - cy)
}

/// Minimum over all consecutive point pairs of the street's path.
/// Callers guarantee `path.len() >= 2`.
pub fn distance_to_street(point: &GeoPoint, street: &CatalogStreet) -> f64 {
    street
        .path
        .windows(2)
        .map(|pair| point_to_segment_distance(point, &pair[0], &pair[1]))
        .fold(f64::INFINITY, f64::min)
}

/// The pool element closest to `point`. Ties resolve to the first-indexed
/// candidate; the strict `<` keeps that stable. An empty pool is a caller
/// bug, not a game state.
pub fn nearest_street<'a>(point: &GeoPoint, pool: &'a [CatalogStreet]) -> &'a CatalogStreet {
    assert!(!pool.is_empty(), "nearest_street called with an empty pool");

    let mut best = &pool[0];
    let mut best_distance = distance_to_street(point, best);
    for street in &pool[1..] {
        let distance = distance_to_street(point, street);
        if distance < best_distance {
            best = street;
            best_distance = distance;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn street(name: &str, path: &[(f64, f64)]) -> CatalogStreet {
        CatalogStreet {
            name: name.to_string(),
            path: path.iter().map(|&(lat, lng)| GeoPoint::new(lat, lng)).collect(),
            unique_id: format!("{name}-0"),
        }
    }

    #[test]
    fn test_distance_zero_at_endpoint() {
        let a = GeoPoint::new(40.18, 44.51);
        let b = GeoPoint::new(40.19, 44.52);

        assert_eq!(point_to_segment_distance(&a, &a, &b), 0.0);
        assert_eq!(point_to_segment_distance(&b, &a, &b), 0.0);
    }

    #[test]
    fn test_distance_non_negative_and_symmetric_under_swap() {
        let p = GeoPoint::new(40.20, 44.50);
        let a = GeoPoint::new(40.18, 44.51);
        let b = GeoPoint::new(40.19, 44.52);

        let forward = point_to_segment_distance(&p, &a, &b);
        let backward = point_to_segment_distance(&p, &b, &a);

        assert!(forward >= 0.0);
        assert!((forward - backward).abs() < 1e-9);
    }

    #[test]
    fn test_distance_to_segment_not_infinite_line() {
        // Point beyond the b endpoint: distance must be to b, not to the
        // line's perpendicular foot.
        let a = GeoPoint::new(40.18, 44.50);
        let b = GeoPoint::new(40.18, 44.51);
        let p = GeoPoint::new(40.18, 44.53);

        let to_segment = point_to_segment_distance(&p, &a, &b);
        let to_b = point_to_segment_distance(&p, &b, &b);
        assert!((to_segment - to_b).abs() < 1e-9);
        assert!(to_segment > 0.0);
    }

    #[test]
    fn test_degenerate_segment_is_point_distance() {
        let a = GeoPoint::new(40.18, 44.51);
        let p = GeoPoint::new(40.181, 44.51);

        let d = point_to_segment_distance(&p, &a, &a);
        // ~111 m per 0.001 degree of latitude
        assert!(d > 100.0 && d < 125.0, "got {d}");
    }

    #[test]
    fn test_distance_to_street_takes_minimum_segment() {
        let s = street(
            "Bent Street",
            &[(40.18, 44.50), (40.18, 44.51), (40.20, 44.51)],
        );
        // On the second segment's interior
        let p = GeoPoint::new(40.19, 44.51);

        assert!(distance_to_street(&p, &s) < 1.0);
    }

    #[test]
    fn test_nearest_street_picks_closest() {
        let pool = vec![
            street("Far Street", &[(40.30, 44.60), (40.31, 44.61)]),
            street("Near Street", &[(40.18, 44.51), (40.19, 44.52)]),
        ];
        let p = GeoPoint::new(40.18, 44.51);

        assert_eq!(nearest_street(&p, &pool).name, "Near Street");
    }

    #[test]
    fn test_nearest_street_tie_breaks_to_first() {
        // Identical geometry under two names: first in iteration order wins.
        let pool = vec![
            street("First Street", &[(40.18, 44.51), (40.19, 44.52)]),
            street("Second Avenue", &[(40.18, 44.51), (40.19, 44.52)]),
        ];
        let p = GeoPoint::new(40.185, 44.515);

        assert_eq!(nearest_street(&p, &pool).name, "First Street");
    }

    #[test]
    fn test_nearest_street_deterministic() {
        let pool = vec![
            street("A Street", &[(40.18, 44.51), (40.19, 44.52)]),
            street("B Street", &[(40.20, 44.53), (40.21, 44.54)]),
            street("C Street", &[(40.22, 44.55), (40.23, 44.56)]),
        ];
        let p = GeoPoint::new(40.21, 44.53);

        let first = nearest_street(&p, &pool).name.clone();
        for _ in 0..10 {
            assert_eq!(nearest_street(&p, &pool).name, first);
        }
    }

    #[test]
    #[should_panic(expected = "empty pool")]
    fn test_nearest_street_empty_pool_panics() {
        let p = GeoPoint::new(40.18, 44.51);
        nearest_street(&p, &[]);
    }
}
