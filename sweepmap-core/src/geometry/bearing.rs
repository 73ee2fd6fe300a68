use geo::{Bearing, Coord, Haversine, LineString, Point};

use crate::LatLng;

/// Initial great-circle bearing from `start` to `end`, in degrees within `[0, 360)`.
pub fn bearing(start: Point<f64>, end: Point<f64>) -> f64 {
    let degrees = Haversine.bearing(start, end).rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if degrees >= 360.0 { 0.0 } else { degrees }
}

/// Bearing from the first to the last point of the line, `None` for degenerate lines.
pub fn line_bearing(line: &LineString<f64>) -> Option<f64> {
    if line.0.len() < 2 {
        return None;
    }
    let first = line.0.first()?;
    let last = line.0.last()?;
    Some(bearing(Point::from(*first), Point::from(*last)))
}

/// Swaps to `(lat, lng)` order, keeping point order.
pub fn to_lat_lng(line: &LineString<f64>) -> Vec<LatLng> {
    line.coords().map(|c| (c.y, c.x)).collect()
}

pub fn from_lat_lng(points: &[LatLng]) -> LineString<f64> {
    points
        .iter()
        .map(|&(lat, lng)| Coord { x: lng, y: lat })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-6;

    #[test]
    fn cardinal_bearings() {
        let origin = Point::new(-122.4, 37.7);
        let north = Point::new(-122.4, 37.8);
        let east = Point::new(-122.3, 37.7);
        let south = Point::new(-122.4, 37.6);
        let west = Point::new(-122.5, 37.7);

        assert!(bearing(origin, north).abs() < EPS);
        assert!((bearing(origin, south) - 180.0).abs() < EPS);
        // east and west along a parallel are not exactly 90/270 on a sphere
        assert!((bearing(origin, east) - 90.0).abs() < 0.1);
        assert!((bearing(origin, west) - 270.0).abs() < 0.1);
    }

    #[test]
    fn bearing_is_always_in_range() {
        let origin = Point::new(0.0, 0.0);
        for step in 0..72 {
            let angle = f64::from(step) * 5.0_f64.to_radians();
            let target = Point::new(angle.sin(), angle.cos());
            let b = bearing(origin, target);
            assert!((0.0..360.0).contains(&b), "bearing {b} out of range");
        }
    }

    #[test]
    fn line_bearing_needs_two_points() {
        let single = from_lat_lng(&[(37.7, -122.4)]);
        assert!(line_bearing(&single).is_none());
        assert!(line_bearing(&LineString::new(vec![])).is_none());

        let line = from_lat_lng(&[(37.7, -122.4), (37.75, -122.4), (37.8, -122.4)]);
        assert!(line_bearing(&line).unwrap().abs() < EPS);
    }

    #[test]
    fn lat_lng_swap_preserves_order() {
        let points = vec![(37.1, -122.1), (37.2, -122.2)];
        let line = from_lat_lng(&points);
        assert_eq!(line.0[0], Coord { x: -122.1, y: 37.1 });
        assert_eq!(to_lat_lng(&line), points);
    }
}
