use geo::{Coord, Destination, Haversine, LineString, Point};
use itertools::Itertools;

use super::bearing;
use crate::Error;

/// Shifts every vertex perpendicular to the local line direction.
///
/// Positive distances move to the right of the direction of travel, negative
/// to the left. Interior vertices use the mean direction of their two
/// adjacent segments so the point count is preserved. Lines with fewer than
/// two points and a zero distance return the input unchanged.
pub fn offset_line(geometry: &LineString<f64>, signed_distance_meters: f64) -> LineString<f64> {
    if geometry.0.len() < 2 || signed_distance_meters == 0.0 {
        return geometry.clone();
    }

    let turn = if signed_distance_meters > 0.0 { 90.0 } else { -90.0 };
    let distance = signed_distance_meters.abs();

    vertex_directions(geometry)
        .into_iter()
        .zip(geometry.coords())
        .map(|(direction, coord)| {
            let heading = (direction + turn).rem_euclid(360.0);
            let moved = Haversine.destination(Point::from(*coord), heading, distance);
            Coord::from(moved)
        })
        .collect()
}

/// Builds the two halves of a street corridor around the centerline.
///
/// The left ring is the left edge followed by the reversed centerline, the
/// right ring is the centerline followed by the reversed right edge, which
/// keeps both rings wound the same way. Each ring has twice the centerline's
/// point count. Degenerate centerlines are returned as both rings.
///
/// # Errors
///
/// Returns an error if the half width is negative or not a number.
pub fn build_corridor_polygons(
    geometry: &LineString<f64>,
    half_width_meters: f64,
) -> Result<(LineString<f64>, LineString<f64>), Error> {
    if half_width_meters.is_nan() || half_width_meters < 0.0 {
        return Err(Error::UnrecoverableError(
            "corridor half width must be a non-negative number",
        ));
    }
    if geometry.0.len() < 2 {
        return Ok((geometry.clone(), geometry.clone()));
    }

    let left_edge = offset_line(geometry, -half_width_meters);
    let right_edge = offset_line(geometry, half_width_meters);

    let left: LineString<f64> = left_edge
        .coords()
        .chain(geometry.coords().rev())
        .copied()
        .collect();
    let right: LineString<f64> = geometry
        .coords()
        .chain(right_edge.coords().rev())
        .copied()
        .collect();

    Ok((left, right))
}

/// Direction of travel at each vertex, in degrees.
fn vertex_directions(geometry: &LineString<f64>) -> Vec<f64> {
    let segments: Vec<f64> = geometry
        .coords()
        .tuple_windows()
        .map(|(a, b)| bearing(Point::from(*a), Point::from(*b)))
        .collect();

    let last = segments.len() - 1;
    (0..=segments.len())
        .map(|vertex| match vertex {
            0 => segments[0],
            v if v > last => segments[last],
            v => mean_direction(segments[v - 1], segments[v]),
        })
        .collect()
}

fn mean_direction(incoming: f64, outgoing: f64) -> f64 {
    let (sin_in, cos_in) = incoming.to_radians().sin_cos();
    let (sin_out, cos_out) = outgoing.to_radians().sin_cos();
    let (y, x) = (sin_in + sin_out, cos_in + cos_out);
    // hairpin turn, no meaningful mean
    if y.abs() < 1e-12 && x.abs() < 1e-12 {
        return incoming;
    }
    y.atan2(x).to_degrees().rem_euclid(360.0)
}

#[cfg(test)]
mod tests {
    use geo::Distance;

    use super::*;
    use crate::geometry::from_lat_lng;

    fn northbound() -> LineString<f64> {
        from_lat_lng(&[(37.770, -122.42), (37.775, -122.42), (37.780, -122.42)])
    }

    #[test]
    fn zero_offset_returns_input() {
        let line = northbound();
        assert_eq!(offset_line(&line, 0.0), line);
        assert_eq!(offset_line(&line, -0.0), line);

        let single = from_lat_lng(&[(37.77, -122.42)]);
        assert_eq!(offset_line(&single, 0.0), single);
        let empty = LineString::new(vec![]);
        assert_eq!(offset_line(&empty, 0.0), empty);
    }

    #[test]
    fn degenerate_lines_are_not_moved() {
        let single = from_lat_lng(&[(37.77, -122.42)]);
        assert_eq!(offset_line(&single, 12.0), single);
    }

    #[test]
    fn positive_offset_moves_right_of_travel() {
        let line = northbound();
        let shifted = offset_line(&line, 10.0);
        assert_eq!(shifted.0.len(), line.0.len());
        for (original, moved) in line.coords().zip(shifted.coords()) {
            // right of a northbound street is east
            assert!(moved.x > original.x);
            assert!((moved.y - original.y).abs() < 1e-7);
            let distance = Haversine.distance(Point::from(*original), Point::from(*moved));
            assert!((distance - 10.0).abs() < 1e-6, "moved {distance} m");
        }
    }

    #[test]
    fn negative_offset_moves_left_of_travel() {
        let line = northbound();
        let shifted = offset_line(&line, -4.0);
        for (original, moved) in line.coords().zip(shifted.coords()) {
            assert!(moved.x < original.x);
        }
    }

    #[test]
    fn interior_vertex_uses_mean_direction() {
        // north then east: corner vertex offset points south-east
        let corner = from_lat_lng(&[(37.770, -122.42), (37.775, -122.42), (37.775, -122.41)]);
        let shifted = offset_line(&corner, 10.0);
        let moved = shifted.0[1];
        assert!(moved.x > corner.0[1].x);
        assert!(moved.y < corner.0[1].y);
    }

    #[test]
    fn corridor_rings_double_the_point_count() {
        let line = northbound();
        let (left, right) = build_corridor_polygons(&line, 8.0).unwrap();
        assert_eq!(left.0.len(), 2 * line.0.len());
        assert_eq!(right.0.len(), 2 * line.0.len());

        // left ring: left edge, then the centerline backwards
        assert!(left.0[0].x < line.0[0].x);
        assert_eq!(left.0[3], line.0[2]);
        assert_eq!(left.0[5], line.0[0]);
        // right ring: centerline, then the right edge backwards
        assert_eq!(right.0[0], line.0[0]);
        assert_eq!(right.0[2], line.0[2]);
        assert!(right.0[3].x > line.0[2].x);
        assert!((right.0[3].y - line.0[2].y).abs() < 1e-7);
    }

    #[test]
    fn corridor_of_degenerate_line_is_the_input() {
        let single = from_lat_lng(&[(37.77, -122.42)]);
        let (left, right) = build_corridor_polygons(&single, 8.0).unwrap();
        assert_eq!(left, single);
        assert_eq!(right, single);
    }

    #[test]
    fn negative_half_width_is_rejected() {
        assert!(build_corridor_polygons(&northbound(), -1.0).is_err());
        assert!(build_corridor_polygons(&northbound(), f64::NAN).is_err());
    }
}
