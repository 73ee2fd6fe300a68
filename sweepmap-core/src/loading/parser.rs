use geo::LineString;
use wkt::TryFromWkt;

use crate::Error;

/// Parses a WKT `LINESTRING` into a line with x = longitude, y = latitude.
///
/// # Errors
///
/// Returns `Error::InvalidGeometry` for empty, malformed or non-linestring text.
pub fn parse_line_geometry(text: &str) -> Result<LineString<f64>, Error> {
    let text = text.trim();
    if text.is_empty() {
        return Err(Error::InvalidGeometry("empty geometry text".to_string()));
    }

    let line = LineString::<f64>::try_from_wkt_str(text)
        .map_err(|e| Error::InvalidGeometry(format!("{e}: '{text}'")))?;

    if line.0.is_empty() {
        return Err(Error::InvalidGeometry("linestring has no points".to_string()));
    }
    Ok(line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::to_lat_lng;

    #[test]
    fn coordinates_are_swapped_to_lat_lng() {
        let line = parse_line_geometry(
            "LINESTRING (-122.416291701103 37.777493843394, -122.416317106137 37.777410028361)",
        )
        .unwrap();
        assert_eq!(
            to_lat_lng(&line),
            [
                (37.777493843394, -122.416291701103),
                (37.777410028361, -122.416317106137)
            ]
        );
    }

    #[test]
    fn malformed_text_is_rejected() {
        assert!(parse_line_geometry("").is_err());
        assert!(parse_line_geometry("   ").is_err());
        assert!(parse_line_geometry("LINESTRING (-122.4 37.7,").is_err());
        assert!(parse_line_geometry("POINT (-122.4 37.7)").is_err());
        assert!(parse_line_geometry("LINESTRING EMPTY").is_err());
    }
}
