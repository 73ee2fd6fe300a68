//! `GeoJSON` export of swept segments

use geo::{LineString, Polygon};
use geojson::{Feature, FeatureCollection, Geometry, Value as GeoJsonValue};
use serde_json::json;

use super::SweepingCalendar;
use crate::geometry::from_lat_lng;
use crate::{Error, StreetSegment};

impl SweepingCalendar {
    /// Segments of one date as a `FeatureCollection`, `None` for dates
    /// outside the horizon.
    pub fn to_geojson(&self, date_key: &str) -> Result<Option<FeatureCollection>, Error> {
        self.segments_on(date_key)
            .map(segments_to_geojson)
            .transpose()
    }
}

/// Converts segments to `GeoJSON` features. Corridor segments are exported
/// as the polygon of the swept half, all others as line strings.
pub fn segments_to_geojson(segments: &[StreetSegment]) -> Result<FeatureCollection, Error> {
    let features = segments
        .iter()
        .map(segment_feature)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(FeatureCollection {
        features,
        bbox: None,
        foreign_members: None,
    })
}

fn segment_feature(segment: &StreetSegment) -> Result<Feature, Error> {
    let line: LineString<f64> = from_lat_lng(&segment.coordinates);
    let value = match &segment.corridor_polygons {
        Some(_) if line.0.len() >= 3 => GeoJsonValue::from(&Polygon::new(line, vec![])),
        _ => GeoJsonValue::from(&line),
    };
    let geometry = Geometry::new(value);

    let value = json!({
        "type": "Feature",
        "geometry": geometry,
        "properties": {
            "cnn": segment.cnn,
            "corridor": segment.corridor,
            "limits": segment.limits,
            "side": segment.side,
            "weekDay": segment.week_day,
            "fromHour": segment.from_hour,
            "toHour": segment.to_hour,
            "timeDisplay": segment.time_display,
            "cleanedSide": segment.corridor_polygons.as_ref().map(|p| p.cleaned_side),
        }
    });

    serde_json::from_value::<Feature>(value).map_err(|e| Error::GeoJsonError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::CleanedSide;
    use crate::model::CorridorPolygons;

    fn segment(coordinates: Vec<(f64, f64)>, corridor: Option<CorridorPolygons>) -> StreetSegment {
        StreetSegment {
            cnn: "797000".into(),
            corridor: "Mission St".into(),
            limits: "16th St  -  17th St".into(),
            side: "East".into(),
            week_day: "Thu".into(),
            from_hour: 7,
            to_hour: 9,
            time_display: "7AM - 9AM".into(),
            coordinates,
            corridor_polygons: corridor,
        }
    }

    #[test]
    fn lines_export_in_lng_lat_order() {
        let collection =
            segments_to_geojson(&[segment(vec![(37.76, -122.42), (37.77, -122.42)], None)])
                .unwrap();
        assert_eq!(collection.features.len(), 1);
        let json = serde_json::to_value(&collection.features[0]).unwrap();
        assert_eq!(json["geometry"]["type"], "LineString");
        assert_eq!(json["geometry"]["coordinates"][0][0], -122.42);
        assert_eq!(json["geometry"]["coordinates"][0][1], 37.76);
        assert_eq!(json["properties"]["cnn"], "797000");
        assert!(json["properties"]["cleanedSide"].is_null());
    }

    #[test]
    fn properties_use_segment_field_names() {
        let line = segment(vec![(37.76, -122.42), (37.77, -122.42)], None);
        let collection = segments_to_geojson(std::slice::from_ref(&line)).unwrap();
        let properties = serde_json::to_value(&collection.features[0]).unwrap()["properties"].clone();
        let segment_json = serde_json::to_value(&line).unwrap();
        for key in ["cnn", "corridor", "limits", "side", "weekDay", "fromHour", "toHour", "timeDisplay"] {
            assert_eq!(properties[key], segment_json[key], "{key}");
        }
        assert!(properties.get("week_day").is_none());
    }

    #[test]
    fn corridors_export_the_swept_polygon() {
        let ring = vec![(37.76, -122.42), (37.77, -122.42), (37.77, -122.41), (37.76, -122.41)];
        let polygons = CorridorPolygons {
            left_polygon: ring.clone(),
            right_polygon: ring.clone(),
            cleaned_side: CleanedSide::Right,
        };
        let collection = segments_to_geojson(&[segment(ring, Some(polygons))]).unwrap();
        let json = serde_json::to_value(&collection.features[0]).unwrap();
        assert_eq!(json["geometry"]["type"], "Polygon");
        // closed ring
        assert_eq!(json["geometry"]["coordinates"][0].as_array().unwrap().len(), 5);
        assert_eq!(json["properties"]["cleanedSide"], "right");
    }
}
