use super::core::{GeomResult, GeometricObject, GeometryError, display_for_geom};
use super::geometry::{Geometry, GeometryType};
use super::serialization::{decode_wkt, encode_wkt, to_geojson, validate_and_normalize};
use serde_json::Value;

/// Capability of exposing a `{type, coordinates}` record.
///
/// Returning `None` means the object has no geo interface.
pub trait GeoInterface {
    fn geo_interface(&self) -> Option<Value>;
}

/// Anything a `GeoObject` can be created from
pub enum GeoInput<'a> {
    /// WKT or serialized GeoJSON text
    Text(&'a str),
    /// A structured `{type, coordinates}` record
    Structured(Value),
    /// An object exposing a geo interface
    ExternalSource(&'a dyn GeoInterface),
}

/// A geometry that translates to and from WKT, GeoJSON and geo interface records.
///
/// Examples
/// ```rust
/// use geodaisy::{GeoInput, GeoObject, GeometricObject};
///
/// let obj = GeoObject::new(GeoInput::Text("POINT (30 10)")).unwrap();
/// assert_eq!(obj.geojson(), r#"{"coordinates":[30.0,10.0],"type":"Point"}"#);
///
/// let same = GeoObject::new(GeoInput::Text(&obj.geojson())).unwrap();
/// assert_eq!(same.wkt(), "POINT (30 10)");
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct GeoObject {
    geometry: Geometry,
}

impl GeoObject {
    pub fn new(input: GeoInput) -> GeomResult<Self> {
        let geometry = match input {
            GeoInput::Text(text) => parse_text(text)?,
            GeoInput::Structured(record) => validate_and_normalize(&record)?,
            GeoInput::ExternalSource(source) => {
                let record = source.geo_interface().ok_or(GeometryError::Capability)?;
                validate_and_normalize(&record)?
            }
        };
        Ok(Self { geometry })
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn geometry_type(&self) -> GeometryType {
        self.geometry.geometry_type()
    }

    /// The unserialized GeoJSON representation
    pub fn raw_geojson(&self) -> Value {
        to_geojson(&self.geometry)
    }

    /// The serialized GeoJSON representation
    pub fn geojson(&self) -> String {
        self.raw_geojson().to_string()
    }
}

// Strings starting with '{' are GeoJSON, everything else must be WKT
fn parse_text(text: &str) -> GeomResult<Geometry> {
    if text.trim_start().starts_with('{') {
        let record: Value = serde_json::from_str(text)?;
        validate_and_normalize(&record)
    } else {
        decode_wkt(text)
    }
}

impl GeoInterface for GeoObject {
    fn geo_interface(&self) -> Option<Value> {
        Some(self.raw_geojson())
    }
}

impl GeometricObject for GeoObject {
    fn wkt(&self) -> String {
        encode_wkt(&self.geometry)
    }
}

display_for_geom!(GeoObject);

impl From<Geometry> for GeoObject {
    fn from(geometry: Geometry) -> Self {
        Self { geometry }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    struct Shape {
        record: Option<Value>,
    }

    impl GeoInterface for Shape {
        fn geo_interface(&self) -> Option<Value> {
            self.record.clone()
        }
    }

    fn polygon_with_hole() -> Value {
        json!({"type": "Polygon", "coordinates": [
            [[2.38, 57.322], [23.194, -20.28], [-120.43, 19.15], [2.38, 57.322]],
            [[-5.21, 23.51], [15.21, -10.81], [-20.51, 1.51], [-5.21, 23.51]]
        ]})
    }

    #[rstest]
    #[case(json!({"type": "Point", "coordinates": [-115.81, 37.24]}))]
    #[case(json!({"type": "LineString", "coordinates": [[8.919, 44.4074], [8.923, 44.4075]]}))]
    #[case(polygon_with_hole())]
    #[case(json!({"type": "MultiPoint", "coordinates": [[-155.52, 19.61], [-156.22, 20.74], [-157.97, 21.46]]}))]
    fn test_geo_interface_to_geojson(#[case] record: Value) {
        let shape = Shape {
            record: Some(record.clone()),
        };
        let obj = GeoObject::new(GeoInput::ExternalSource(&shape)).unwrap();
        assert_eq!(obj.raw_geojson(), record);
        assert_eq!(obj.geojson(), record.to_string());
        assert_eq!(obj.geo_interface(), Some(record));

        let from_wkt = GeoObject::new(GeoInput::Text(&obj.wkt())).unwrap();
        assert_eq!(from_wkt, obj);
    }

    #[test]
    fn test_missing_capability() {
        let shape = Shape { record: None };
        match GeoObject::new(GeoInput::ExternalSource(&shape)) {
            Err(GeometryError::Capability) => (),
            other => panic!("Expected a capability error: {other:?}"),
        }
    }

    #[test]
    fn test_text_dispatch() {
        let text = polygon_with_hole().to_string();
        let from_geojson = GeoObject::new(GeoInput::Text(&format!("  {text}"))).unwrap();
        assert_eq!(from_geojson.geometry_type(), GeometryType::Polygon);

        let from_record = GeoObject::new(GeoInput::Structured(polygon_with_hole())).unwrap();
        assert_eq!(from_record, from_geojson);

        let from_wkt = GeoObject::new(GeoInput::Text(
            "linestring (-58.612 -34.642,-58.613 -34.641)",
        ))
        .unwrap();
        assert_eq!(
            from_wkt.to_string(),
            "LINESTRING (-58.612 -34.642, -58.613 -34.641)"
        );

        match GeoObject::new(GeoInput::Text("{\"type\": \"Point\"")) {
            Err(GeometryError::Json(_)) => (),
            other => panic!("Expected a JSON error: {other:?}"),
        }
        match GeoObject::new(GeoInput::Text("CIRCLE (1 2)")) {
            Err(GeometryError::Format { .. }) => (),
            other => panic!("Expected a format error: {other:?}"),
        }
        match GeoObject::new(GeoInput::Structured(json!({"coordinates": [1, 2]}))) {
            Err(GeometryError::Schema(_)) => (),
            other => panic!("Expected a schema error: {other:?}"),
        }
    }

    #[test]
    fn test_chained_sources() {
        let first = GeoObject::from(Geometry::MultiLineString(vec![
            vec![(3.75, 9.25), (-130.95, 1.52)],
            vec![(23.15, -34.25), (-1.35, -4.65), (3.45, 77.95)],
        ]));
        let second = GeoObject::new(GeoInput::ExternalSource(&first)).unwrap();
        assert_eq!(second, first);
        assert_eq!(second.geometry(), first.geometry());
    }
}
