use super::core::{GeomResult, GeometryError};
use serde_json::Value;
use std::borrow::Cow;

pub mod geojson;
pub mod wkt;

pub use geojson::{reshape, reshape_to_geojson, to_geojson, validate_and_normalize};
pub use wkt::{decode_wkt, encode_wkt};

/// Convert a WKT string to serialized GeoJSON
///
/// Examples
/// ```rust
/// use geodaisy::serialization::wkt_to_geojson;
///
/// let geojson = wkt_to_geojson("POINT (30 10)").unwrap();
/// assert_eq!(geojson, r#"{"coordinates":[30.0,10.0],"type":"Point"}"#);
/// ```
pub fn wkt_to_geojson(wkt: &str) -> GeomResult<String> {
    let geometry = decode_wkt(wkt)?;
    let geojson = to_geojson(&geometry).to_string();
    log::trace!("Converted WKT to GeoJSON: {geojson}");
    Ok(geojson)
}

/// Convert GeoJSON to a WKT string.
///
/// The input is either serialized GeoJSON held in a JSON string value, or an
/// already structured record. Anything else fails with `GeometryError::Type`.
///
/// Examples
/// ```rust
/// use geodaisy::serialization::geojson_to_wkt;
/// use serde_json::json;
///
/// let record = json!({"type": "MultiPoint", "coordinates": [[10, 40], [40, 30]]});
/// assert_eq!(geojson_to_wkt(&record).unwrap(), "MULTIPOINT (10 40, 40 30)");
///
/// let text = json!(r#"{"type": "Point", "coordinates": [1.5, 2]}"#);
/// assert_eq!(geojson_to_wkt(&text).unwrap(), "POINT (1.5 2)");
///
/// assert!(geojson_to_wkt(&json!(42)).is_err());
/// ```
pub fn geojson_to_wkt(input: &Value) -> GeomResult<String> {
    let record = match input {
        Value::String(text) => Cow::Owned(serde_json::from_str::<Value>(text)?),
        Value::Object(_) => Cow::Borrowed(input),
        other => return Err(GeometryError::Type(other.to_string())),
    };
    let wkt = encode_wkt(&validate_and_normalize(&record)?);
    log::trace!("Converted GeoJSON to WKT: {wkt}");
    Ok(wkt)
}

/// Convert serialized GeoJSON text to a WKT string
pub fn geojson_str_to_wkt(text: &str) -> GeomResult<String> {
    let record: Value = serde_json::from_str(text)?;
    geojson_to_wkt(&record)
}
