use crate::coordinates::{Coord, CoordTree};
use crate::core::{GeomResult, GeometryError};
use crate::geometry::{Geometry, GeometryType};
use serde_json::{Value, json};

/// Rebuild GeoJSON style nested arrays as a coordinate tree.
///
/// The depth of the output equals the depth of the input. A node is treated as
/// an inner list when its first element is itself an array, and as a
/// coordinate pair otherwise.
pub fn reshape(value: &Value) -> GeomResult<CoordTree> {
    match value {
        Value::Array(items) if items.is_empty() => Ok(CoordTree::List(Vec::new())),
        Value::Array(items) if items[0].is_array() => items
            .iter()
            .map(reshape)
            .collect::<GeomResult<Vec<_>>>()
            .map(CoordTree::List),
        Value::Array(items) => read_position(items).map(CoordTree::Pair),
        other => Err(GeometryError::Schema(format!(
            "expected an array of coordinates, found {other}"
        ))),
    }
}

/// Rebuild a coordinate tree as GeoJSON style nested arrays
pub fn reshape_to_geojson(tree: &CoordTree) -> Value {
    match tree {
        CoordTree::Pair((x, y)) => json!([x, y]),
        CoordTree::List(items) => Value::Array(items.iter().map(reshape_to_geojson).collect()),
    }
}

fn read_position(items: &[Value]) -> GeomResult<Coord> {
    match items {
        [x, y] => match (x.as_f64(), y.as_f64()) {
            (Some(x), Some(y)) => Ok((x, y)),
            _ => Err(GeometryError::Schema(format!(
                "coordinates must be numbers, found [{x}, {y}]"
            ))),
        },
        _ => Err(GeometryError::Schema(format!(
            "a position must have exactly two numbers, found {}",
            items.len()
        ))),
    }
}

/// Check a `{type, coordinates}` record and return it as a canonical geometry.
///
/// Fails with `GeometryError::Schema` if `type` is missing or not one of the
/// six supported names, if `coordinates` is missing, or if the coordinates do
/// not have the depth the type requires. Other keys are ignored.
///
/// Examples
/// ```rust
/// use geodaisy::Geometry;
/// use geodaisy::serialization::validate_and_normalize;
/// use serde_json::json;
///
/// let record = json!({"type": "LineString", "coordinates": [[8.919, 44.4074], [8.923, 44.4075]]});
/// let line = validate_and_normalize(&record).unwrap();
/// assert_eq!(line, Geometry::LineString(vec![(8.919, 44.4074), (8.923, 44.4075)]));
///
/// assert!(validate_and_normalize(&json!({"coordinates": [1, 2]})).is_err());
/// ```
pub fn validate_and_normalize(record: &Value) -> GeomResult<Geometry> {
    let Some(map) = record.as_object() else {
        return Err(GeometryError::Schema(format!(
            "a geometry record must be an object, found {record}"
        )));
    };

    let geometry_type = match map.get("type") {
        Some(Value::String(name)) => GeometryType::from_name(name),
        _ => None,
    }
    .ok_or_else(|| {
        let names: Vec<&str> = GeometryType::ALL.iter().map(|t| t.name()).collect();
        GeometryError::Schema(format!(
            "a geometry record must have a \"type\" key with one of the following values: {}",
            names.join(", ")
        ))
    })?;

    let coordinates = map.get("coordinates").ok_or_else(|| {
        GeometryError::Schema(String::from(
            "a geometry record must have a \"coordinates\" key",
        ))
    })?;

    let tree = reshape(coordinates)?;
    Geometry::from_tree(geometry_type, tree).map_err(|msg| {
        log::debug!("Rejected {geometry_type} record: {msg}");
        GeometryError::Schema(format!("invalid {geometry_type} coordinates: {msg}"))
    })
}

/// Return the unserialized GeoJSON geometry object for a canonical geometry
///
/// Examples
/// ```rust
/// use geodaisy::Geometry;
/// use geodaisy::serialization::to_geojson;
/// use serde_json::json;
///
/// let geojson = to_geojson(&Geometry::Point((-115.81, 37.24)));
/// assert_eq!(geojson, json!({"type": "Point", "coordinates": [-115.81, 37.24]}));
/// ```
pub fn to_geojson(geometry: &Geometry) -> Value {
    json!({
        "type": geometry.geometry_type().name(),
        "coordinates": reshape_to_geojson(&geometry.to_tree()),
    })
}
