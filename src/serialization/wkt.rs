use crate::coordinates::{Coord, CoordTree};
use crate::core::{GeomResult, GeometryError, WktErrorKind};
use crate::geometry::{Geometry, GeometryType};
use regex::Regex;
use std::sync::OnceLock;

const NUMBER: &str = r"^[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?";
const GEOM_TYPE: &str = r"^\s*([A-Za-z]+)";
const EMPTY: &str = "EMPTY";

// MultiPolygon needs three levels; anything deeper is never valid
const MAX_NESTING: usize = 3;

static NUMBER_RE: OnceLock<Regex> = OnceLock::new();
static GEOM_TYPE_RE: OnceLock<Regex> = OnceLock::new();

type ReadResult<'a, T> = Result<(T, &'a str), WktErrorKind>;

/// Get number regex once to avoid recompilation (thread-safe)
fn number_re() -> &'static Regex {
    NUMBER_RE.get_or_init(|| Regex::new(NUMBER).expect("number pattern is valid"))
}

// Get geometry type regex once to avoid recompilation (thread-safe)
fn geom_type_re() -> &'static Regex {
    GEOM_TYPE_RE.get_or_init(|| Regex::new(GEOM_TYPE).expect("type pattern is valid"))
}

/// Render a geometry as WKT.
///
/// The type keyword is always uppercase. Pairs render as `x y`, pairs within a
/// sequence are separated by `, ` and every grouping level above the pair
/// sequence adds one layer of parentheses. Geometries without coordinates
/// render as `TYPE EMPTY`.
///
/// Examples
/// ```rust
/// use geodaisy::Geometry;
/// use geodaisy::serialization::encode_wkt;
///
/// let poly = Geometry::Polygon(vec![
///     vec![(35.0, 10.0), (45.0, 45.0), (15.0, 40.0), (35.0, 10.0)],
///     vec![(20.0, 30.0), (35.0, 35.0), (30.0, 20.0), (20.0, 30.0)],
/// ]);
/// assert_eq!(
///     encode_wkt(&poly),
///     "POLYGON ((35 10, 45 45, 15 40, 35 10), (20 30, 35 35, 30 20, 20 30))"
/// );
/// ```
pub fn encode_wkt(geometry: &Geometry) -> String {
    let keyword = geometry.geometry_type().keyword();
    let body = match geometry {
        Geometry::Point(c) => Some(format_group([format_pair(c)])),
        Geometry::MultiPoint(pts) | Geometry::LineString(pts) => {
            (!pts.is_empty()).then(|| format_pairs(pts))
        }
        Geometry::MultiLineString(rings) | Geometry::Polygon(rings) => {
            (!rings.is_empty()).then(|| format_rings(rings))
        }
        Geometry::MultiPolygon(polys) => (!polys.is_empty())
            .then(|| format_group(polys.iter().map(|rings| format_rings(rings)))),
    };
    format!("{keyword} {}", body.as_deref().unwrap_or(EMPTY))
}

fn format_pair((x, y): &Coord) -> String {
    format!("{x} {y}")
}

fn format_pairs(pts: &[Coord]) -> String {
    format_group(pts.iter().map(format_pair))
}

fn format_rings(rings: &[Vec<Coord>]) -> String {
    format_group(rings.iter().map(|ring| format_pairs(ring)))
}

fn format_group<I: IntoIterator<Item = String>>(items: I) -> String {
    let mut out = String::from("(");
    for (i, item) in items.into_iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        out.push_str(&item);
    }
    out.push(')');
    out
}

/// Parse a WKT string and return the geometry in canonical form.
///
/// The type keyword is matched case-insensitively. Polygon and MultiPolygon
/// bodies that are one nesting level short are restored to full depth, and
/// MultiPoint accepts both the flat form and the form with every point in its
/// own parentheses. Any failure is reported as `GeometryError::Format` carrying
/// the input text.
///
/// Examples
/// ```rust
/// use geodaisy::{Geometry, GeometryError};
/// use geodaisy::serialization::decode_wkt;
///
/// let poly = decode_wkt("POLYGON ((30 10, 40 40, 20 40, 30 10))").unwrap();
/// assert_eq!(
///     poly,
///     Geometry::Polygon(vec![vec![(30.0, 10.0), (40.0, 40.0), (20.0, 40.0), (30.0, 10.0)]])
/// );
///
/// match decode_wkt("NOTASHAPE (1 2)") {
///     Err(GeometryError::Format { input, .. }) => assert_eq!(input, "NOTASHAPE (1 2)"),
///     _ => panic!("Expected a format error"),
/// }
/// ```
pub fn decode_wkt(wkt: &str) -> GeomResult<Geometry> {
    read_geometry(wkt).map_err(|reason| {
        log::debug!("Failed to decode WKT '{wkt}': {reason}");
        GeometryError::Format {
            input: wkt.to_string(),
            reason,
        }
    })
}

fn read_geometry(raw: &str) -> Result<Geometry, WktErrorKind> {
    let (geometry_type, rest) = identify_type(raw)?;
    if rest.trim().eq_ignore_ascii_case(EMPTY) {
        return empty_geometry(geometry_type);
    }

    let (body, trailing) = read_group(rest, 1)?;
    if !trailing.trim().is_empty() {
        return Err(WktErrorKind::Structure(String::from(
            "Trailing characters after geometry",
        )));
    }
    let tree = shape_body(geometry_type, body)?;
    Geometry::from_tree(geometry_type, tree).map_err(WktErrorKind::Structure)
}

/// Identifies the type of geometry at the start of a WKT string
fn identify_type(raw: &str) -> ReadResult<'_, GeometryType> {
    let Some(cap) = geom_type_re().captures(raw) else {
        return Err(WktErrorKind::Structure(String::from(
            "Could not parse shape type",
        )));
    };
    let keyword = &cap[1];
    let end = cap.get_match().end();
    match GeometryType::from_keyword(keyword) {
        Some(geometry_type) => Ok((geometry_type, &raw[end..])),
        None => Err(WktErrorKind::UnknownType(keyword.to_string())),
    }
}

fn empty_geometry(geometry_type: GeometryType) -> Result<Geometry, WktErrorKind> {
    match geometry_type {
        GeometryType::Point => Err(WktErrorKind::Structure(String::from(
            "An empty point has no canonical coordinates",
        ))),
        _ => Geometry::from_tree(geometry_type, CoordTree::List(Vec::new()))
            .map_err(WktErrorKind::Structure),
    }
}

/// Parse a parenthesized, comma separated group whose elements are either
/// coordinate pairs or nested groups.
fn read_group(raw: &str, level: usize) -> ReadResult<'_, CoordTree> {
    if level > MAX_NESTING {
        return Err(WktErrorKind::Structure(String::from(
            "Too many nested parentheses",
        )));
    }
    let mut rest = match raw.trim_start().strip_prefix('(') {
        Some(s) => s,
        None => {
            return Err(WktErrorKind::Structure(String::from(
                "Expected '(' to start a coordinate group",
            )));
        }
    };

    let mut items = Vec::new();
    loop {
        let (item, tail) = read_element(rest, level)?;
        items.push(item);
        rest = tail.trim_start();

        if let Some(s) = rest.strip_prefix(',') {
            rest = s;
        } else if let Some(s) = rest.strip_prefix(')') {
            return Ok((CoordTree::List(items), s));
        } else {
            return Err(WktErrorKind::Structure(String::from(
                "Expected ',' or ')' after coordinates",
            )));
        }
    }
}

fn read_element(raw: &str, level: usize) -> ReadResult<'_, CoordTree> {
    let trimmed = raw.trim_start();
    if trimmed.starts_with('(') {
        read_group(trimmed, level + 1)
    } else if trimmed.starts_with(')') || trimmed.starts_with(',') {
        Err(WktErrorKind::Structure(String::from(
            "Expected coordinates, found an empty element",
        )))
    } else {
        let (pair, rest) = read_pair(trimmed)?;
        Ok((CoordTree::Pair(pair), rest))
    }
}

fn read_pair(raw: &str) -> ReadResult<'_, Coord> {
    let (x, rest) = read_number(raw)?;
    if !rest.starts_with(char::is_whitespace) {
        return Err(WktErrorKind::Structure(String::from(
            "Expected two space separated numbers in a coordinate pair",
        )));
    }
    let (y, rest) = read_number(rest)?;
    Ok(((x, y), rest))
}

fn read_number(raw: &str) -> ReadResult<'_, f64> {
    let trimmed = raw.trim_start();
    let malformed = || WktErrorKind::MalformedNumber(leading_token(trimmed).to_string());

    let m = number_re().find(trimmed).ok_or_else(malformed)?;
    let rest = &trimmed[m.end()..];
    if rest.starts_with(|c: char| c.is_ascii_alphanumeric() || c == '.') {
        return Err(malformed());
    }
    match m.as_str().parse::<f64>() {
        Ok(value) if value.is_finite() => Ok((value, rest)),
        _ => Err(malformed()),
    }
}

// Text up to the next separator, used to name a malformed number
fn leading_token(raw: &str) -> &str {
    let end = raw
        .find(|c: char| c.is_whitespace() || matches!(c, ',' | '(' | ')'))
        .unwrap_or(raw.len());
    &raw[..end]
}

/// Reconcile the parsed body group with the nesting the geometry type declares.
fn shape_body(geometry_type: GeometryType, body: CoordTree) -> Result<CoordTree, WktErrorKind> {
    match geometry_type {
        GeometryType::Point => single_pair(&body).map(CoordTree::Pair).ok_or_else(|| {
            WktErrorKind::Structure(String::from(
                "A point must contain exactly one coordinate pair",
            ))
        }),
        GeometryType::MultiPoint => unwrap_points(body),
        GeometryType::Polygon | GeometryType::MultiPolygon
            if body.depth() + 1 == geometry_type.depth() =>
        {
            log::debug!("Restoring collapsed nesting level of {geometry_type}");
            Ok(body.wrap())
        }
        _ => Ok(body),
    }
}

// Accept `(10 40), (40 30)` as well as `10 40, 40 30`
fn unwrap_points(body: CoordTree) -> Result<CoordTree, WktErrorKind> {
    let items = match body {
        CoordTree::List(items) => items,
        pair => return Ok(pair),
    };
    items
        .into_iter()
        .map(|item| match item {
            CoordTree::Pair(_) => Ok(item),
            group => single_pair(&group).map(CoordTree::Pair).ok_or_else(|| {
                WktErrorKind::Structure(String::from(
                    "Each point of a multipoint must be a single coordinate pair",
                ))
            }),
        })
        .collect::<Result<Vec<_>, _>>()
        .map(CoordTree::List)
}

fn single_pair(tree: &CoordTree) -> Option<Coord> {
    match tree {
        CoordTree::List(items) => match items.as_slice() {
            [CoordTree::Pair(c)] => Some(*c),
            _ => None,
        },
        CoordTree::Pair(_) => None,
    }
}
