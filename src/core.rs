use std::fmt;
use thiserror::Error;

const ATOL: f64 = 1e-12;
const RTOL: f64 = 1e-9;

/// Result type used throughout the crate
pub type GeomResult<T> = Result<T, GeometryError>;

/// Errors raised while converting between geometry representations.
#[derive(Debug, Error)]
pub enum GeometryError {
    /// The text is not valid WKT. Carries the offending input.
    #[error("{input} is not a WKT string ({reason})")]
    Format { input: String, reason: WktErrorKind },
    /// A structured record does not follow the `{type, coordinates}` layout.
    #[error("invalid geometry record: {0}")]
    Schema(String),
    /// An external source does not expose a geo interface.
    #[error("object has no geo interface")]
    Capability,
    /// The converter received something that is neither text nor a record.
    #[error("{0} is not GeoJSON")]
    Type(String),
    /// Serialized GeoJSON that is not even valid JSON.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Reason a WKT string could not be decoded
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WktErrorKind {
    UnknownType(String),
    MalformedNumber(String),
    Structure(String),
}

impl fmt::Display for WktErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            WktErrorKind::UnknownType(t) => write!(f, "unsupported geometry type: {t}"),
            WktErrorKind::MalformedNumber(n) => write!(f, "malformed number: {n}"),
            WktErrorKind::Structure(msg) => write!(f, "{msg}"),
        }
    }
}

impl GeometryError {
    /// Reason of a WKT format error, if this is one
    pub fn wkt_reason(&self) -> Option<&WktErrorKind> {
        match self {
            GeometryError::Format { reason, .. } => Some(reason),
            _ => None,
        }
    }
}

/// Trait with common functionality for all geometric objects
pub trait GeometricObject {
    fn wkt(&self) -> String;
}

/// Macro to implement the Display trait for Geometric Object types
macro_rules! display_for_geom {
    ($type:ty) => {
        impl std::fmt::Display for $type {
            fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                write!(f, "{}", self.wkt())
            }
        }
    };
}

pub(crate) use display_for_geom;

/// Return whether two numbers are approximately equal.
///
/// Determines if the given numbers are close with the given absolute and relative tolerances.
///
/// Examples:
/// ```rust
/// use geodaisy;
///
/// println!("Close: {}", geodaisy::is_close(0.0, 0.0, 1e-10, 1e-10));
/// ```
pub fn is_close(a: f64, b: f64, rtol: f64, atol: f64) -> bool {
    assert!(rtol >= 0.0 && atol >= 0.0);
    let scale = a.abs().max(b.abs());
    (a - b).abs() < (atol + rtol * scale)
}

/// Determine if two values are approximately equal to one another.
///
/// Equivalent to calling `is_close` with relative tolerance of `1e-9` and absolute
/// tolerance of `1e-12`.
///
/// Example:
/// ```rust
/// use geodaisy;
/// let x1 = 0.123;
/// let x2 = 0.123 + 1e-14;
///
/// assert!(geodaisy::approx(x1, x2));
/// ```
pub fn approx(a: f64, b: f64) -> bool {
    is_close(a, b, RTOL, ATOL)
}
