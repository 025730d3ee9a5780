use super::coordinates::{Coord, CoordTree};
use super::core::{GeometricObject, display_for_geom};
use super::serialization::encode_wkt;
use std::fmt;

/// The closed set of supported geometry types
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GeometryType {
    Point,
    MultiPoint,
    LineString,
    MultiLineString,
    Polygon,
    MultiPolygon,
}

impl GeometryType {
    /// Every supported type, in declaration order
    pub const ALL: [GeometryType; 6] = [
        GeometryType::Point,
        GeometryType::MultiPoint,
        GeometryType::LineString,
        GeometryType::MultiLineString,
        GeometryType::Polygon,
        GeometryType::MultiPolygon,
    ];

    /// Name as spelled in GeoJSON and geo interface records
    pub fn name(self) -> &'static str {
        match self {
            GeometryType::Point => "Point",
            GeometryType::MultiPoint => "MultiPoint",
            GeometryType::LineString => "LineString",
            GeometryType::MultiLineString => "MultiLineString",
            GeometryType::Polygon => "Polygon",
            GeometryType::MultiPolygon => "MultiPolygon",
        }
    }

    /// Uppercase WKT keyword
    pub fn keyword(self) -> &'static str {
        match self {
            GeometryType::Point => "POINT",
            GeometryType::MultiPoint => "MULTIPOINT",
            GeometryType::LineString => "LINESTRING",
            GeometryType::MultiLineString => "MULTILINESTRING",
            GeometryType::Polygon => "POLYGON",
            GeometryType::MultiPolygon => "MULTIPOLYGON",
        }
    }

    /// Nesting depth of the coordinates of this type (a bare pair is depth 0)
    pub fn depth(self) -> usize {
        match self {
            GeometryType::Point => 0,
            GeometryType::LineString | GeometryType::MultiPoint => 1,
            GeometryType::Polygon | GeometryType::MultiLineString => 2,
            GeometryType::MultiPolygon => 3,
        }
    }

    /// Look up a type by its exact GeoJSON name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.name() == name)
    }

    /// Look up a type by its WKT keyword, ignoring case
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.keyword().eq_ignore_ascii_case(keyword))
    }
}

impl fmt::Display for GeometryType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A geometry in canonical form: a type tag plus coordinates of the exact depth
/// the type requires.
///
/// Coordinates must be finite and only the outermost list may be empty. The
/// WKT and GeoJSON readers enforce both; values built by hand are not checked
/// (see [`Geometry::is_finite`]) and may encode to text the readers reject.
///
/// Examples
/// ```rust
/// use geodaisy::{Geometry, GeometryType, GeometricObject};
/// let line = Geometry::LineString(vec![(30.0, 10.0), (10.0, 30.0)]);
/// assert_eq!(line.geometry_type(), GeometryType::LineString);
/// assert_eq!(line.wkt(), "LINESTRING (30 10, 10 30)");
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum Geometry {
    Point(Coord),
    MultiPoint(Vec<Coord>),
    LineString(Vec<Coord>),
    MultiLineString(Vec<Vec<Coord>>),
    Polygon(Vec<Vec<Coord>>),
    MultiPolygon(Vec<Vec<Vec<Coord>>>),
}

impl Geometry {
    pub fn geometry_type(&self) -> GeometryType {
        match self {
            Geometry::Point(_) => GeometryType::Point,
            Geometry::MultiPoint(_) => GeometryType::MultiPoint,
            Geometry::LineString(_) => GeometryType::LineString,
            Geometry::MultiLineString(_) => GeometryType::MultiLineString,
            Geometry::Polygon(_) => GeometryType::Polygon,
            Geometry::MultiPolygon(_) => GeometryType::MultiPolygon,
        }
    }

    pub fn depth(&self) -> usize {
        self.geometry_type().depth()
    }

    /// Build a geometry of the given type from an untyped coordinate tree.
    ///
    /// Fails if the tree does not have exactly the depth the type requires.
    pub fn from_tree(geometry_type: GeometryType, tree: CoordTree) -> Result<Self, String> {
        Ok(match geometry_type {
            GeometryType::Point => Geometry::Point(tree.into_pair()?),
            GeometryType::MultiPoint => Geometry::MultiPoint(tree.into_pairs()?),
            GeometryType::LineString => Geometry::LineString(tree.into_pairs()?),
            GeometryType::MultiLineString => Geometry::MultiLineString(tree.into_rings()?),
            GeometryType::Polygon => Geometry::Polygon(tree.into_rings()?),
            GeometryType::MultiPolygon => Geometry::MultiPolygon(tree.into_polygons()?),
        })
    }

    /// Copy the coordinates into an untyped tree
    pub fn to_tree(&self) -> CoordTree {
        match self {
            Geometry::Point(c) => CoordTree::from(*c),
            Geometry::MultiPoint(pts) | Geometry::LineString(pts) => CoordTree::from(pts.clone()),
            Geometry::MultiLineString(rings) | Geometry::Polygon(rings) => {
                CoordTree::from(rings.clone())
            }
            Geometry::MultiPolygon(polys) => CoordTree::from(polys.clone()),
        }
    }

    /// Return true if every coordinate is finite
    pub fn is_finite(&self) -> bool {
        self.to_tree().is_finite()
    }

    /// Return true if the geometry has the same type and approximately equal
    /// coordinates as other.
    pub fn is_close(&self, other: &Geometry) -> bool {
        self.geometry_type() == other.geometry_type() && self.to_tree().is_close(&other.to_tree())
    }
}

impl GeometricObject for Geometry {
    /// WKT representation of the geometry
    fn wkt(&self) -> String {
        encode_wkt(self)
    }
}

display_for_geom!(Geometry);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_tables() {
        for gt in GeometryType::ALL {
            assert_eq!(GeometryType::from_name(gt.name()), Some(gt));
            assert_eq!(GeometryType::from_keyword(gt.keyword()), Some(gt));
            assert_eq!(gt.keyword(), gt.name().to_uppercase());
        }
        assert_eq!(
            GeometryType::from_keyword("linestring"),
            Some(GeometryType::LineString)
        );
        assert_eq!(
            GeometryType::from_keyword("MultiPolygon"),
            Some(GeometryType::MultiPolygon)
        );
        assert_eq!(GeometryType::from_name("LINESTRING"), None);
        assert_eq!(GeometryType::from_name("GeometryCollection"), None);
        assert_eq!(GeometryType::from_keyword("NOTASHAPE"), None);
    }

    #[test]
    fn test_from_tree_depth() {
        let ring = vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 0.0)];
        for gt in GeometryType::ALL {
            let mut tree = CoordTree::from((0.0, 0.0));
            for _ in 0..gt.depth() {
                tree = tree.wrap();
            }
            let geom = Geometry::from_tree(gt, tree.clone()).unwrap();
            assert_eq!(geom.geometry_type(), gt);
            assert_eq!(geom.to_tree(), tree);
            assert_eq!(geom.to_tree().depth(), gt.depth());
        }

        if let Ok(_) = Geometry::from_tree(GeometryType::Polygon, CoordTree::from(ring.clone())) {
            panic!("Built a polygon from a bare ring");
        }
        if let Ok(_) = Geometry::from_tree(GeometryType::Point, CoordTree::from(ring)) {
            panic!("Built a point from a list of pairs");
        }
    }

    #[test]
    fn test_is_close() {
        let p1 = Geometry::Point((20.0, 20.0));
        let p2 = Geometry::Point((20.0 + 1e-12, 20.0 - 1e-12));
        let p3 = Geometry::Point((20.0 + 1e-7, 20.0));
        assert!(p1.is_close(&p2));
        assert!(!p1.is_close(&p3));

        let mp = Geometry::MultiPoint(vec![(20.0, 20.0)]);
        let ls = Geometry::LineString(vec![(20.0, 20.0)]);
        assert!(!mp.is_close(&ls));
    }

    #[test]
    fn test_is_finite() {
        let line = Geometry::LineString(vec![(30.0, 10.0), (10.0, 30.0)]);
        assert!(line.is_finite());
        assert!(Geometry::MultiPolygon(vec![]).is_finite());

        assert!(!Geometry::Point((f64::NAN, 0.0)).is_finite());
        let poly = Geometry::Polygon(vec![vec![(0.0, 0.0), (f64::INFINITY, 1.0), (0.0, 0.0)]]);
        assert!(!poly.is_finite());
    }

    #[test]
    fn test_display() {
        let poly = Geometry::Polygon(vec![vec![(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (0.0, 0.0)]]);
        assert_eq!(format!("{poly}"), "POLYGON ((0 0, 0 1, 1 1, 0 0))");
        assert_eq!(GeometryType::MultiLineString.to_string(), "MultiLineString");
    }
}
