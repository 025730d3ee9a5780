use super::core;

/// A single coordinate pair (x, y)
pub type Coord = (f64, f64);

/// Untyped nested coordinates, as produced by the GeoJSON and WKT readers.
///
/// A tree carries no geometry type; it is checked against the depth a type
/// requires by the `into_*` extraction methods.
///
/// Examples
/// ```rust
/// use geodaisy::CoordTree;
/// let ring = CoordTree::from(vec![(0.0, 0.0), (1.0, 0.0), (0.0, 0.0)]);
/// assert_eq!(ring.depth(), 1);
/// assert_eq!(ring.wrap().depth(), 2);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum CoordTree {
    Pair(Coord),
    List(Vec<CoordTree>),
}

impl CoordTree {
    /// Nesting depth, following first elements only. A pair has depth 0 and an
    /// empty list depth 1.
    pub fn depth(&self) -> usize {
        match self {
            CoordTree::Pair(_) => 0,
            CoordTree::List(items) => 1 + items.first().map_or(0, CoordTree::depth),
        }
    }

    /// Enclose the tree in one more list level
    pub fn wrap(self) -> CoordTree {
        CoordTree::List(vec![self])
    }

    /// Total number of coordinate pairs in the tree
    pub fn total_pairs(&self) -> usize {
        match self {
            CoordTree::Pair(_) => 1,
            CoordTree::List(items) => items.iter().map(CoordTree::total_pairs).sum(),
        }
    }

    pub fn is_finite(&self) -> bool {
        match self {
            CoordTree::Pair((x, y)) => x.is_finite() && y.is_finite(),
            CoordTree::List(items) => items.iter().all(CoordTree::is_finite),
        }
    }

    /// Return true if both trees have the same shape and approximately equal values.
    pub fn is_close(&self, other: &CoordTree) -> bool {
        match (self, other) {
            (CoordTree::Pair((x1, y1)), CoordTree::Pair((x2, y2))) => {
                core::approx(*x1, *x2) && core::approx(*y1, *y2)
            }
            (CoordTree::List(a), CoordTree::List(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(p, q)| p.is_close(q))
            }
            _ => false,
        }
    }

    pub fn into_pair(self) -> Result<Coord, String> {
        match self {
            CoordTree::Pair(c) => Ok(c),
            CoordTree::List(_) => Err(String::from(
                "Expected a coordinate pair, found a nested list",
            )),
        }
    }

    pub fn into_pairs(self) -> Result<Vec<Coord>, String> {
        pairs_of(self.into_list()?)
    }

    /// Rings or lines; each one must hold at least one pair.
    pub fn into_rings(self) -> Result<Vec<Vec<Coord>>, String> {
        rings_of(self.into_list()?)
    }

    /// Polygons; neither a polygon nor any of its rings may be empty.
    pub fn into_polygons(self) -> Result<Vec<Vec<Vec<Coord>>>, String> {
        self.into_list()?
            .into_iter()
            .map(|poly| rings_of(poly.into_nested_list()?))
            .collect()
    }

    // Only the outermost list of a geometry may be empty
    fn into_nested_list(self) -> Result<Vec<CoordTree>, String> {
        let items = self.into_list()?;
        if items.is_empty() {
            Err(String::from(
                "Empty coordinate list nested inside a geometry",
            ))
        } else {
            Ok(items)
        }
    }

    fn into_list(self) -> Result<Vec<CoordTree>, String> {
        match self {
            CoordTree::List(items) => Ok(items),
            CoordTree::Pair((x, y)) => Err(format!(
                "Expected a list of coordinates, found the pair ({x} {y})"
            )),
        }
    }
}

fn pairs_of(items: Vec<CoordTree>) -> Result<Vec<Coord>, String> {
    items.into_iter().map(CoordTree::into_pair).collect()
}

fn rings_of(items: Vec<CoordTree>) -> Result<Vec<Vec<Coord>>, String> {
    items
        .into_iter()
        .map(|ring| pairs_of(ring.into_nested_list()?))
        .collect()
}

impl From<Coord> for CoordTree {
    fn from(c: Coord) -> Self {
        CoordTree::Pair(c)
    }
}

impl<T: Into<CoordTree>> From<Vec<T>> for CoordTree {
    fn from(items: Vec<T>) -> Self {
        CoordTree::List(items.into_iter().map(Into::into).collect())
    }
}
