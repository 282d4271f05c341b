//! Reference-element shapes built from three combinators.
//!
//! Every shape is a `Point`, the `Cone` over a smaller shape (the shape
//! extended by one apex vertex) or the `Product` of two shapes. Iterating
//! the cone from a point yields the simplices, products of lines yield the
//! hypercubes, and mixing both gives prisms and pyramids.
//!
//! Sub-entities are numbered per codimension:
//! - in `Cone(B)` the faces lying on the base come first (the sub-entities of
//!   `B` one codimension lower), followed by the cones over the sub-entities
//!   of `B` of the same codimension; the apex closes the vertex list.
//! - in `Product(A, B)` sub-entities are grouped by the codimension `j` of the
//!   `B` factor (ascending), and inside a group the `A` index runs fastest.

use crate::lagrange_error::LagrangeError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Deepest nesting accepted when parsing a shape from text.
const MAX_PARSE_DEPTH: usize = 64;

/// An abstract reference-element shape.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Topology {
    /// 0D point.
    Point,
    /// The base shape extended by one apex vertex.
    Cone(Box<Topology>),
    /// Cartesian product of two shapes.
    Product(Box<Topology>, Box<Topology>),
}

impl Default for Topology {
    fn default() -> Self {
        Topology::Point
    }
}

impl Topology {
    /// The 0D point.
    pub fn point() -> Self {
        Topology::Point
    }

    /// The cone over `base`.
    pub fn cone(base: Topology) -> Self {
        Topology::Cone(Box::new(base))
    }

    /// The product `first × second`.
    pub fn product(first: Topology, second: Topology) -> Self {
        Topology::Product(Box::new(first), Box::new(second))
    }

    /// The `dim`-simplex, `Cone` applied `dim` times to a point.
    pub fn simplex(dim: u32) -> Self {
        (0..dim).fold(Topology::Point, |shape, _| Topology::cone(shape))
    }

    /// The `dim`-cube, built as `cube(dim - 1) × line`.
    pub fn cube(dim: u32) -> Self {
        match dim {
            0 => Topology::Point,
            1 => Topology::line(),
            d => Topology::product(Topology::cube(d - 1), Topology::line()),
        }
    }

    pub fn line() -> Self {
        Topology::simplex(1)
    }

    pub fn triangle() -> Self {
        Topology::simplex(2)
    }

    pub fn quadrilateral() -> Self {
        Topology::cube(2)
    }

    pub fn tetrahedron() -> Self {
        Topology::simplex(3)
    }

    /// Cone over the quadrilateral.
    pub fn pyramid() -> Self {
        Topology::cone(Topology::quadrilateral())
    }

    /// Triangle × line.
    pub fn prism() -> Self {
        Topology::product(Topology::triangle(), Topology::line())
    }

    pub fn hexahedron() -> Self {
        Topology::cube(3)
    }

    /// Topological dimension of the shape.
    pub fn dimension(&self) -> u32 {
        match self {
            Topology::Point => 0,
            Topology::Cone(base) => base.dimension() + 1,
            Topology::Product(first, second) => first.dimension() + second.dimension(),
        }
    }

    /// Number of sub-entities of codimension `codim` (0 beyond the dimension).
    pub fn num_sub_entities(&self, codim: u32) -> usize {
        let dim = self.dimension();
        if codim > dim {
            return 0;
        }
        match self {
            Topology::Point => 1,
            Topology::Cone(base) => {
                let on_base = if codim > 0 {
                    base.num_sub_entities(codim - 1)
                } else {
                    0
                };
                let lifted = if codim < dim {
                    base.num_sub_entities(codim)
                } else {
                    1
                };
                on_base + lifted
            }
            Topology::Product(first, second) => (0..=codim)
                .map(|j| first.num_sub_entities(codim - j) * second.num_sub_entities(j))
                .sum(),
        }
    }

    /// Number of vertices (sub-entities of maximal codimension).
    pub fn num_vertices(&self) -> usize {
        self.num_sub_entities(self.dimension())
    }

    /// Whether the shape is a simplex (a tower of cones over a point).
    pub fn is_simplex(&self) -> bool {
        match self {
            Topology::Point => true,
            Topology::Cone(base) => base.is_simplex(),
            Topology::Product(..) => false,
        }
    }

    /// Whether the shape is a hypercube (a product of lines).
    pub fn is_cube(&self) -> bool {
        match self {
            Topology::Point => true,
            Topology::Cone(base) => **base == Topology::Point,
            Topology::Product(first, second) => first.is_cube() && second.is_cube(),
        }
    }
}

/// Index of the product sub-entity built from `first_entity = (codim, index)`
/// of `first` and `second_entity` of `second`.
pub fn product_sub_entity(
    first: &Topology,
    second: &Topology,
    first_entity: (u32, usize),
    second_entity: (u32, usize),
) -> usize {
    let (first_codim, first_index) = first_entity;
    let (second_codim, second_index) = second_entity;
    let codim = first_codim + second_codim;
    let offset: usize = (0..second_codim)
        .map(|j| first.num_sub_entities(codim - j) * second.num_sub_entities(j))
        .sum();
    offset + first_index + second_index * first.num_sub_entities(first_codim)
}

/// Inverse of [`product_sub_entity`]: the factor sub-entities of sub-entity
/// `sub_entity` of codimension `codim` in `first × second`.
pub fn split_product_sub_entity(
    first: &Topology,
    second: &Topology,
    codim: u32,
    sub_entity: usize,
) -> Option<((u32, usize), (u32, usize))> {
    let mut rest = sub_entity;
    for j in 0..=codim {
        let first_count = first.num_sub_entities(codim - j);
        let block = first_count * second.num_sub_entities(j);
        if rest < block {
            return Some((
                (codim - j, rest % first_count),
                (j, rest / first_count),
            ));
        }
        rest -= block;
    }
    None
}

/// Compact form: `P`, `C(<base>)`, `X(<first>,<second>)`.
impl fmt::Display for Topology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Topology::Point => write!(f, "P"),
            Topology::Cone(base) => write!(f, "C({base})"),
            Topology::Product(first, second) => write!(f, "X({first},{second})"),
        }
    }
}

/// Parses the compact form written by `Display`, and the long names
/// `point`, `cone(..)` and `product(..,..)`. Case and whitespace are ignored.
impl FromStr for Topology {
    type Err = LagrangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parser = ShapeParser {
            input: s,
            chars: s.chars().filter(|c| !c.is_whitespace()).collect(),
            pos: 0,
        };
        let shape = parser.shape(0)?;
        if parser.pos != parser.chars.len() {
            return Err(parser.error("trailing input"));
        }
        Ok(shape)
    }
}

struct ShapeParser<'a> {
    input: &'a str,
    chars: Vec<char>,
    pos: usize,
}

impl ShapeParser<'_> {
    fn error(&self, what: &str) -> LagrangeError {
        LagrangeError::MalformedTopology(format!(
            "{what} at offset {} in `{}`",
            self.pos, self.input
        ))
    }

    fn name(&mut self) -> String {
        let start = self.pos;
        while self.pos < self.chars.len() && self.chars[self.pos].is_ascii_alphabetic() {
            self.pos += 1;
        }
        self.chars[start..self.pos]
            .iter()
            .map(|c| c.to_ascii_lowercase())
            .collect()
    }

    fn expect(&mut self, token: char) -> Result<(), LagrangeError> {
        if self.chars.get(self.pos) == Some(&token) {
            self.pos += 1;
            Ok(())
        } else {
            Err(self.error(&format!("expected `{token}`")))
        }
    }

    fn shape(&mut self, depth: usize) -> Result<Topology, LagrangeError> {
        if depth > MAX_PARSE_DEPTH {
            return Err(self.error("nesting too deep"));
        }
        let name = self.name();
        match name.as_str() {
            "p" | "point" => Ok(Topology::Point),
            "c" | "cone" => {
                self.expect('(')?;
                let base = self.shape(depth + 1)?;
                self.expect(')')?;
                Ok(Topology::cone(base))
            }
            "x" | "product" => {
                self.expect('(')?;
                let first = self.shape(depth + 1)?;
                self.expect(',')?;
                let second = self.shape(depth + 1)?;
                self.expect(')')?;
                Ok(Topology::product(first, second))
            }
            "" => Err(self.error("expected a shape")),
            other => Err(self.error(&format!("unknown shape `{other}`"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(shape: &Topology) -> Vec<usize> {
        (0..=shape.dimension())
            .map(|codim| shape.num_sub_entities(codim))
            .collect()
    }

    #[test]
    fn standard_shapes_have_expected_dimensions() {
        assert_eq!(Topology::point().dimension(), 0);
        assert_eq!(Topology::line().dimension(), 1);
        assert_eq!(Topology::triangle().dimension(), 2);
        assert_eq!(Topology::quadrilateral().dimension(), 2);
        assert_eq!(Topology::tetrahedron().dimension(), 3);
        assert_eq!(Topology::pyramid().dimension(), 3);
        assert_eq!(Topology::prism().dimension(), 3);
        assert_eq!(Topology::hexahedron().dimension(), 3);
        assert_eq!(Topology::cube(4).dimension(), 4);
    }

    #[test]
    fn sub_entity_counts_of_standard_shapes() {
        assert_eq!(counts(&Topology::point()), vec![1]);
        assert_eq!(counts(&Topology::line()), vec![1, 2]);
        assert_eq!(counts(&Topology::triangle()), vec![1, 3, 3]);
        assert_eq!(counts(&Topology::quadrilateral()), vec![1, 4, 4]);
        assert_eq!(counts(&Topology::tetrahedron()), vec![1, 4, 6, 4]);
        assert_eq!(counts(&Topology::pyramid()), vec![1, 5, 8, 5]);
        assert_eq!(counts(&Topology::prism()), vec![1, 5, 9, 6]);
        assert_eq!(counts(&Topology::hexahedron()), vec![1, 6, 12, 8]);
        assert_eq!(Topology::triangle().num_sub_entities(3), 0);
    }

    #[test]
    fn euler_characteristic_of_polytopes() {
        for shape in [
            Topology::tetrahedron(),
            Topology::pyramid(),
            Topology::prism(),
            Topology::hexahedron(),
        ] {
            // V - E + F - C = 1 for a solid 3-polytope
            let c = counts(&shape);
            let chi = c[3] as i64 - c[2] as i64 + c[1] as i64 - c[0] as i64;
            assert_eq!(chi, 1, "{shape}");
        }
    }

    #[test]
    fn product_indexing_round_trips() {
        let first = Topology::triangle();
        let second = Topology::line();
        let prism = Topology::product(first.clone(), second.clone());
        for codim in 0..=prism.dimension() {
            for sub in 0..prism.num_sub_entities(codim) {
                let (a, b) = split_product_sub_entity(&first, &second, codim, sub).unwrap();
                assert_eq!(a.0 + b.0, codim);
                assert_eq!(product_sub_entity(&first, &second, a, b), sub);
            }
            assert!(
                split_product_sub_entity(&first, &second, codim, prism.num_sub_entities(codim))
                    .is_none()
            );
        }
    }

    #[test]
    fn classification_helpers() {
        assert!(Topology::tetrahedron().is_simplex());
        assert!(!Topology::prism().is_simplex());
        assert!(Topology::hexahedron().is_cube());
        assert!(Topology::line().is_cube());
        assert!(!Topology::triangle().is_cube());
        assert!(!Topology::pyramid().is_cube());
    }

    #[test]
    fn display_and_parse_agree() {
        for shape in [
            Topology::point(),
            Topology::triangle(),
            Topology::pyramid(),
            Topology::prism(),
            Topology::hexahedron(),
        ] {
            let text = shape.to_string();
            assert_eq!(text.parse::<Topology>().unwrap(), shape);
        }
        assert_eq!(Topology::quadrilateral().to_string(), "X(C(P),C(P))");
        assert_eq!(
            " product( cone(Point), c(p) ) ".parse::<Topology>().unwrap(),
            Topology::quadrilateral()
        );
    }

    #[test]
    fn parse_rejects_malformed_input() {
        for text in ["", "Q", "C(P", "X(P)", "C(P))", "P P", "cone()"] {
            match text.parse::<Topology>() {
                Err(LagrangeError::MalformedTopology(_)) => {}
                other => panic!("expected MalformedTopology for {text:?}, got {other:?}"),
            }
        }
        let deep = format!("{}P{}", "C(".repeat(100), ")".repeat(100));
        assert!(matches!(
            deep.parse::<Topology>(),
            Err(LagrangeError::MalformedTopology(_))
        ));
    }
}
