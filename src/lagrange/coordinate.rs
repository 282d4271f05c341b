//! Lattice coordinates and sub-entity addresses of Lagrange points.

use num_rational::Ratio;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Deref;

/// Integer position of a Lagrange point, one component per dimension.
///
/// The components follow the structure of the topology:
/// - `Product(A, B)`: the components of `A`, then those of `B`
/// - `Cone(B)`: the components of `B`, then the cone's own *lift*, the
///   number of lattice layers between the point and the base face
/// - `Point`: no components
///
/// Storing the lift last puts the vertices of simplices and pyramids at the
/// usual reference positions (e.g. `(0,0)`, `(1,0)`, `(0,1)` for the triangle).
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LatticeCoordinate(Vec<u32>);

impl LatticeCoordinate {
    pub fn new(components: Vec<u32>) -> Self {
        Self(components)
    }

    /// The raw components.
    pub fn components(&self) -> &[u32] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<u32> {
        self.0
    }

    /// Divide every component by `order`.
    ///
    /// # Panics
    /// Panics if `order == 0`; the order-0 point is placed by
    /// [`engine::reference_coordinate`](super::engine::reference_coordinate).
    pub fn to_reference(&self, order: u32) -> Vec<Ratio<u64>> {
        assert!(order > 0, "lattice of order 0 has no scaling");
        self.0
            .iter()
            .map(|&c| Ratio::new(u64::from(c), u64::from(order)))
            .collect()
    }
}

impl Deref for LatticeCoordinate {
    type Target = [u32];

    fn deref(&self) -> &[u32] {
        &self.0
    }
}

impl From<Vec<u32>> for LatticeCoordinate {
    fn from(components: Vec<u32>) -> Self {
        Self(components)
    }
}

impl fmt::Display for LatticeCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, c) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{c}")?;
        }
        write!(f, ")")
    }
}

/// Where a DOF sits on the topological skeleton of a reference element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SubEntityAddress {
    /// Codimension of the owning sub-entity (0 = the element itself).
    pub codim: u32,
    /// Index of the owning sub-entity within its codimension.
    pub sub_entity: usize,
    /// Ordinal of the DOF among the DOFs of that sub-entity.
    pub local_dof: usize,
}

impl SubEntityAddress {
    pub fn new(codim: u32, sub_entity: usize, local_dof: usize) -> Self {
        Self {
            codim,
            sub_entity,
            local_dof,
        }
    }

    /// The owning sub-entity as `(codim, sub_entity)`.
    #[inline]
    pub fn entity(&self) -> (u32, usize) {
        (self.codim, self.sub_entity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_scaling() {
        let c = LatticeCoordinate::new(vec![0, 1, 3]);
        assert_eq!(
            c.to_reference(3),
            vec![Ratio::new(0, 1), Ratio::new(1, 3), Ratio::new(1, 1)]
        );
    }

    #[test]
    #[should_panic(expected = "order 0")]
    fn reference_scaling_rejects_order_zero() {
        LatticeCoordinate::new(vec![]).to_reference(0);
    }

    #[test]
    fn display_and_serde() {
        let c = LatticeCoordinate::from(vec![2, 0]);
        assert_eq!(c.to_string(), "(2, 0)");
        assert_eq!(serde_json::to_string(&c).unwrap(), "[2,0]");
        let addr = SubEntityAddress::new(1, 2, 0);
        let json = serde_json::to_string(&addr).unwrap();
        let back: SubEntityAddress = serde_json::from_str(&json).unwrap();
        assert_eq!(back, addr);
        assert_eq!(back.entity(), (1, 2));
    }
}
