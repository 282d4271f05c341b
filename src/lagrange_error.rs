//! LagrangeError: Unified error type for mesh-lagrange public APIs
//!
//! Every fallible query on topologies and Lagrange point sets reports its
//! failure through this type. Argument violations are contract errors: a
//! caller that receives one has computed an index or coordinate wrongly, and
//! must not continue numbering DOFs with it.

use thiserror::Error;

/// Unified error type for mesh-lagrange operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LagrangeError {
    /// A point index outside `[0, len)`.
    #[error("point index {index} out of bounds for a point set of {len} points")]
    InvalidIndex { index: usize, len: usize },
    /// A lattice coordinate that does not name a point of the lattice.
    #[error("coordinate {coordinate:?} is not a lattice point of `{topology}` at order {order}")]
    InvalidCoordinate {
        topology: String,
        order: u32,
        coordinate: Vec<u32>,
    },
    /// A codimension larger than the dimension of the shape.
    #[error("codimension {codim} exceeds dimension {dimension}")]
    InvalidCodimension { codim: u32, dimension: u32 },
    /// A sub-entity index outside the sub-entities of the requested codimension.
    #[error("sub-entity {sub_entity} of codimension {codim} out of bounds (count {count})")]
    InvalidSubEntity {
        codim: u32,
        sub_entity: usize,
        count: usize,
    },
    /// A local DOF ordinal outside the DOFs attached to a sub-entity.
    #[error(
        "local dof {local_dof} out of bounds for sub-entity ({codim}, {sub_entity}) with {count} dofs"
    )]
    InvalidLocalDof {
        codim: u32,
        sub_entity: usize,
        local_dof: usize,
        count: usize,
    },
    /// A shape description that does not reduce to point, cone and product.
    #[error("malformed topology: {0}")]
    MalformedTopology(String),
    /// The number of lattice points does not fit into `usize`.
    #[error("point count of `{topology}` at order {order} overflows usize")]
    CountOverflow { topology: String, order: u32 },
    /// A basis label that cannot be resolved for the requested cell.
    #[error("unsupported basis: {0}")]
    UnsupportedBasis(String),
    /// A point set failed its structural self-check.
    #[error("invariant violation: {0}")]
    InvariantViolation(String),
}
