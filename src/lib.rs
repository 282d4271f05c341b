#![cfg_attr(docsrs, feature(doc_cfg))]
//! # mesh-lagrange
//!
//! mesh-lagrange enumerates Lagrange points on generic reference elements for
//! finite-element codes. Element shapes are described by a small closed
//! algebra (a point, the cone over a shape, the product of two shapes), so
//! simplices, cubes, prisms, pyramids and their higher-dimensional relatives
//! all share one set of recursive rules.
//!
//! ## Features
//! - Shape algebra with sub-entity counting and numbering ([`topology::Topology`])
//! - Lattice coordinates of every Lagrange point of a given order
//! - Point to `(codim, sub_entity, local_dof)` classification and its inverse
//! - Per-entity DOF counts and exact (rational) reference coordinates
//! - Thread-safe, build-once caching of point sets ([`lagrange::lagrange_points`])
//! - Basis lookup from metadata labels ([`discretization::LagrangeBasis`])
//!
//! ## Usage
//! ```toml
//! [dependencies]
//! mesh-lagrange = "0.1"
//! # Optional features:
//! # features = ["rayon", "check-invariants"]
//! ```
//!
//! ```rust
//! use mesh_lagrange::prelude::*;
//!
//! let set = lagrange_points(&Topology::triangle(), 2).unwrap();
//! assert_eq!(set.num_points(), 6);
//! // three vertices, three edges with one DOF each, no interior DOF
//! assert_eq!(set.num_dofs(2).unwrap(), 3);
//! assert_eq!(set.num_dofs(1).unwrap(), 3);
//! assert_eq!(set.num_dofs(0).unwrap(), 0);
//! ```
//!
//! ## Determinism
//!
//! Every table is a pure function of `(topology, order)`. Point indices,
//! sub-entity numbers and local DOF numbers are identical across runs,
//! threads and the `rayon` feature.

pub mod debug_invariants;
pub mod discretization;
pub mod lagrange;
pub mod lagrange_error;
pub mod topology;

pub use debug_invariants::DebugInvariants;

/// A convenient prelude to import the most-used traits & types:
pub mod prelude {
    pub use crate::debug_invariants::DebugInvariants;
    pub use crate::discretization::LagrangeBasis;
    pub use crate::lagrange::cache::{InvalidateCache, PointSetCache, lagrange_points};
    pub use crate::lagrange::coordinate::{LatticeCoordinate, SubEntityAddress};
    pub use crate::lagrange::point_set::{LagrangePoint, LagrangePointSet};
    pub use crate::lagrange_error::LagrangeError;
    pub use crate::topology::cell_type::CellType;
    pub use crate::topology::shape::Topology;
}
