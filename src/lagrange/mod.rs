//! Lagrange point enumeration on generic reference elements.
//!
//! For a [`Topology`](crate::topology::Topology) and a polynomial order this
//! module computes the lattice of Lagrange points, the sub-entity (vertex,
//! edge, face, ..., the element itself) owning each point, and the inverse
//! mapping from `(codim, sub_entity, local_dof)` back to a point.
//!
//! - [`engine`]: the pure recursive functions
//! - [`LagrangePointSet`]: the materialized tables for one `(topology, order)`
//! - [`lagrange_points`]: process-wide memoized access to point sets

pub mod cache;
pub mod coordinate;
pub mod engine;
pub mod point_set;

pub use cache::{InvalidateCache, PointSetCache, global_cache, lagrange_points};
pub use coordinate::{LatticeCoordinate, SubEntityAddress};
pub use point_set::{LagrangePoint, LagrangePointSet};
