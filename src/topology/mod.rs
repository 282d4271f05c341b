//! Top-level module for reference-element topology.
//!
//! This module provides:
//! - [`Topology`], the closed point/cone/product shape algebra with its
//!   sub-entity counting and numbering
//! - [`CellType`], the named cells and their fixed compositions
//!
//! Lagrange point sets are keyed by a `Topology` value; `CellType` is the
//! entry point most mesh code starts from.

pub mod cell_type;
pub mod shape;

pub use cell_type::CellType;
pub use shape::{Topology, product_sub_entity, split_product_sub_entity};
