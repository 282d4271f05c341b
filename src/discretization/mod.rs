//! Discretization helpers resolving Lagrange bases from metadata labels.

pub mod lagrange;

pub use lagrange::LagrangeBasis;
