//! Lagrange basis lookup by label and cell type.
//!
//! Mesh metadata names a basis with a short label (`"lagrange_p2"`, `"q1"`,
//! `"linear"`, ...). Resolving the label against the cell type yields a
//! [`LagrangeBasis`], whose nodes are the cached Lagrange point set of the
//! cell's reference topology.

use crate::lagrange::cache::lagrange_points;
use crate::lagrange::engine;
use crate::lagrange::point_set::LagrangePointSet;
use crate::lagrange_error::LagrangeError;
use crate::topology::cell_type::CellType;
use crate::topology::shape::Topology;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// A Lagrange basis of fixed order on one cell type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LagrangeBasis {
    cell_type: CellType,
    order: u32,
}

impl LagrangeBasis {
    pub fn new(cell_type: CellType, order: u32) -> Self {
        Self { cell_type, order }
    }

    /// Resolve a basis from a metadata label and cell type.
    ///
    /// Accepted labels (case-insensitive): `lagrange_p<n>`, `lagrange<n>`,
    /// `p<n>`, `q<n>` (tensor-product cells only), and the aliases
    /// `constant`, `linear`, `quadratic`, `cubic`.
    pub fn from_metadata(name: &str, cell_type: CellType) -> Result<Self, LagrangeError> {
        let normalized = name.trim().to_lowercase();
        let order = match normalized.as_str() {
            "constant" => 0,
            "linear" => 1,
            "quadratic" => 2,
            "cubic" => 3,
            other => {
                let rest = other
                    .strip_prefix("lagrange_")
                    .or_else(|| other.strip_prefix("lagrange"))
                    .unwrap_or(other);
                let (tensor, digits) = match rest.chars().next() {
                    Some('p') => (false, &rest[1..]),
                    Some('q') => (true, &rest[1..]),
                    _ if rest.len() < other.len() => (false, rest),
                    _ => return Err(unsupported(name, cell_type)),
                };
                if tensor && !cell_type.is_tensor_product() {
                    return Err(LagrangeError::UnsupportedBasis(format!(
                        "'{name}' requires a tensor-product cell, found {cell_type:?}"
                    )));
                }
                digits
                    .parse::<u32>()
                    .map_err(|_| unsupported(name, cell_type))?
            }
        };
        Ok(Self::new(cell_type, order))
    }

    pub fn cell_type(&self) -> CellType {
        self.cell_type
    }

    pub fn order(&self) -> u32 {
        self.order
    }

    /// Reference topology of the cell.
    pub fn topology(&self) -> Topology {
        self.cell_type.topology()
    }

    /// Number of basis functions (Lagrange nodes) per element.
    pub fn num_nodes(&self) -> Result<usize, LagrangeError> {
        engine::point_count(&self.topology(), self.order)
    }

    /// The shared Lagrange point set carrying the nodes.
    pub fn point_set(&self) -> Result<Arc<LagrangePointSet>, LagrangeError> {
        lagrange_points(&self.topology(), self.order)
    }

    /// Node positions on the reference element.
    pub fn reference_nodes(&self) -> Result<Vec<Vec<f64>>, LagrangeError> {
        Ok(self.point_set()?.reference_points())
    }

    /// Node indices on sub-entity `(codim, sub_entity)`, by local DOF.
    pub fn entity_dofs(&self, codim: u32, sub_entity: usize) -> Result<Vec<usize>, LagrangeError> {
        Ok(self.point_set()?.try_entity_dofs(codim, sub_entity)?.to_vec())
    }

    /// DOF counts per sub-entity: `counts[codim][sub_entity]`.
    ///
    /// This is the block size a global numbering reserves on every mesh
    /// entity of the matching kind.
    pub fn entity_dof_counts(&self) -> Result<Vec<Vec<usize>>, LagrangeError> {
        let set = self.point_set()?;
        let topology = set.topology();
        (0..=topology.dimension())
            .map(|codim| {
                (0..topology.num_sub_entities(codim))
                    .map(|sub| set.num_entity_dofs(codim, sub))
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect()
    }

    /// Canonical label, `q<n>` on tensor-product cells and `lagrange_p<n>` otherwise.
    pub fn label(&self) -> String {
        if self.cell_type.is_tensor_product() && self.cell_type != CellType::Vertex {
            format!("q{}", self.order)
        } else {
            format!("lagrange_p{}", self.order)
        }
    }
}

impl fmt::Display for LagrangeBasis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} on {:?}", self.label(), self.cell_type)
    }
}

fn unsupported(name: &str, cell_type: CellType) -> LagrangeError {
    LagrangeError::UnsupportedBasis(format!("'{name}' for {cell_type:?}"))
}
