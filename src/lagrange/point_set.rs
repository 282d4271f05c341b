//! `LagrangePointSet`: the materialized Lagrange points of one `(topology, order)` pair.
//!
//! The set is built once from the pure functions in [`engine`](super::engine)
//! and never mutated afterwards. Besides the per-point tables it keeps, for
//! every sub-entity, the list of point indices ordered by local DOF, which is
//! what global DOF numbering walks.
//!
//! Queries come in two flavors, following the usual pattern of this crate:
//! `try_*` methods return [`LagrangeError`] on bad arguments, the plain ones
//! panic. A wrong index here would silently corrupt a global numbering, so
//! the panicking variants never clamp or guess.

use crate::debug_invariants::DebugInvariants;
use crate::lagrange::coordinate::{LatticeCoordinate, SubEntityAddress};
use crate::lagrange::engine;
use crate::lagrange_error::LagrangeError;
use crate::topology::shape::Topology;
use itertools::Itertools;
use num_rational::Ratio;
#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// One Lagrange point with its position and owner.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LagrangePoint<'a> {
    pub index: usize,
    pub coordinate: &'a LatticeCoordinate,
    pub address: SubEntityAddress,
}

/// Lagrange points of a reference element at a fixed polynomial order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LagrangePointSet {
    topology: Topology,
    order: u32,
    coordinates: Vec<LatticeCoordinate>,
    addresses: Vec<SubEntityAddress>,
    /// `entity_dofs[codim][sub_entity][local_dof]` = point index.
    entity_dofs: Vec<Vec<Vec<usize>>>,
}

static_assertions::assert_impl_all!(LagrangePointSet: Send, Sync);

impl LagrangePointSet {
    /// Enumerate and classify all points of `topology` at `order`.
    ///
    /// Fails with [`LagrangeError::CountOverflow`] when the point count does
    /// not fit in `usize`.
    pub fn new(topology: Topology, order: u32) -> Result<Self, LagrangeError> {
        let points: Vec<(LatticeCoordinate, SubEntityAddress)> = {
            let table = engine::CountTable::new(&topology, order)?;
            let num_points = table.len();
            log::debug!("building Lagrange point set {topology} order={order} points={num_points}");

            let build = |index: usize| {
                let coordinate = table.coordinate(order, index);
                let address = engine::classify_in(&topology, order, &coordinate);
                (coordinate, address)
            };
            #[cfg(feature = "rayon")]
            let points = (0..num_points).into_par_iter().map(build).collect();
            #[cfg(not(feature = "rayon"))]
            let points = (0..num_points).map(build).collect();
            points
        };
        let (coordinates, addresses): (Vec<_>, Vec<_>) = points.into_iter().unzip();

        let mut entity_dofs: Vec<Vec<Vec<usize>>> = (0..=topology.dimension())
            .map(|codim| {
                (0..topology.num_sub_entities(codim))
                    .map(|sub| vec![0; engine::entity_dofs_in(&topology, order, codim, sub)])
                    .collect()
            })
            .collect();
        for (index, address) in addresses.iter().enumerate() {
            let slot = entity_dofs
                .get_mut(address.codim as usize)
                .and_then(|per_codim| per_codim.get_mut(address.sub_entity))
                .and_then(|dofs| dofs.get_mut(address.local_dof))
                .ok_or_else(|| {
                    LagrangeError::InvariantViolation(format!(
                        "point {index} classified to {address:?} outside the sub-entity layout"
                    ))
                })?;
            *slot = index;
        }

        let set = Self {
            topology,
            order,
            coordinates,
            addresses,
            entity_dofs,
        };
        crate::debug_invariants!(set.validate_invariants(), "LagrangePointSet::new");
        Ok(set)
    }

    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    pub fn order(&self) -> u32 {
        self.order
    }

    /// Dimension of the reference element.
    pub fn dimension(&self) -> u32 {
        self.topology.dimension()
    }

    /// Number of Lagrange points.
    pub fn num_points(&self) -> usize {
        self.coordinates.len()
    }

    /// All lattice coordinates, indexed by point.
    pub fn coordinates(&self) -> &[LatticeCoordinate] {
        &self.coordinates
    }

    /// Lattice coordinate of point `index`.
    pub fn try_coordinate(&self, index: usize) -> Result<&LatticeCoordinate, LagrangeError> {
        self.coordinates.get(index).ok_or(LagrangeError::InvalidIndex {
            index,
            len: self.num_points(),
        })
    }

    /// Lattice coordinate of point `index`.
    ///
    /// # Panics
    /// Panics if `index >= num_points()`.
    pub fn coordinate(&self, index: usize) -> &LatticeCoordinate {
        self.try_coordinate(index).unwrap_or_else(|e| panic!("{e}"))
    }

    /// Owner and local ordinal of point `index`.
    pub fn try_address(&self, index: usize) -> Result<SubEntityAddress, LagrangeError> {
        self.addresses
            .get(index)
            .copied()
            .ok_or(LagrangeError::InvalidIndex {
                index,
                len: self.num_points(),
            })
    }

    /// Owner and local ordinal of point `index`.
    ///
    /// # Panics
    /// Panics if `index >= num_points()`.
    pub fn address(&self, index: usize) -> SubEntityAddress {
        self.try_address(index).unwrap_or_else(|e| panic!("{e}"))
    }

    /// Point index of DOF `local_dof` on sub-entity `(codim, sub_entity)`.
    pub fn try_entity_dof_number(
        &self,
        codim: u32,
        sub_entity: usize,
        local_dof: usize,
    ) -> Result<usize, LagrangeError> {
        let dofs = self.try_entity_dofs(codim, sub_entity)?;
        dofs.get(local_dof)
            .copied()
            .ok_or(LagrangeError::InvalidLocalDof {
                codim,
                sub_entity,
                local_dof,
                count: dofs.len(),
            })
    }

    /// Point index of DOF `local_dof` on sub-entity `(codim, sub_entity)`.
    ///
    /// # Panics
    /// Panics on an invalid codim, sub-entity or local DOF.
    pub fn entity_dof_number(&self, codim: u32, sub_entity: usize, local_dof: usize) -> usize {
        self.try_entity_dof_number(codim, sub_entity, local_dof)
            .unwrap_or_else(|e| panic!("{e}"))
    }

    /// Point indices attached to sub-entity `(codim, sub_entity)`, by local DOF.
    pub fn try_entity_dofs(&self, codim: u32, sub_entity: usize) -> Result<&[usize], LagrangeError> {
        let per_codim = self
            .entity_dofs
            .get(codim as usize)
            .ok_or(LagrangeError::InvalidCodimension {
                codim,
                dimension: self.dimension(),
            })?;
        per_codim
            .get(sub_entity)
            .map(Vec::as_slice)
            .ok_or(LagrangeError::InvalidSubEntity {
                codim,
                sub_entity,
                count: per_codim.len(),
            })
    }

    /// Point indices attached to sub-entity `(codim, sub_entity)`, by local DOF.
    ///
    /// # Panics
    /// Panics on an invalid codim or sub-entity.
    pub fn entity_dofs(&self, codim: u32, sub_entity: usize) -> &[usize] {
        self.try_entity_dofs(codim, sub_entity)
            .unwrap_or_else(|e| panic!("{e}"))
    }

    /// Number of DOFs on sub-entity `(codim, sub_entity)`.
    pub fn num_entity_dofs(&self, codim: u32, sub_entity: usize) -> Result<usize, LagrangeError> {
        Ok(self.try_entity_dofs(codim, sub_entity)?.len())
    }

    /// Total number of DOFs on all sub-entities of codimension `codim`.
    pub fn num_dofs(&self, codim: u32) -> Result<usize, LagrangeError> {
        let dofs = self.codim_layout(codim)?;
        Ok(dofs.iter().map(Vec::len).sum())
    }

    /// Largest number of DOFs on one sub-entity of codimension `codim`.
    pub fn max_dofs(&self, codim: u32) -> Result<usize, LagrangeError> {
        let dofs = self.codim_layout(codim)?;
        Ok(dofs.iter().map(Vec::len).max().unwrap_or(0))
    }

    /// Height of point `index`, see [`engine::height`].
    pub fn height(&self, index: usize) -> Result<u32, LagrangeError> {
        let coordinate = self.try_coordinate(index)?;
        Ok(engine::height_in(&self.topology, self.order, coordinate))
    }

    /// Exact reference-element position of point `index`.
    pub fn reference_coordinate(&self, index: usize) -> Result<Vec<Ratio<u64>>, LagrangeError> {
        let coordinate = self.try_coordinate(index)?;
        Ok(engine::reference_in(&self.topology, self.order, coordinate))
    }

    /// Reference-element position of point `index` in floating point.
    pub fn reference_point(&self, index: usize) -> Result<Vec<f64>, LagrangeError> {
        Ok(engine::reference_to_f64(&self.reference_coordinate(index)?))
    }

    /// Reference positions of all points, in point order.
    pub fn reference_points(&self) -> Vec<Vec<f64>> {
        self.coordinates
            .iter()
            .map(|c| engine::reference_to_f64(&engine::reference_in(&self.topology, self.order, c)))
            .collect()
    }

    /// Index of the point at `coordinate`, if it is a lattice point.
    pub fn index_of(&self, coordinate: &[u32]) -> Option<usize> {
        engine::point_index(&self.topology, self.order, coordinate).ok()
    }

    /// Iterate over all points in index order.
    pub fn iter(&self) -> impl Iterator<Item = LagrangePoint<'_>> + '_ {
        self.coordinates
            .iter()
            .zip(self.addresses.iter())
            .enumerate()
            .map(|(index, (coordinate, &address))| LagrangePoint {
                index,
                coordinate,
                address,
            })
    }

    fn codim_layout(&self, codim: u32) -> Result<&[Vec<usize>], LagrangeError> {
        self.entity_dofs
            .get(codim as usize)
            .map(Vec::as_slice)
            .ok_or(LagrangeError::InvalidCodimension {
                codim,
                dimension: self.dimension(),
            })
    }
}

impl DebugInvariants for LagrangePointSet {
    fn validate_invariants(&self) -> Result<(), LagrangeError> {
        let n = engine::point_count(&self.topology, self.order)?;
        if self.coordinates.len() != n || self.addresses.len() != n {
            return Err(LagrangeError::InvariantViolation(format!(
                "expected {n} points, tables hold {} coordinates and {} addresses",
                self.coordinates.len(),
                self.addresses.len()
            )));
        }
        if !self.coordinates.iter().all_unique() {
            return Err(LagrangeError::InvariantViolation(
                "two points share a lattice coordinate".into(),
            ));
        }
        let total: usize = self.entity_dofs.iter().flatten().map(Vec::len).sum();
        if total != n {
            return Err(LagrangeError::InvariantViolation(format!(
                "sub-entity layout holds {total} dofs for {n} points"
            )));
        }
        for (index, address) in self.addresses.iter().enumerate() {
            let back = self.try_entity_dof_number(address.codim, address.sub_entity, address.local_dof)?;
            if back != index {
                return Err(LagrangeError::InvariantViolation(format!(
                    "point {index} at {address:?} maps back to point {back}"
                )));
            }
        }
        for (codim, per_codim) in self.entity_dofs.iter().enumerate() {
            let codim = codim as u32;
            let expected = engine::codim_dofs_in(&self.topology, self.order, codim);
            let actual: usize = per_codim.iter().map(Vec::len).sum();
            if expected != actual {
                return Err(LagrangeError::InvariantViolation(format!(
                    "codim {codim}: engine counts {expected} dofs, layout holds {actual}"
                )));
            }
            let max = engine::max_dofs_in(&self.topology, self.order, codim);
            if per_codim.iter().map(Vec::len).max().unwrap_or(0) != max {
                return Err(LagrangeError::InvariantViolation(format!(
                    "codim {codim}: max dofs disagree with engine value {max}"
                )));
            }
        }
        Ok(())
    }
}
