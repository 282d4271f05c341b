//! Pure enumeration of Lagrange points.
//!
//! Every function here is a pure function of `(topology, order, ...)`. The
//! lattice follows the structure of the shape:
//!
//! - **Point**: a single lattice point for every order.
//! - **Cone(B)** at order `p`: `p + 1` layers stacked over the base face. The
//!   layer at lift `l` is a copy of the lattice of `B` at order `p - l`, and
//!   layers are numbered by increasing lift, so the apex comes last.
//! - **Product(A, B)**: the tensor lattice, point `i1 + i2 * |A|`.
//!
//! Recursion only descends the shape; layers are walked with loops over
//! per-order tables, so the stack depth is bounded by the depth of the shape
//! whatever the order. A [`CountTable`] holds the point counts of every
//! sub-shape at orders `0..=p` and is built once per call.
//!
//! Sub-entities of `Cone(B)` are the sub-entities of the base face followed
//! by the cones over the sub-entities of `B`, the apex closing the vertex
//! list. Within a sub-entity, DOFs are ordered by increasing point index.
//!
//! Public entry points validate their arguments and check that the point
//! count fits in `usize`; after that check no partial count can overflow, so
//! the crate-internal functions use plain arithmetic.

use crate::lagrange::coordinate::{LatticeCoordinate, SubEntityAddress};
use crate::lagrange_error::LagrangeError;
use crate::topology::shape::{Topology, product_sub_entity, split_product_sub_entity};
use num_rational::Ratio;

/// Number of Lagrange points of `topology` at `order`.
///
/// `Cone(B)` satisfies `N(Cone(B), p) = N(B, p) + N(Cone(B), p - 1)` with a
/// single apex at order 0; products multiply.
pub fn point_count(topology: &Topology, order: u32) -> Result<usize, LagrangeError> {
    Ok(CountTable::new(topology, order)?.len())
}

/// Lattice coordinate of point `index`.
pub fn point_coordinate(
    topology: &Topology,
    order: u32,
    index: usize,
) -> Result<LatticeCoordinate, LagrangeError> {
    let table = CountTable::new(topology, order)?;
    check_index(index, table.len())?;
    Ok(table.coordinate(order, index))
}

/// Index of the point at `coordinate`; inverse of [`point_coordinate`].
pub fn point_index(
    topology: &Topology,
    order: u32,
    coordinate: &[u32],
) -> Result<usize, LagrangeError> {
    check_coordinate(topology, order, coordinate)?;
    Ok(CountTable::new(topology, order)?.index_of(order, coordinate))
}

/// Sub-entity owning the point at `coordinate`, with the point's ordinal
/// among the DOFs of that sub-entity.
pub fn classify(
    topology: &Topology,
    order: u32,
    coordinate: &[u32],
) -> Result<SubEntityAddress, LagrangeError> {
    check_coordinate(topology, order, coordinate)?;
    CountTable::new(topology, order)?;
    Ok(classify_in(topology, order, coordinate))
}

/// [`classify`] applied to point `index`.
pub fn dof_sub_entity(
    topology: &Topology,
    order: u32,
    index: usize,
) -> Result<SubEntityAddress, LagrangeError> {
    let table = CountTable::new(topology, order)?;
    check_index(index, table.len())?;
    let coordinate = table.coordinate(order, index);
    Ok(classify_in(topology, order, &coordinate))
}

/// Point index of DOF `local_dof` of sub-entity `(codim, sub_entity)`;
/// inverse of [`dof_sub_entity`].
pub fn entity_dof_number(
    topology: &Topology,
    order: u32,
    codim: u32,
    sub_entity: usize,
    local_dof: usize,
) -> Result<usize, LagrangeError> {
    let table = CountTable::new(topology, order)?;
    check_sub_entity(topology, codim, sub_entity)?;
    let count = entity_dofs_in(topology, order, codim, sub_entity);
    if local_dof >= count {
        return Err(LagrangeError::InvalidLocalDof {
            codim,
            sub_entity,
            local_dof,
            count,
        });
    }
    table
        .dof_number(order, codim, sub_entity, local_dof)
        .ok_or(LagrangeError::InvalidSubEntity {
            codim,
            sub_entity,
            count: topology.num_sub_entities(codim),
        })
}

/// Total number of DOFs on all sub-entities of codimension `codim`.
pub fn num_dofs(topology: &Topology, order: u32, codim: u32) -> Result<usize, LagrangeError> {
    CountTable::new(topology, order)?;
    check_codim(topology, codim)?;
    Ok(codim_dofs_in(topology, order, codim))
}

/// Number of DOFs attached to sub-entity `(codim, sub_entity)`.
pub fn num_entity_dofs(
    topology: &Topology,
    order: u32,
    codim: u32,
    sub_entity: usize,
) -> Result<usize, LagrangeError> {
    CountTable::new(topology, order)?;
    check_sub_entity(topology, codim, sub_entity)?;
    Ok(entity_dofs_in(topology, order, codim, sub_entity))
}

/// Largest number of DOFs carried by a single sub-entity of codimension `codim`.
///
/// Sub-entities of one codimension may differ in shape (the triangular and
/// quadrilateral faces of a prism), so this is a maximum rather than a
/// uniform block size.
pub fn max_dofs(topology: &Topology, order: u32, codim: u32) -> Result<usize, LagrangeError> {
    CountTable::new(topology, order)?;
    check_codim(topology, codim)?;
    Ok(max_dofs_in(topology, order, codim))
}

/// Height of the point at `coordinate`: the order for a point, the height in
/// the order-reduced cone for a lifted point, the minimum over product factors.
pub fn height(topology: &Topology, order: u32, coordinate: &[u32]) -> Result<u32, LagrangeError> {
    check_coordinate(topology, order, coordinate)?;
    Ok(height_in(topology, order, coordinate))
}

/// Exact reference-element position of the point at `coordinate`.
///
/// Every component is divided by `order`, in the layout of
/// [`LatticeCoordinate`]: the cone's own axis comes last, so the result for a
/// simplex lists the base axes before the lifted one (the triangle's apex is
/// `(0, 1)`). The single point of order 0 sits at the barycenter of the
/// reference element.
pub fn reference_coordinate(
    topology: &Topology,
    order: u32,
    coordinate: &[u32],
) -> Result<Vec<Ratio<u64>>, LagrangeError> {
    check_coordinate(topology, order, coordinate)?;
    Ok(reference_in(
        topology,
        order,
        &LatticeCoordinate::from(coordinate.to_vec()),
    ))
}

/// [`reference_coordinate`] in floating point.
pub fn reference_point(
    topology: &Topology,
    order: u32,
    coordinate: &[u32],
) -> Result<Vec<f64>, LagrangeError> {
    Ok(reference_to_f64(&reference_coordinate(topology, order, coordinate)?))
}

// -----------------------------------------------------------------------------
// Argument checks
// -----------------------------------------------------------------------------

fn check_index(index: usize, len: usize) -> Result<(), LagrangeError> {
    if index < len {
        Ok(())
    } else {
        Err(LagrangeError::InvalidIndex { index, len })
    }
}

fn check_codim(topology: &Topology, codim: u32) -> Result<(), LagrangeError> {
    let dimension = topology.dimension();
    if codim > dimension {
        return Err(LagrangeError::InvalidCodimension { codim, dimension });
    }
    Ok(())
}

fn check_sub_entity(topology: &Topology, codim: u32, sub_entity: usize) -> Result<(), LagrangeError> {
    check_codim(topology, codim)?;
    let count = topology.num_sub_entities(codim);
    if sub_entity >= count {
        return Err(LagrangeError::InvalidSubEntity {
            codim,
            sub_entity,
            count,
        });
    }
    Ok(())
}

fn check_coordinate(topology: &Topology, order: u32, coordinate: &[u32]) -> Result<(), LagrangeError> {
    if is_lattice_point(topology, order, coordinate) {
        Ok(())
    } else {
        Err(LagrangeError::InvalidCoordinate {
            topology: topology.to_string(),
            order,
            coordinate: coordinate.to_vec(),
        })
    }
}

fn is_lattice_point(topology: &Topology, order: u32, x: &[u32]) -> bool {
    if x.len() != topology.dimension() as usize {
        return false;
    }
    match topology {
        Topology::Point => true,
        Topology::Cone(base) => {
            let (b, lift) = split_cone(x);
            lift <= order && is_lattice_point(base, order - lift, b)
        }
        Topology::Product(first, second) => {
            let (xa, xb) = x.split_at(first.dimension() as usize);
            is_lattice_point(first, order, xa) && is_lattice_point(second, order, xb)
        }
    }
}

// -----------------------------------------------------------------------------
// Per-order point counts
// -----------------------------------------------------------------------------

/// Point counts of a shape and of each of its sub-shapes at orders `0..=p`.
#[derive(Debug)]
pub(crate) struct CountTable<'a> {
    shape: &'a Topology,
    /// `counts[q]` = number of points at order `q`.
    counts: Vec<usize>,
    parts: Parts<'a>,
}

#[derive(Debug)]
enum Parts<'a> {
    Point,
    Cone(Box<CountTable<'a>>),
    Product(Box<CountTable<'a>>, Box<CountTable<'a>>),
}

impl<'a> CountTable<'a> {
    /// Fails with [`LagrangeError::CountOverflow`] when the count at `order`
    /// does not fit in `usize`.
    pub(crate) fn new(shape: &'a Topology, order: u32) -> Result<Self, LagrangeError> {
        Self::build(shape, order).ok_or_else(|| LagrangeError::CountOverflow {
            topology: shape.to_string(),
            order,
        })
    }

    fn build(shape: &'a Topology, order: u32) -> Option<Self> {
        let (counts, parts) = match shape {
            Topology::Point => (vec![1; order as usize + 1], Parts::Point),
            Topology::Cone(base) => {
                let base = Self::build(base, order)?;
                let mut acc = 0usize;
                let counts = base
                    .counts
                    .iter()
                    .map(|&n| {
                        acc = acc.checked_add(n)?;
                        Some(acc)
                    })
                    .collect::<Option<Vec<_>>>()?;
                (counts, Parts::Cone(Box::new(base)))
            }
            Topology::Product(first, second) => {
                let first = Self::build(first, order)?;
                let second = Self::build(second, order)?;
                let counts = first
                    .counts
                    .iter()
                    .zip(&second.counts)
                    .map(|(&a, &b)| a.checked_mul(b))
                    .collect::<Option<Vec<_>>>()?;
                (counts, Parts::Product(Box::new(first), Box::new(second)))
            }
        };
        Some(Self {
            shape,
            counts,
            parts,
        })
    }

    /// Number of points at the order the table was built for.
    pub(crate) fn len(&self) -> usize {
        self.counts.last().copied().unwrap_or(0)
    }

    #[inline]
    fn at(&self, order: u32) -> usize {
        self.counts[order as usize]
    }

    pub(crate) fn coordinate(&self, order: u32, index: usize) -> LatticeCoordinate {
        let mut out = Vec::with_capacity(self.shape.dimension() as usize);
        self.coordinate_into(order, index, &mut out);
        LatticeCoordinate::new(out)
    }

    fn coordinate_into(&self, order: u32, index: usize, out: &mut Vec<u32>) {
        match &self.parts {
            Parts::Point => {}
            Parts::Cone(base) => {
                // the layer of order `q` holds the indices
                // `[total - counts[q], total - counts[q - 1])`
                let total = self.at(order);
                let from_end = total - index;
                let layer = self.counts[..=order as usize].partition_point(|&c| c < from_end);
                let start = total - self.counts[layer];
                base.coordinate_into(layer as u32, index - start, out);
                out.push(order - layer as u32);
            }
            Parts::Product(first, second) => {
                let n = first.at(order);
                first.coordinate_into(order, index % n, out);
                second.coordinate_into(order, index / n, out);
            }
        }
    }

    pub(crate) fn index_of(&self, order: u32, x: &[u32]) -> usize {
        match &self.parts {
            Parts::Point => 0,
            Parts::Cone(base) => {
                let (b, lift) = split_cone(x);
                let layer = order - lift;
                self.at(order) - self.at(layer) + base.index_of(layer, b)
            }
            Parts::Product(first, second) => {
                let (xa, xb) = x.split_at(first.shape.dimension() as usize);
                first.index_of(order, xa) + second.index_of(order, xb) * first.at(order)
            }
        }
    }

    /// Point index of DOF `local_dof` on `(codim, sub_entity)`, `None` if the
    /// sub-entity carries fewer DOFs.
    pub(crate) fn dof_number(
        &self,
        order: u32,
        codim: u32,
        sub_entity: usize,
        local_dof: usize,
    ) -> Option<usize> {
        let only_point = codim == 0 && sub_entity == 0 && local_dof == 0;
        match &self.parts {
            Parts::Point => only_point.then_some(0),
            Parts::Cone(_) if order == 0 => only_point.then_some(0),
            Parts::Cone(base) => {
                let on_base = base_face_entities(base.shape, codim);
                if sub_entity < on_base {
                    return base.dof_number(order, codim - 1, sub_entity, local_dof);
                }
                let total = self.at(order);
                if codim == self.shape.dimension() {
                    // apex, alone on the last layer
                    return (sub_entity == on_base && local_dof == 0).then_some(total - 1);
                }
                let lifted = sub_entity - on_base;
                let per_layer = entity_dof_series(base.shape, codim, lifted, order - 1);
                let mut rest = local_dof;
                for layer in (1..order).rev() {
                    let here = per_layer[layer as usize];
                    if rest < here {
                        let i = base.dof_number(layer, codim, lifted, rest)?;
                        return Some(total - self.at(layer) + i);
                    }
                    rest -= here;
                }
                None
            }
            Parts::Product(first, second) => {
                let ((ca, sa), (cb, sb)) =
                    split_product_sub_entity(first.shape, second.shape, codim, sub_entity)?;
                let per_first = entity_dofs_in(first.shape, order, ca, sa);
                if per_first == 0 {
                    return None;
                }
                let i = first.dof_number(order, ca, sa, local_dof % per_first)?;
                let j = second.dof_number(order, cb, sb, local_dof / per_first)?;
                Some(i + j * first.at(order))
            }
        }
    }
}

// -----------------------------------------------------------------------------
// Classification and DOF counts on validated arguments
// -----------------------------------------------------------------------------

#[inline]
fn split_cone(x: &[u32]) -> (&[u32], u32) {
    let (base, lift) = x.split_at(x.len() - 1);
    (base, lift[0])
}

/// Sub-entities of codimension `codim` in `Cone(base)` that lie on the base face.
#[inline]
fn base_face_entities(base: &Topology, codim: u32) -> usize {
    if codim > 0 {
        base.num_sub_entities(codim - 1)
    } else {
        0
    }
}

fn ratio_to_f64(r: &Ratio<u64>) -> f64 {
    *r.numer() as f64 / *r.denom() as f64
}

pub(crate) fn classify_in(topology: &Topology, order: u32, x: &[u32]) -> SubEntityAddress {
    match topology {
        Topology::Point => SubEntityAddress::new(0, 0, 0),
        Topology::Cone(_) if order == 0 => SubEntityAddress::new(0, 0, 0),
        Topology::Cone(base) => {
            let (b, lift) = split_cone(x);
            if lift == 0 {
                // the base face is classified as a complete element of its own
                let mut address = classify_in(base, order, b);
                address.codim += 1;
                return address;
            }
            let dim = topology.dimension();
            let layer = order - lift;
            if layer == 0 {
                return SubEntityAddress::new(dim, base.num_sub_entities(dim - 1), 0);
            }
            // a lifted point belongs to the cone over its owner in the base
            let mut address = classify_in(base, layer, b);
            let per_layer = entity_dof_series(base, address.codim, address.sub_entity, order - 1);
            // DOFs on the layers with smaller lift come first
            address.local_dof += per_layer[layer as usize + 1..order as usize]
                .iter()
                .sum::<usize>();
            address.sub_entity += base_face_entities(base, address.codim);
            address
        }
        Topology::Product(first, second) => {
            let (xa, xb) = x.split_at(first.dimension() as usize);
            let a = classify_in(first, order, xa);
            let b = classify_in(second, order, xb);
            let per_first = entity_dofs_in(first, order, a.codim, a.sub_entity);
            SubEntityAddress::new(
                a.codim + b.codim,
                product_sub_entity(first, second, a.entity(), b.entity()),
                a.local_dof + b.local_dof * per_first,
            )
        }
    }
}

/// DOF count of sub-entity `(codim, sub_entity)` at every order `0..=upto`.
pub(crate) fn entity_dof_series(
    topology: &Topology,
    codim: u32,
    sub_entity: usize,
    upto: u32,
) -> Vec<usize> {
    let len = upto as usize + 1;
    let owns_only_point = usize::from(codim == 0 && sub_entity == 0);
    match topology {
        Topology::Point => vec![owns_only_point; len],
        Topology::Cone(base) => {
            let dim = topology.dimension();
            if codim > dim {
                return vec![0; len];
            }
            let on_base = base_face_entities(base, codim);
            let mut series = if sub_entity < on_base {
                entity_dof_series(base, codim - 1, sub_entity, upto)
            } else if codim == dim {
                // apex
                vec![1; len]
            } else {
                // at order q the cone over a base entity owns that entity's
                // DOFs on the layers of order 1..q-1
                let below = entity_dof_series(base, codim, sub_entity - on_base, upto);
                let mut lifted = vec![0; len];
                for q in 2..len {
                    lifted[q] = lifted[q - 1] + below[q - 1];
                }
                lifted
            };
            // the order-0 lattice is the single interior point
            series[0] = owns_only_point;
            series
        }
        Topology::Product(first, second) => {
            match split_product_sub_entity(first, second, codim, sub_entity) {
                Some(((ca, sa), (cb, sb))) => entity_dof_series(first, ca, sa, upto)
                    .into_iter()
                    .zip(entity_dof_series(second, cb, sb, upto))
                    .map(|(a, b)| a * b)
                    .collect(),
                None => vec![0; len],
            }
        }
    }
}

pub(crate) fn entity_dofs_in(topology: &Topology, order: u32, codim: u32, sub_entity: usize) -> usize {
    entity_dof_series(topology, codim, sub_entity, order)[order as usize]
}

pub(crate) fn codim_dofs_in(topology: &Topology, order: u32, codim: u32) -> usize {
    (0..topology.num_sub_entities(codim))
        .map(|s| entity_dofs_in(topology, order, codim, s))
        .sum()
}

pub(crate) fn max_dofs_in(topology: &Topology, order: u32, codim: u32) -> usize {
    (0..topology.num_sub_entities(codim))
        .map(|s| entity_dofs_in(topology, order, codim, s))
        .max()
        .unwrap_or(0)
}

pub(crate) fn height_in(topology: &Topology, order: u32, x: &[u32]) -> u32 {
    match topology {
        Topology::Point => order,
        Topology::Cone(base) => {
            let (b, lift) = split_cone(x);
            height_in(base, order - lift, b)
        }
        Topology::Product(first, second) => {
            let (xa, xb) = x.split_at(first.dimension() as usize);
            height_in(first, order, xa).min(height_in(second, order, xb))
        }
    }
}

pub(crate) fn reference_in(topology: &Topology, order: u32, x: &LatticeCoordinate) -> Vec<Ratio<u64>> {
    if order == 0 {
        let mut out = Vec::with_capacity(x.len());
        barycenter_into(topology, &mut out);
        return out;
    }
    x.to_reference(order)
}

fn barycenter_into(topology: &Topology, out: &mut Vec<Ratio<u64>>) {
    match topology {
        Topology::Point => {}
        Topology::Cone(base) => {
            // centroid of a d-cone: 1/(d+1) up the axis, base centroid shrunk by d/(d+1)
            let dim = u64::from(topology.dimension());
            let start = out.len();
            barycenter_into(base, out);
            let shrink = Ratio::new(dim, dim + 1);
            for c in &mut out[start..] {
                *c *= shrink;
            }
            out.push(Ratio::new(1, dim + 1));
        }
        Topology::Product(first, second) => {
            barycenter_into(first, out);
            barycenter_into(second, out);
        }
    }
}

pub(crate) fn reference_to_f64(reference: &[Ratio<u64>]) -> Vec<f64> {
    reference.iter().map(ratio_to_f64).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(n: u64, d: u64) -> Ratio<u64> {
        Ratio::new(n, d)
    }

    #[test]
    fn counts_follow_the_cone_recurrence() {
        let tri = Topology::triangle();
        for p in 1..6 {
            assert_eq!(
                point_count(&tri, p).unwrap(),
                point_count(&Topology::line(), p).unwrap() + point_count(&tri, p - 1).unwrap()
            );
        }
        assert_eq!(point_count(&Topology::tetrahedron(), 3).unwrap(), 20);
        assert_eq!(point_count(&Topology::pyramid(), 2).unwrap(), 14);
        assert_eq!(point_count(&Topology::prism(), 2).unwrap(), 18);
        assert_eq!(point_count(&Topology::hexahedron(), 2).unwrap(), 27);
        assert_eq!(point_count(&Topology::tetrahedron(), 0).unwrap(), 1);
    }

    #[test]
    fn count_overflow_is_reported() {
        let err = point_count(&Topology::cube(8), 1 << 16).unwrap_err();
        assert!(matches!(err, LagrangeError::CountOverflow { order, .. } if order == 1 << 16));
    }

    #[test]
    fn triangle_coordinates_are_lexicographic_by_layer() {
        let tri = Topology::triangle();
        let coords: Vec<Vec<u32>> = (0..6)
            .map(|i| point_coordinate(&tri, 2, i).unwrap().into_inner())
            .collect();
        assert_eq!(
            coords,
            vec![
                vec![0, 0],
                vec![1, 0],
                vec![2, 0],
                vec![0, 1],
                vec![1, 1],
                vec![0, 2]
            ]
        );
    }

    #[test]
    fn point_index_inverts_point_coordinate() {
        let pyramid = Topology::pyramid();
        for i in 0..point_count(&pyramid, 3).unwrap() {
            let c = point_coordinate(&pyramid, 3, i).unwrap();
            assert_eq!(point_index(&pyramid, 3, &c).unwrap(), i);
        }
    }

    #[test]
    fn triangle_sub_entity_numbering() {
        let tri = Topology::triangle();
        // vertices: base vertices first, apex last
        assert_eq!(classify(&tri, 1, &[0, 0]).unwrap().entity(), (2, 0));
        assert_eq!(classify(&tri, 1, &[1, 0]).unwrap().entity(), (2, 1));
        assert_eq!(classify(&tri, 1, &[0, 1]).unwrap().entity(), (2, 2));
        // edges: base edge, then the cones over base vertex 0 and 1
        assert_eq!(classify(&tri, 2, &[1, 0]).unwrap().entity(), (1, 0));
        assert_eq!(classify(&tri, 2, &[0, 1]).unwrap().entity(), (1, 1));
        assert_eq!(classify(&tri, 2, &[1, 1]).unwrap().entity(), (1, 2));
    }

    #[test]
    fn lifted_edge_dofs_are_ordered_by_index() {
        let tri = Topology::triangle();
        // edge 1 (x = 0) at order 4 carries the points (0,1), (0,2), (0,3)
        let dofs: Vec<usize> = (0..3)
            .map(|l| entity_dof_number(&tri, 4, 1, 1, l).unwrap())
            .collect();
        let expected: Vec<usize> = [[0, 1], [0, 2], [0, 3]]
            .iter()
            .map(|c| point_index(&tri, 4, c).unwrap())
            .collect();
        assert_eq!(dofs, expected);
        assert!(dofs.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn prism_faces_have_different_dof_counts() {
        let prism = Topology::prism();
        let per_face: Vec<usize> = (0..5)
            .map(|s| num_entity_dofs(&prism, 3, 1, s).unwrap())
            .collect();
        // three quadrilateral faces with 2x2 interior points, two triangles with one
        assert_eq!(per_face.iter().filter(|&&n| n == 4).count(), 3);
        assert_eq!(per_face.iter().filter(|&&n| n == 1).count(), 2);
        assert_eq!(max_dofs(&prism, 3, 1).unwrap(), 4);
        assert_eq!(num_dofs(&prism, 3, 1).unwrap(), 14);
    }

    #[test]
    fn pyramid_max_dofs_per_codim() {
        let pyramid = Topology::pyramid();
        assert_eq!(max_dofs(&pyramid, 3, 0).unwrap(), 1);
        assert_eq!(max_dofs(&pyramid, 3, 1).unwrap(), 4);
        assert_eq!(max_dofs(&pyramid, 3, 2).unwrap(), 2);
        assert_eq!(max_dofs(&pyramid, 3, 3).unwrap(), 1);
    }

    #[test]
    fn height_measures_distance_from_the_far_faces() {
        let line = Topology::line();
        let heights: Vec<u32> = (0..=3).map(|x| height(&line, 3, &[x]).unwrap()).collect();
        assert_eq!(heights, vec![3, 2, 1, 0]);
        let tri = Topology::triangle();
        assert_eq!(height(&tri, 3, &[1, 1]).unwrap(), 1);
        assert_eq!(height(&tri, 3, &[0, 3]).unwrap(), 0);
        let quad = Topology::quadrilateral();
        assert_eq!(height(&quad, 4, &[1, 3]).unwrap(), 1);
        assert_eq!(height(&quad, 4, &[2, 2]).unwrap(), 2);
    }

    #[test]
    fn order_zero_sits_at_the_barycenter() {
        assert_eq!(
            reference_coordinate(&Topology::triangle(), 0, &[0, 0]).unwrap(),
            vec![r(1, 3), r(1, 3)]
        );
        assert_eq!(
            reference_coordinate(&Topology::tetrahedron(), 0, &[0, 0, 0]).unwrap(),
            vec![r(1, 4), r(1, 4), r(1, 4)]
        );
        assert_eq!(
            reference_coordinate(&Topology::pyramid(), 0, &[0, 0, 0]).unwrap(),
            vec![r(3, 8), r(3, 8), r(1, 4)]
        );
        assert_eq!(
            reference_coordinate(&Topology::hexahedron(), 0, &[0, 0, 0]).unwrap(),
            vec![r(1, 2), r(1, 2), r(1, 2)]
        );
    }

    #[test]
    fn reference_point_divides_by_order() {
        let tri = Topology::triangle();
        assert_eq!(reference_point(&tri, 4, &[1, 2]).unwrap(), vec![0.25, 0.5]);
    }

    #[test]
    fn invalid_arguments_are_rejected() {
        let tri = Topology::triangle();
        assert_eq!(
            point_coordinate(&tri, 2, 6),
            Err(LagrangeError::InvalidIndex { index: 6, len: 6 })
        );
        assert!(matches!(
            classify(&tri, 2, &[2, 1]),
            Err(LagrangeError::InvalidCoordinate { .. })
        ));
        assert!(matches!(
            classify(&tri, 2, &[0]),
            Err(LagrangeError::InvalidCoordinate { .. })
        ));
        assert_eq!(
            num_dofs(&tri, 2, 3),
            Err(LagrangeError::InvalidCodimension {
                codim: 3,
                dimension: 2
            })
        );
        assert_eq!(
            entity_dof_number(&tri, 2, 1, 3, 0),
            Err(LagrangeError::InvalidSubEntity {
                codim: 1,
                sub_entity: 3,
                count: 3
            })
        );
        assert_eq!(
            entity_dof_number(&tri, 2, 1, 0, 1),
            Err(LagrangeError::InvalidLocalDof {
                codim: 1,
                sub_entity: 0,
                local_dof: 1,
                count: 1
            })
        );
        // no interior points on the quadratic triangle
        assert!(matches!(
            entity_dof_number(&tri, 2, 0, 0, 0),
            Err(LagrangeError::InvalidLocalDof { count: 0, .. })
        ));
    }

    #[test]
    fn high_order_line_stays_shallow() {
        let line = Topology::line();
        let p = 100_000;
        let n = point_count(&line, p).unwrap();
        assert_eq!(n, 100_001);
        let last = point_coordinate(&line, p, n - 1).unwrap();
        assert_eq!(last.components(), &[p]);
        assert_eq!(dof_sub_entity(&line, p, n - 1).unwrap(), SubEntityAddress::new(1, 1, 0));
        assert_eq!(
            classify(&line, p, &[50_000]).unwrap(),
            SubEntityAddress::new(0, 0, 49_999)
        );
        assert_eq!(entity_dof_number(&line, p, 0, 0, 99_998).unwrap(), 99_999);
        assert_eq!(num_entity_dofs(&line, p, 0, 0).unwrap(), 99_999);
        assert_eq!(point_index(&line, p, &[p]).unwrap(), n - 1);
        assert_eq!(height(&line, p, &[p]).unwrap(), 0);
    }

    #[test]
    fn high_order_tetrahedron_is_counted_per_layer() {
        let tet = Topology::tetrahedron();
        let p = 20_000;
        // C(p + 3, 3) points, C(p - 1, 3) of them interior
        assert_eq!(point_count(&tet, p).unwrap(), 1_333_733_370_001);
        assert_eq!(num_entity_dofs(&tet, p, 0, 0).unwrap(), 1_332_933_369_999);
        assert_eq!(num_dofs(&tet, p, 2).unwrap(), 6 * 19_999);
        let x = [5, 7, 11];
        let address = classify(&tet, p, &x).unwrap();
        assert_eq!(address.entity(), (0, 0));
        let index = point_index(&tet, p, &x).unwrap();
        assert_eq!(
            entity_dof_number(&tet, p, address.codim, address.sub_entity, address.local_dof)
                .unwrap(),
            index
        );
        assert_eq!(point_coordinate(&tet, p, index).unwrap().components(), &x);
    }

    #[test]
    fn table_lookups_match_enumeration_order() {
        let pyramid = Topology::pyramid();
        let table = CountTable::new(&pyramid, 4).unwrap();
        assert_eq!(table.len(), 55);
        for i in 0..table.len() {
            let c = table.coordinate(4, i);
            assert_eq!(table.index_of(4, &c), i);
            let a = classify_in(&pyramid, 4, &c);
            assert_eq!(table.dof_number(4, a.codim, a.sub_entity, a.local_dof), Some(i));
        }
        assert_eq!(table.dof_number(4, 3, 5, 0), None);
    }

    #[test]
    fn entity_series_of_the_triangle() {
        let tri = Topology::triangle();
        // interior DOFs (q-1)(q-2)/2, the single order-0 point included
        assert_eq!(entity_dof_series(&tri, 0, 0, 5), vec![1, 0, 0, 1, 3, 6]);
        // each edge carries q-1 DOFs
        for edge in 0..3 {
            assert_eq!(entity_dof_series(&tri, 1, edge, 4), vec![0, 0, 1, 2, 3]);
        }
        assert_eq!(entity_dof_series(&tri, 2, 2, 3), vec![0, 1, 1, 1]);
    }

    #[test]
    fn reference_coordinates_put_the_lift_last() {
        let tri = Topology::triangle();
        // the apex is the top layer of the cone: (base..., lift)
        let apex = point_coordinate(&tri, 3, point_count(&tri, 3).unwrap() - 1).unwrap();
        assert_eq!(apex.components(), &[0, 3]);
        assert_eq!(
            reference_coordinate(&tri, 3, &apex).unwrap(),
            vec![r(0, 1), r(1, 1)]
        );
        for i in 0..point_count(&tri, 3).unwrap() {
            let c = point_coordinate(&tri, 3, i).unwrap();
            assert_eq!(reference_coordinate(&tri, 3, &c).unwrap(), c.to_reference(3));
        }
    }
}
