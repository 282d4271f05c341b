//! Named reference cells and their shape compositions.

use crate::topology::shape::Topology;
use serde::{Deserialize, Serialize};

/// Common cell types for mesh elements.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum CellType {
    /// 0D vertex.
    Vertex,
    /// 1D segment/edge.
    Segment,
    /// 2D simplex (triangle).
    Triangle,
    /// 2D tensor-product cell (quad).
    Quadrilateral,
    /// 3D simplex (tet).
    Tetrahedron,
    /// 3D tensor-product cell (hex).
    Hexahedron,
    /// 3D wedge/prism.
    Prism,
    /// 3D pyramid.
    Pyramid,
    /// Generic simplex with dimension `d`.
    Simplex(u8),
    /// Generic hypercube with dimension `d`.
    Cube(u8),
}

impl Default for CellType {
    fn default() -> Self {
        CellType::Vertex
    }
}

impl CellType {
    /// Returns the topological dimension of the cell.
    pub fn dimension(self) -> u8 {
        match self {
            CellType::Vertex => 0,
            CellType::Segment => 1,
            CellType::Triangle | CellType::Quadrilateral => 2,
            CellType::Tetrahedron | CellType::Hexahedron | CellType::Prism | CellType::Pyramid => 3,
            CellType::Simplex(d) | CellType::Cube(d) => d,
        }
    }

    /// The point/cone/product composition of the reference cell.
    pub fn topology(self) -> Topology {
        match self {
            CellType::Vertex => Topology::point(),
            CellType::Segment => Topology::line(),
            CellType::Triangle => Topology::triangle(),
            CellType::Quadrilateral => Topology::quadrilateral(),
            CellType::Tetrahedron => Topology::tetrahedron(),
            CellType::Hexahedron => Topology::hexahedron(),
            CellType::Prism => Topology::prism(),
            CellType::Pyramid => Topology::pyramid(),
            CellType::Simplex(d) => Topology::simplex(u32::from(d)),
            CellType::Cube(d) => Topology::cube(u32::from(d)),
        }
    }

    /// Name the cell built by `topology`, preferring the fixed 0D–3D names.
    ///
    /// Returns `None` for compositions that are not one of the standard
    /// cells (e.g. `line × triangle`, which has the prism's shape but a
    /// different sub-entity numbering).
    pub fn from_topology(topology: &Topology) -> Option<Self> {
        let named = [
            CellType::Vertex,
            CellType::Segment,
            CellType::Triangle,
            CellType::Quadrilateral,
            CellType::Tetrahedron,
            CellType::Hexahedron,
            CellType::Prism,
            CellType::Pyramid,
        ];
        if let Some(cell) = named.into_iter().find(|cell| cell.topology() == *topology) {
            return Some(cell);
        }
        let dim = u8::try_from(topology.dimension()).ok()?;
        if Topology::simplex(u32::from(dim)) == *topology {
            Some(CellType::Simplex(dim))
        } else if Topology::cube(u32::from(dim)) == *topology {
            Some(CellType::Cube(dim))
        } else {
            None
        }
    }

    /// Whether the cell is a tensor product of lines.
    pub fn is_tensor_product(self) -> bool {
        matches!(
            self,
            CellType::Vertex
                | CellType::Segment
                | CellType::Quadrilateral
                | CellType::Hexahedron
                | CellType::Cube(_)
        )
    }
}
