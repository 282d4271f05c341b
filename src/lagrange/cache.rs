//! Build-once memoization of Lagrange point sets.
//!
//! Point sets are pure values of `(topology, order)`, so they can be shared
//! freely once built. The cache is sharded (`DashMap`); a set is built
//! outside the shard lock and the first insert wins, so concurrent misses on
//! the same key may both build but always hand out the same `Arc`.

use crate::lagrange::point_set::LagrangePointSet;
use crate::lagrange_error::LagrangeError;
use crate::topology::shape::Topology;
use dashmap::DashMap;
use once_cell::sync::Lazy;
use std::sync::Arc;

/// Anything that caches derived tables should implement this.
pub trait InvalidateCache {
    /// Invalidate *all* internal caches so future queries recompute correctly.
    fn invalidate_cache(&mut self);
}

// Blanket impl for Box<T>
impl<T: InvalidateCache + ?Sized> InvalidateCache for Box<T> {
    #[inline]
    fn invalidate_cache(&mut self) {
        (**self).invalidate_cache();
    }
}

type Key = (Topology, u32); // (topology, order)

/// Memo of point sets keyed by `(topology, order)`.
#[derive(Debug, Default)]
pub struct PointSetCache {
    sets: DashMap<Key, Arc<LagrangePointSet>>,
}

impl PointSetCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The point set of `topology` at `order`, built on first request.
    pub fn get_or_build(
        &self,
        topology: &Topology,
        order: u32,
    ) -> Result<Arc<LagrangePointSet>, LagrangeError> {
        let key = (topology.clone(), order);
        if let Some(hit) = self.sets.get(&key) {
            log::trace!("point set cache hit {topology} order={order}");
            return Ok(Arc::clone(hit.value()));
        }
        let built = Arc::new(LagrangePointSet::new(topology.clone(), order)?);
        Ok(Arc::clone(self.sets.entry(key).or_insert(built).value()))
    }

    /// The point set if it has already been built.
    pub fn get(&self, topology: &Topology, order: u32) -> Option<Arc<LagrangePointSet>> {
        self.sets
            .get(&(topology.clone(), order))
            .map(|entry| Arc::clone(entry.value()))
    }

    /// Number of cached point sets.
    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    /// Drop every cached set. Handed-out `Arc`s stay valid.
    pub fn clear(&self) {
        if !self.sets.is_empty() {
            log::warn!("clearing {} cached Lagrange point sets", self.sets.len());
        }
        self.sets.clear();
    }
}

impl InvalidateCache for PointSetCache {
    fn invalidate_cache(&mut self) {
        self.clear();
    }
}

static POINT_SETS: Lazy<PointSetCache> = Lazy::new(PointSetCache::new);

/// The process-wide cached point set of `topology` at `order`.
pub fn lagrange_points(
    topology: &Topology,
    order: u32,
) -> Result<Arc<LagrangePointSet>, LagrangeError> {
    POINT_SETS.get_or_build(topology, order)
}

/// The process-wide cache behind [`lagrange_points`].
pub fn global_cache() -> &'static PointSetCache {
    &POINT_SETS
}
