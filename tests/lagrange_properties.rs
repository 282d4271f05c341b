use mesh_lagrange::lagrange::engine::{
    dof_sub_entity, entity_dof_number, max_dofs, num_dofs, num_entity_dofs, point_coordinate,
    point_count, point_index,
};
use mesh_lagrange::lagrange::point_set::LagrangePointSet;
use mesh_lagrange::topology::shape::Topology;
use proptest::prelude::*;
use std::collections::HashSet;

fn topology_strategy() -> impl Strategy<Value = Topology> {
    Just(Topology::point())
        .prop_recursive(4, 16, 2, |inner| {
            prop_oneof![
                inner.clone().prop_map(Topology::cone),
                (inner.clone(), inner).prop_map(|(a, b)| Topology::product(a, b)),
            ]
        })
        .prop_filter("dimension at most 4", |t| t.dimension() <= 4)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn dofs_per_codim_sum_to_point_count(t in topology_strategy(), p in 0u32..=4) {
        let total: usize = (0..=t.dimension())
            .map(|c| num_dofs(&t, p, c).unwrap())
            .sum();
        prop_assert_eq!(total, point_count(&t, p).unwrap());
    }

    #[test]
    fn classification_round_trips(t in topology_strategy(), p in 0u32..=4) {
        for i in 0..point_count(&t, p).unwrap() {
            let a = dof_sub_entity(&t, p, i).unwrap();
            prop_assert!(a.local_dof < num_entity_dofs(&t, p, a.codim, a.sub_entity).unwrap());
            prop_assert_eq!(
                entity_dof_number(&t, p, a.codim, a.sub_entity, a.local_dof).unwrap(),
                i
            );
        }
    }

    #[test]
    fn coordinates_are_injective_and_invertible(t in topology_strategy(), p in 0u32..=4) {
        let n = point_count(&t, p).unwrap();
        let mut seen = HashSet::with_capacity(n);
        for i in 0..n {
            let c = point_coordinate(&t, p, i).unwrap();
            prop_assert_eq!(c.len(), t.dimension() as usize);
            prop_assert_eq!(point_index(&t, p, &c).unwrap(), i);
            prop_assert!(seen.insert(c.into_inner()));
        }
    }

    #[test]
    fn product_counts_multiply(
        a in topology_strategy(),
        b in topology_strategy(),
        p in 0u32..=3,
    ) {
        let prod = Topology::product(a.clone(), b.clone());
        prop_assert_eq!(
            point_count(&prod, p).unwrap(),
            point_count(&a, p).unwrap() * point_count(&b, p).unwrap()
        );
    }

    #[test]
    fn max_dofs_bounds_every_entity(t in topology_strategy(), p in 0u32..=4) {
        for codim in 0..=t.dimension() {
            let largest = (0..t.num_sub_entities(codim))
                .map(|s| num_entity_dofs(&t, p, codim, s).unwrap())
                .max()
                .unwrap_or(0);
            prop_assert_eq!(max_dofs(&t, p, codim).unwrap(), largest);
        }
    }

    #[test]
    fn point_set_tables_agree_with_engine(t in topology_strategy(), p in 0u32..=3) {
        let set = LagrangePointSet::new(t.clone(), p).unwrap();
        prop_assert_eq!(set.num_points(), point_count(&t, p).unwrap());
        for codim in 0..=t.dimension() {
            for sub in 0..t.num_sub_entities(codim) {
                let dofs = set.entity_dofs(codim, sub);
                prop_assert!(dofs.windows(2).all(|w| w[0] < w[1]));
                for (local, &i) in dofs.iter().enumerate() {
                    let a = set.address(i);
                    prop_assert_eq!((a.codim, a.sub_entity, a.local_dof), (codim, sub, local));
                }
            }
        }
    }
}
