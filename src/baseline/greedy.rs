//! Value-density greedy heuristic.

use crate::catalog::{Capacity, Catalog, Totals};
use crate::decode::LoadPlan;
use tracing::{debug, instrument};

/// Packs items in descending `value / (weight + volume)` order, skipping any
/// item that would break either limit.
///
/// Ties in density keep catalog order. The returned plan lists items in
/// packing order.
///
/// # Complexity
/// O(n log n)
#[instrument(skip_all, fields(items = catalog.len()))]
pub fn ratio_greedy(catalog: &Catalog, capacity: &Capacity) -> LoadPlan {
    let mut order: Vec<usize> = (0..catalog.len()).collect();
    let items = catalog.items();
    order.sort_by(|&a, &b| items[b].density().total_cmp(&items[a].density()));

    let mut used = Totals::default();
    let mut selected = Vec::new();
    for index in order {
        let item = &items[index];
        if used.weight + item.weight <= capacity.max_weight
            && used.volume + item.volume <= capacity.max_volume
        {
            used.add(item);
            selected.push(index);
        }
    }

    let plan = LoadPlan::from_indices(&selected, catalog);
    debug!(loaded = plan.count(), value = plan.totals.value, "greedy packing done");
    plan
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ga::KnapsackProblem;

    #[test]
    fn test_packs_by_density() {
        // densities: 5.0, 1.25, 10.0
        let catalog =
            Catalog::from_triples(&[(10.0, 10.0, 100.0), (20.0, 20.0, 50.0), (1.0, 1.0, 20.0)])
                .unwrap();
        let plan = ratio_greedy(&catalog, &Capacity::new(15.0, 15.0));
        assert_eq!(plan.indices(), vec![2, 0]);
        assert!((plan.totals.value - 120.0).abs() < 1e-12);
    }

    #[test]
    fn test_skips_but_continues() {
        // The dense heavy item does not fit; lighter ones later still do
        let catalog =
            Catalog::from_triples(&[(100.0, 1.0, 1000.0), (5.0, 5.0, 10.0), (5.0, 5.0, 9.0)])
                .unwrap();
        let plan = ratio_greedy(&catalog, &Capacity::new(10.0, 10.0));
        assert_eq!(plan.indices(), vec![1, 2]);
    }

    #[test]
    fn test_result_is_feasible() {
        let catalog = Catalog::reference();
        let capacity = Capacity::new(1000.0, 3000.0);
        let plan = ratio_greedy(&catalog, &capacity);
        assert!(plan.totals.fits(&capacity));
        let problem = KnapsackProblem::new(catalog, capacity).unwrap();
        assert_eq!(
            problem.evaluate(&plan.to_genome(50)),
            plan.totals.value
        );
    }

    #[test]
    fn test_zero_capacity_loads_nothing() {
        let plan = ratio_greedy(&Catalog::reference(), &Capacity::new(0.0, 0.0));
        assert_eq!(plan.count(), 0);
    }
}
