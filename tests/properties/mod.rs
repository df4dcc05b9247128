//! # Randomized properties
//!
//! Balanced instances are generated from a random shipment plan: its row and column sums are the
//! supplies and demands. The plan itself is then a feasible, usually non basic, allocation with a
//! known cost, which bounds the optimum from above.
use proptest::prelude::*;

use transport_simplex::algorithm::construction::Heuristic;
use transport_simplex::algorithm::modi::{refine, Refiner, RefinerConfig, Step};
use transport_simplex::data::allocation::Allocation;
use transport_simplex::data::problem::Problem;

fn instance() -> impl Strategy<Value = (Problem<i64>, Allocation<i64>)> {
    (1_usize..=5, 1_usize..=5).prop_flat_map(|(n, m)| {
        let plan = prop::collection::vec(prop::collection::vec(0_i64..20, m), n);
        let costs = prop::collection::vec(prop::collection::vec(0_i64..30, m), n);
        (plan, costs)
    }).prop_map(|(plan, costs)| {
        let supplies = plan.iter().map(|row| row.iter().sum::<i64>()).collect();
        let demands = (0..plan[0].len()).map(|j| plan.iter().map(|row| row[j]).sum::<i64>()).collect();
        let problem = Problem::new(supplies, demands, costs).unwrap();
        let allocation = Allocation::from_rows(plan).unwrap();

        (problem, allocation)
    })
}

proptest! {
    #[test]
    fn heuristics_are_feasible((problem, _) in instance()) {
        for heuristic in Heuristic::ALL {
            let allocation = heuristic.construct(&problem).unwrap();
            prop_assert!(allocation.check_feasible(&problem).is_ok());
            prop_assert!(allocation.nr_positive() <= problem.basis_size());
            prop_assert!(allocation.nr_basic() <= problem.basis_size());
        }
    }

    #[test]
    fn heuristics_converge((problem, plan) in instance()) {
        let plan_cost = plan.total_cost(&problem);

        let mut optimal_costs = Vec::new();
        for heuristic in Heuristic::ALL {
            let allocation = heuristic.construct(&problem).unwrap();
            let initial_cost = allocation.total_cost(&problem);

            let refined = refine(&problem, allocation, RefinerConfig::default()).unwrap();
            let cost = refined.allocation.total_cost(&problem);
            prop_assert!(refined.allocation.check_feasible(&problem).is_ok());
            prop_assert_eq!(refined.allocation.nr_basic(), problem.basis_size());
            prop_assert!(cost <= initial_cost);
            prop_assert!(cost <= plan_cost);
            optimal_costs.push(cost);
        }
        prop_assert!(optimal_costs.iter().all(|&cost| cost == optimal_costs[0]));

        // Starting from the plan itself requires cancelling its cycles first
        let refined = refine(&problem, plan, RefinerConfig::default()).unwrap();
        prop_assert_eq!(refined.allocation.total_cost(&problem), optimal_costs[0]);
    }

    #[test]
    fn refinement_is_idempotent((problem, plan) in instance()) {
        let refined = refine(&problem, plan, RefinerConfig::default()).unwrap();

        let mut refiner = Refiner::new(&problem, refined.allocation.clone(), RefinerConfig::default()).unwrap();
        prop_assert_eq!(refiner.step().unwrap(), Step::Optimal);
        prop_assert_eq!(refiner.allocation(), &refined.allocation);
        prop_assert_eq!(refiner.stats().cycles_cancelled, 0);
    }

    #[test]
    fn pivots_never_increase_cost((problem, _) in instance(), heuristic in prop::sample::select(Heuristic::ALL.to_vec())) {
        let allocation = heuristic.construct(&problem).unwrap();
        let mut refiner = Refiner::new(&problem, allocation, RefinerConfig::default()).unwrap();

        let mut cost = refiner.cost();
        while let Step::Pivot { theta, reduced_cost, .. } = refiner.step().unwrap() {
            prop_assert!(reduced_cost < 0);
            prop_assert_eq!(refiner.cost(), cost + theta * reduced_cost);
            if theta > 0 {
                prop_assert!(refiner.cost() < cost);
            }
            prop_assert!(refiner.allocation().check_feasible(&problem).is_ok());
            cost = refiner.cost();
        }
    }

    #[test]
    fn blands_rule_reaches_same_optimum((problem, plan) in instance()) {
        let dantzig = refine(&problem, plan.clone(), RefinerConfig::default()).unwrap();
        let config = RefinerConfig { max_iterations: None, degenerate_pivot_limit: 0 };
        let bland = refine(&problem, plan, config).unwrap();

        prop_assert_eq!(bland.allocation.total_cost(&problem), dantzig.allocation.total_cost(&problem));
    }
}
