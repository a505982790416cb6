//! Property tests over arbitrary traces.

use std::collections::HashSet;

use pagesim::{
    generate_trace, simulate_fifo, simulate_fifo_traced, simulate_lru, simulate_lru_traced,
    Access, AccessKind, GeneratorParams, Policy,
};
use proptest::prelude::*;

fn access() -> impl Strategy<Value = Access> {
    (0usize..12, any::<bool>()).prop_map(|(page, write)| Access {
        page,
        kind: if write {
            AccessKind::Write
        } else {
            AccessKind::Read
        },
    })
}

fn trace() -> impl Strategy<Value = Vec<Access>> {
    prop::collection::vec(access(), 0..200)
}

fn distinct_pages(trace: &[Access]) -> usize {
    trace.iter().map(|a| a.page).collect::<HashSet<_>>().len()
}

proptest! {
    #[test]
    fn prop_counts_are_bounded(trace in trace(), capacity in 1usize..16) {
        for policy in Policy::ALL {
            let stats = policy.simulate(&trace, capacity).unwrap();
            prop_assert!(stats.writes <= stats.faults);
            prop_assert!(stats.faults <= trace.len() as u64);
            prop_assert_eq!(stats.hits + stats.faults, trace.len() as u64);
        }
    }

    #[test]
    fn prop_lru_faults_grow_with_pressure(trace in trace(), capacity in 2usize..16) {
        let larger = simulate_lru(&trace, capacity).unwrap();
        let smaller = simulate_lru(&trace, capacity - 1).unwrap();
        prop_assert!(smaller.faults >= larger.faults);
    }

    #[test]
    fn prop_runs_are_deterministic(trace in trace(), capacity in 1usize..8) {
        prop_assert_eq!(
            simulate_fifo_traced(&trace, capacity).unwrap(),
            simulate_fifo_traced(&trace, capacity).unwrap()
        );
        prop_assert_eq!(
            simulate_lru_traced(&trace, capacity).unwrap(),
            simulate_lru_traced(&trace, capacity).unwrap()
        );
    }

    #[test]
    fn prop_enough_frames_only_cold_faults(trace in trace(), extra in 0usize..4) {
        let capacity = distinct_pages(&trace).max(1) + extra;
        for policy in Policy::ALL {
            let (stats, steps) = policy.simulate_traced(&trace, capacity).unwrap();
            prop_assert_eq!(stats.faults, distinct_pages(&trace) as u64);
            prop_assert_eq!(stats.writes, 0);
            prop_assert!(steps.iter().all(|s| s.evicted.is_none()));
        }
    }

    #[test]
    fn prop_dirty_pages_are_resident(trace in trace(), capacity in 1usize..8) {
        for policy in Policy::ALL {
            let (_, steps) = policy.simulate_traced(&trace, capacity).unwrap();
            for step in steps {
                prop_assert!(step.resident.len() <= capacity);
                prop_assert!(step.dirty.iter().all(|p| step.resident.contains(p)));
                prop_assert!(step.resident.contains(&step.access.page));
            }
        }
    }

    #[test]
    fn prop_tracing_does_not_change_counts(trace in trace(), capacity in 1usize..8) {
        prop_assert_eq!(
            simulate_fifo_traced(&trace, capacity).unwrap().0,
            simulate_fifo(&trace, capacity).unwrap()
        );
        prop_assert_eq!(
            simulate_lru_traced(&trace, capacity).unwrap().0,
            simulate_lru(&trace, capacity).unwrap()
        );
    }

    #[test]
    fn prop_generator_shape(
        seed in any::<u64>(),
        length in 0usize..300,
        universe in 1usize..40,
        dwell in 1usize..30,
    ) {
        let params = GeneratorParams {
            length,
            page_universe_size: universe,
            working_set_size: (universe / 2).max(1),
            working_set_dwell: dwell,
            write_probability: 0.3,
        };
        let a = generate_trace(&params, &mut fastrand::Rng::with_seed(seed)).unwrap();
        let b = generate_trace(&params, &mut fastrand::Rng::with_seed(seed)).unwrap();
        prop_assert_eq!(a.len(), length);
        prop_assert!(a.iter().all(|acc| acc.page < universe));
        prop_assert_eq!(a, b);
    }
}
