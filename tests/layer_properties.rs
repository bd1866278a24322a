// tests/layer_properties.rs

//! Property test for layer assignment: for any valid graph, every task
//! lands in exactly one layer, strictly after all of its producers.

use std::collections::HashSet;

use proptest::prelude::*;

use labeljury::dag::GraphBuilder;
use labeljury::record::Field;
use labeljury_test_utils::builders::StubTask;

/// Fields a task may produce (external input fields excluded).
const POOL: [Field; 5] = [
    Field::ExtractedText,
    Field::ScientistReport,
    Field::CoachReport,
    Field::Verdict,
    Field::Category,
];

/// Random dependency lists for up to `POOL.len()` tasks. Acyclicity is
/// ensured by only letting task N depend on tasks 0..N-1 (the raw indices
/// are sanitized with `% i`).
fn deps_strategy() -> impl Strategy<Value = Vec<Vec<usize>>> {
    (1..=POOL.len()).prop_flat_map(|num_tasks| {
        proptest::collection::vec(
            proptest::collection::vec(any::<usize>(), 0..num_tasks),
            num_tasks,
        )
    })
}

proptest! {
    #[test]
    fn every_task_lands_strictly_after_its_producers(raw_deps in deps_strategy()) {
        let num_tasks = raw_deps.len();
        let mut deps_of: Vec<HashSet<usize>> = Vec::with_capacity(num_tasks);

        let mut builder = GraphBuilder::new();
        for (i, potential_deps) in raw_deps.into_iter().enumerate() {
            let mut deps = HashSet::new();
            for dep_idx in potential_deps {
                if i > 0 {
                    deps.insert(dep_idx % i);
                }
            }

            let mut task = StubTask::new(&format!("task_{i}")).writes(POOL[i]);
            for &dep in &deps {
                task = task.reads(POOL[dep]);
            }
            builder = builder.shared(std::sync::Arc::new(task));
            deps_of.push(deps);
        }

        let graph = builder.build().unwrap();

        // Exactly one layer per task.
        let mut seen = HashSet::new();
        for layer in graph.layers() {
            for &idx in layer {
                prop_assert!(seen.insert(idx), "task {} appears twice", idx);
            }
        }
        prop_assert_eq!(seen.len(), num_tasks);

        // Layer of each task is strictly after each producer's layer, and
        // indices inside a layer keep registration order.
        let layer_of = |idx: usize| {
            graph
                .layers()
                .iter()
                .position(|layer| layer.contains(&idx))
                .unwrap()
        };
        for (i, deps) in deps_of.iter().enumerate() {
            for &dep in deps {
                prop_assert!(layer_of(i) > layer_of(dep));
            }
            if deps.is_empty() {
                prop_assert_eq!(layer_of(i), 0);
            }
        }
        for layer in graph.layers() {
            prop_assert!(layer.windows(2).all(|w| w[0] < w[1]));
        }
    }
}
