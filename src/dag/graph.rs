// src/dag/graph.rs

use std::fmt::Write as _;
use std::sync::Arc;

use crate::tasks::Task;

/// Validated, immutable task graph with its topological layers.
///
/// Tasks within a layer have no dependency edges among themselves and run
/// concurrently; every dependency of a layer-k task lives in a layer
/// strictly before k. Layers are computed once at build time and reused for
/// every run.
#[derive(Clone)]
pub struct TaskGraph {
    tasks: Vec<Arc<dyn Task>>,
    layers: Vec<Vec<usize>>,
}

impl TaskGraph {
    pub(crate) fn new(tasks: Vec<Arc<dyn Task>>, layers: Vec<Vec<usize>>) -> Self {
        Self { tasks, layers }
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn task(&self, idx: usize) -> &Arc<dyn Task> {
        &self.tasks[idx]
    }

    pub fn tasks(&self) -> impl Iterator<Item = &Arc<dyn Task>> {
        self.tasks.iter()
    }

    /// Task indices grouped by execution layer, layer 0 first. Indices
    /// within a layer follow registration order.
    pub fn layers(&self) -> &[Vec<usize>] {
        &self.layers
    }

    /// Layer a task was assigned to.
    pub fn layer_of(&self, name: &str) -> Option<usize> {
        self.layers.iter().position(|layer| {
            layer
                .iter()
                .any(|&idx| self.tasks[idx].name() == name)
        })
    }

    /// Human-readable execution plan for dry-run output.
    pub fn execution_plan(&self) -> String {
        let mut plan = String::new();
        for (k, layer) in self.layers.iter().enumerate() {
            let _ = writeln!(plan, "Layer {} ({} task(s)):", k, layer.len());
            for &idx in layer {
                let task = &self.tasks[idx];
                let inputs: Vec<&str> = task.inputs().iter().map(|f| f.name()).collect();
                let outputs: Vec<&str> = task.outputs().iter().map(|f| f.name()).collect();
                let _ = writeln!(
                    plan,
                    "  {}: [{}] -> [{}]",
                    task.name(),
                    inputs.join(", "),
                    outputs.join(", ")
                );
            }
        }
        plan
    }
}
