// src/dag/build.rs

use std::collections::HashMap;
use std::sync::Arc;

use petgraph::algo::toposort;
use petgraph::graphmap::DiGraphMap;
use tracing::debug;

use crate::dag::graph::TaskGraph;
use crate::errors::GraphError;
use crate::record::Field;
use crate::tasks::Task;

/// Collects tasks and wires the graph from their declared fields.
///
/// Edges are derived, not written down: a task producing field F precedes
/// every task consuming F. Validation happens entirely here, before any
/// task can run.
#[derive(Default)]
pub struct GraphBuilder {
    tasks: Vec<Arc<dyn Task>>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn task(self, task: impl Task + 'static) -> Self {
        self.shared(Arc::new(task))
    }

    pub fn shared(mut self, task: Arc<dyn Task>) -> Self {
        self.tasks.push(task);
        self
    }

    /// Validate and freeze the graph.
    ///
    /// Checks, in order: non-empty, unique names, exactly one producer per
    /// non-external field, no producer of an external field, every input
    /// mapped, acyclic. The topological layers are computed here and cached
    /// in the returned [`TaskGraph`].
    pub fn build(self) -> Result<TaskGraph, GraphError> {
        if self.tasks.is_empty() {
            return Err(GraphError::Empty);
        }

        let mut seen_names: HashMap<String, usize> = HashMap::new();
        for (idx, task) in self.tasks.iter().enumerate() {
            if seen_names.insert(task.name().to_string(), idx).is_some() {
                return Err(GraphError::DuplicateTask(task.name().to_string()));
            }
        }

        // Map each field to its single producer.
        let mut producers: HashMap<Field, usize> = HashMap::new();
        for (idx, task) in self.tasks.iter().enumerate() {
            for &field in task.outputs() {
                if field.is_external() {
                    return Err(GraphError::ReservedField {
                        task: task.name().to_string(),
                        field,
                    });
                }
                if let Some(&first) = producers.get(&field) {
                    return Err(GraphError::DuplicateProducer {
                        field,
                        first: self.tasks[first].name().to_string(),
                        second: task.name().to_string(),
                    });
                }
                producers.insert(field, idx);
            }
        }

        // Every input needs a producer, unless it is external initial input.
        for task in &self.tasks {
            for &field in task.inputs() {
                if !field.is_external() && !producers.contains_key(&field) {
                    return Err(GraphError::UnmappedInput {
                        task: task.name().to_string(),
                        field,
                    });
                }
            }
        }

        // Producer -> consumer edges; a toposort failure pins the cycle.
        let mut graph: DiGraphMap<usize, ()> = DiGraphMap::new();
        for idx in 0..self.tasks.len() {
            graph.add_node(idx);
        }
        for (idx, task) in self.tasks.iter().enumerate() {
            for &field in task.inputs() {
                if let Some(&producer) = producers.get(&field) {
                    graph.add_edge(producer, idx, ());
                }
            }
        }

        let order = toposort(&graph, None).map_err(|cycle| {
            GraphError::Cycle(self.tasks[cycle.node_id()].name().to_string())
        })?;

        let layers = compute_layers(&self.tasks, &producers, &order);
        debug!(
            tasks = self.tasks.len(),
            layers = layers.len(),
            "task graph built"
        );

        Ok(TaskGraph::new(self.tasks, layers))
    }
}

/// Group tasks into layers: a task's layer is one past the deepest layer of
/// its producers (0 with no producers). Walks tasks in topological order so
/// every producer is assigned before its consumers.
fn compute_layers(
    tasks: &[Arc<dyn Task>],
    producers: &HashMap<Field, usize>,
    order: &[usize],
) -> Vec<Vec<usize>> {
    let mut layer_of = vec![0usize; tasks.len()];

    for &idx in order {
        let layer = tasks[idx]
            .inputs()
            .iter()
            .filter_map(|f| producers.get(f))
            .map(|&p| layer_of[p] + 1)
            .max()
            .unwrap_or(0);
        layer_of[idx] = layer;
    }

    let depth = layer_of.iter().max().copied().unwrap_or(0);
    let mut layers: Vec<Vec<usize>> = vec![Vec::new(); depth + 1];
    // Registration order inside each layer keeps merge order deterministic.
    for (idx, &layer) in layer_of.iter().enumerate() {
        layers[layer].push(idx);
    }
    layers
}
