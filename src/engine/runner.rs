// src/engine/runner.rs

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::dag::TaskGraph;
use crate::errors::{RunError, TaskError};
use crate::record::Record;
use crate::tasks::TaskOutput;

/// Lifecycle of one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    Pending,
    Running(usize),
    Completed,
    Failed,
}

/// Walks the graph's cached layers against one record.
///
/// Every task in a layer is dispatched on its own tokio task and the whole
/// layer is awaited before anything is merged, so a layer-k+1 task only
/// ever sees the fully merged state of layer k. On failure, in-flight
/// siblings are not cancelled; their outputs are discarded.
pub struct Runner<'g> {
    graph: &'g TaskGraph,
}

impl<'g> Runner<'g> {
    pub fn new(graph: &'g TaskGraph) -> Self {
        Self { graph }
    }

    /// Execute one run against `record` (pre-filled with external input).
    ///
    /// Returns the final record, or the first failure in registration
    /// order. Merge order within a layer is registration order too, so the
    /// result is deterministic regardless of task completion order.
    pub async fn run(&self, mut record: Record) -> Result<Record, RunError> {
        let mut phase = RunPhase::Pending;
        debug!(?phase, tasks = self.graph.len(), "run created");

        for (k, layer) in self.graph.layers().iter().enumerate() {
            phase = RunPhase::Running(k);
            info!(?phase, tasks = layer.len(), "dispatching layer");

            let mut handles: Vec<(usize, JoinHandle<Result<TaskOutput, TaskError>>)> =
                Vec::with_capacity(layer.len());

            for &idx in layer {
                let task = Arc::clone(self.graph.task(idx));
                let view = record.view(task.inputs());
                debug!(task = %task.name(), layer = k, "spawning task");
                handles.push((idx, tokio::spawn(async move { task.invoke(view).await })));
            }

            // Full layer barrier: every sibling finishes before any merge.
            let mut outcomes = Vec::with_capacity(handles.len());
            for (idx, handle) in handles {
                outcomes.push((idx, handle.await));
            }

            let layer_failed = outcomes.iter().any(|(_, o)| !matches!(o, Ok(Ok(_))));
            if layer_failed {
                phase = RunPhase::Failed;
                // Report the first failure in registration order; outputs
                // of completed siblings are discarded with the record.
                for (idx, outcome) in outcomes {
                    let name = self.graph.task(idx).name().to_string();
                    match outcome {
                        Ok(Ok(_)) => {}
                        Ok(Err(source)) => {
                            warn!(?phase, task = %name, layer = k, "task failed; aborting run");
                            return Err(RunError::TaskFailed { task: name, source });
                        }
                        Err(join_err) => {
                            warn!(?phase, task = %name, layer = k, "task panicked; aborting run");
                            return Err(RunError::TaskPanicked {
                                task: name,
                                message: join_err.to_string(),
                            });
                        }
                    }
                }
                unreachable!("a failed layer always returns above");
            }

            // Merge in registration order.
            for (idx, outcome) in outcomes {
                let task = self.graph.task(idx);
                let name = task.name();
                let output = match outcome {
                    Ok(Ok(output)) => output,
                    _ => unreachable!("failures handled above"),
                };

                let declared = task.outputs();
                let mut written = vec![false; declared.len()];

                for (field, value) in output.into_writes() {
                    let Some(pos) = declared.iter().position(|&f| f == field) else {
                        return Err(RunError::UndeclaredWrite {
                            task: name.to_string(),
                            field,
                        });
                    };
                    written[pos] = true;
                    record.set(field, value).map_err(|source| RunError::Record {
                        task: name.to_string(),
                        source,
                    })?;
                }

                if let Some(pos) = written.iter().position(|&w| !w) {
                    return Err(RunError::MissingOutput {
                        task: name.to_string(),
                        field: declared[pos],
                    });
                }
                debug!(task = %name, layer = k, "outputs merged");
            }
        }

        phase = RunPhase::Completed;
        debug!(?phase, "run finished");
        Ok(record)
    }
}
