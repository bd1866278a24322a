// tests/graph_build.rs

//! Build-time validation: every malformed graph must be rejected before a
//! single task can run.

use labeljury::dag::GraphBuilder;
use labeljury::errors::GraphError;
use labeljury::record::Field;
use labeljury_test_utils::builders::StubTask;
use labeljury_test_utils::init_tracing;

#[test]
fn empty_graph_is_rejected() {
    init_tracing();
    assert!(matches!(
        GraphBuilder::new().build(),
        Err(GraphError::Empty)
    ));
}

#[test]
fn duplicate_task_names_are_rejected() {
    let result = GraphBuilder::new()
        .task(StubTask::new("extract").writes(Field::ExtractedText))
        .task(StubTask::new("extract").writes(Field::ScientistReport))
        .build();
    assert!(matches!(result, Err(GraphError::DuplicateTask(name)) if name == "extract"));
}

#[test]
fn two_producers_of_one_field_are_rejected() {
    let result = GraphBuilder::new()
        .task(StubTask::new("a").writes(Field::ExtractedText))
        .task(StubTask::new("b").writes(Field::ExtractedText))
        .build();
    assert!(matches!(
        result,
        Err(GraphError::DuplicateProducer { field: Field::ExtractedText, .. })
    ));
}

#[test]
fn producing_an_external_field_is_rejected() {
    let result = GraphBuilder::new()
        .task(StubTask::new("impostor").writes(Field::Persona))
        .build();
    assert!(matches!(
        result,
        Err(GraphError::ReservedField { field: Field::Persona, .. })
    ));
}

#[test]
fn input_without_a_producer_is_rejected() {
    let result = GraphBuilder::new()
        .task(
            StubTask::new("orphan")
                .reads(Field::CoachReport)
                .writes(Field::Verdict),
        )
        .build();
    assert!(matches!(
        result,
        Err(GraphError::UnmappedInput { field: Field::CoachReport, .. })
    ));
}

#[test]
fn external_inputs_need_no_producer() {
    let graph = GraphBuilder::new()
        .task(
            StubTask::new("reader")
                .reads(Field::ImageRef)
                .reads(Field::Persona)
                .writes(Field::ExtractedText),
        )
        .build()
        .unwrap();
    assert_eq!(graph.len(), 1);
}

#[test]
fn cycle_is_rejected_at_build_time() {
    let result = GraphBuilder::new()
        .task(
            StubTask::new("a")
                .reads(Field::ScientistReport)
                .writes(Field::ExtractedText),
        )
        .task(
            StubTask::new("b")
                .reads(Field::ExtractedText)
                .writes(Field::ScientistReport),
        )
        .build();
    assert!(matches!(result, Err(GraphError::Cycle(_))));
}

/// The standard fan-out/fan-in shape lands in three layers, with every task
/// strictly after all of its producers.
#[test]
fn fan_out_fan_in_layers() {
    let graph = GraphBuilder::new()
        .task(
            StubTask::new("extract")
                .reads(Field::ImageRef)
                .writes(Field::ExtractedText),
        )
        .task(
            StubTask::new("left")
                .reads(Field::ExtractedText)
                .writes(Field::ScientistReport),
        )
        .task(
            StubTask::new("right")
                .reads(Field::ExtractedText)
                .reads(Field::Persona)
                .writes(Field::CoachReport),
        )
        .task(
            StubTask::new("reduce")
                .reads(Field::ScientistReport)
                .reads(Field::CoachReport)
                .writes(Field::Verdict)
                .writes(Field::Category),
        )
        .build()
        .unwrap();

    assert_eq!(graph.layers().len(), 3);
    assert_eq!(graph.layer_of("extract"), Some(0));
    assert_eq!(graph.layer_of("left"), Some(1));
    assert_eq!(graph.layer_of("right"), Some(1));
    assert_eq!(graph.layer_of("reduce"), Some(2));

    // Each task appears in exactly one layer.
    let total: usize = graph.layers().iter().map(|l| l.len()).sum();
    assert_eq!(total, graph.len());
}

#[test]
fn independent_tasks_share_layer_zero() {
    let graph = GraphBuilder::new()
        .task(StubTask::new("a").writes(Field::ExtractedText))
        .task(StubTask::new("b").writes(Field::ScientistReport))
        .build()
        .unwrap();
    assert_eq!(graph.layers().len(), 1);
    assert_eq!(graph.layers()[0].len(), 2);
}

#[test]
fn execution_plan_lists_layers_and_fields() {
    let graph = GraphBuilder::new()
        .task(
            StubTask::new("extract")
                .reads(Field::ImageRef)
                .writes(Field::ExtractedText),
        )
        .task(
            StubTask::new("analyze")
                .reads(Field::ExtractedText)
                .writes(Field::ScientistReport),
        )
        .build()
        .unwrap();

    let plan = graph.execution_plan();
    assert!(plan.contains("Layer 0"));
    assert!(plan.contains("Layer 1"));
    assert!(plan.contains("extract: [image_ref] -> [extracted_text]"));
}
