// src/lib.rs

pub mod cli;
pub mod config;
pub mod dag;
pub mod engine;
pub mod errors;
pub mod logging;
pub mod record;
pub mod services;
pub mod tasks;

use std::path::Path;
use std::sync::Arc;

use anyhow::{Result, anyhow};
use tracing::info;

use crate::cli::CliArgs;
use crate::config::load_or_default;
use crate::dag::{GraphBuilder, TaskGraph};
use crate::engine::Runner;
use crate::errors::{GraphError, RunError};
use crate::record::{Category, Field, Record};
use crate::services::{Completion, GeminiClient, KnowledgeBase, ModelConfig, TextExtraction};
use crate::tasks::{Coach, Extractor, Scientist, Synthesizer};

/// External input for one run.
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub image: Option<String>,
    pub persona: String,
}

/// Final result of one run.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub verdict: String,
    pub category: Category,
}

/// Assemble the standard analysis graph:
///
/// ```text
/// extractor ──┬── scientist ──┬── synthesizer
///             └── coach     ──┘
/// ```
///
/// Built once and reused across runs; the fan-out/fan-in wiring falls out
/// of the tasks' declared fields.
pub fn build_graph(
    vision: Arc<dyn TextExtraction>,
    llm: Arc<dyn Completion>,
    knowledge: KnowledgeBase,
) -> Result<TaskGraph, GraphError> {
    GraphBuilder::new()
        .task(Extractor::new(vision))
        .task(Scientist::new(llm.clone(), knowledge))
        .task(Coach::new(llm.clone()))
        .task(Synthesizer::new(llm))
        .build()
}

/// Run the graph once against the given external input.
pub async fn analyze(graph: &TaskGraph, request: AnalysisRequest) -> Result<Analysis, RunError> {
    let external = |source| RunError::Record {
        task: "external input".to_string(),
        source,
    };

    let mut record = Record::new();
    record.set(Field::Persona, request.persona).map_err(external)?;
    if let Some(image) = request.image {
        record.set(Field::ImageRef, image).map_err(external)?;
    }

    let record = Runner::new(graph).run(record).await?;

    Ok(Analysis {
        verdict: record.text(Field::Verdict).map_err(external)?.to_string(),
        category: record.category(Field::Category).map_err(external)?,
    })
}

/// High-level entry point used by `main.rs`.
pub async fn run(args: CliArgs) -> Result<()> {
    let cfg = load_or_default(args.config.as_deref().map(Path::new))?;

    // A dry run never calls a collaborator, so no key is required for it.
    let api_key = if args.dry_run {
        cfg.resolve_api_key().unwrap_or_default()
    } else {
        cfg.resolve_api_key().ok_or_else(|| {
            anyhow!("no API key: set [model].api_key in the config or the GEMINI_API_KEY env var")
        })?
    };

    let client = Arc::new(GeminiClient::new(ModelConfig {
        model: cfg.model.model.clone(),
        api_url: cfg.model.api_url.clone(),
        api_key,
        temperature: cfg.model.temperature,
    }));

    let graph = build_graph(client.clone(), client, cfg.knowledge_base())?;

    if args.dry_run {
        print!("{}", graph.execution_plan());
        return Ok(());
    }

    info!(image = ?args.image, persona = %args.persona, "starting analysis run");
    let analysis = analyze(
        &graph,
        AnalysisRequest {
            image: args.image,
            persona: args.persona,
        },
    )
    .await?;

    println!("Mode: {}", analysis.category);
    println!("Verdict: {}", analysis.verdict);
    Ok(())
}
