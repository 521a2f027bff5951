use std::io::Write;

use anyhow::{Context, Result};
use mstree_core::{Edge, PlanConfig, plan};
use mstree_parser::Problem;
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone)]
pub(crate) struct OutputConfig {
    pub format: OutputFormat,
    pub print_tree: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            print_tree: true,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub(crate) enum Answer {
    Replace { edge: Edge },
    Keep,
    Rejected { reason: String },
}

#[derive(Debug, Serialize)]
pub(crate) struct QueryAnswer {
    pub query: Edge,
    pub answer: Answer,
}

#[derive(Debug, Serialize)]
pub(crate) struct Report {
    pub vertices: usize,
    pub components: usize,
    pub skipped: usize,
    pub total_weight: f64,
    pub tree: Vec<Edge>,
    pub queries: Vec<QueryAnswer>,
}

/// Build the tree for `problem` and answer every query against it.
///
/// A query naming a bad vertex is answered as rejected; it does not abort the run.
pub(crate) fn solve(problem: &Problem, plan_config: &PlanConfig) -> Result<Report> {
    let plan = plan(problem.vertex_count, &problem.candidates, plan_config)
        .context("failed to build the spanning tree")?;

    let queries = problem
        .queries
        .iter()
        .map(|query| {
            let answer = match plan.replacement(query.v1, query.v2, query.weight) {
                Ok(Some(edge)) => Answer::Replace { edge },
                Ok(None) => Answer::Keep,
                Err(err) => Answer::Rejected {
                    reason: err.to_string(),
                },
            };
            QueryAnswer {
                query: *query,
                answer,
            }
        })
        .collect();

    Ok(Report {
        vertices: problem.vertex_count,
        components: plan.forest.components,
        skipped: plan.skipped,
        total_weight: plan.forest.total_weight(),
        tree: plan.forest.edges,
        queries,
    })
}

/// Line-oriented output: the vertex count, one `a b weight` line per tree edge,
/// then one line per query.
pub(crate) fn write_text(report: &Report, config: &OutputConfig, out: &mut impl Write) -> Result<()> {
    if config.print_tree {
        writeln!(out, "{}", report.vertices)?;
        for edge in &report.tree {
            writeln!(out, "{}", edge)?;
        }
    }
    for query in &report.queries {
        match &query.answer {
            Answer::Replace { edge } => writeln!(out, "replace {}", edge)?,
            Answer::Keep => writeln!(out, "keep")?,
            Answer::Rejected { reason } => writeln!(out, "rejected: {}", reason)?,
        }
    }
    Ok(())
}

pub(crate) fn write_report(report: &Report, config: &OutputConfig, out: &mut impl Write) -> Result<()> {
    match config.format {
        OutputFormat::Text => write_text(report, config, out),
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, report).context("failed to encode report")?;
            writeln!(out)?;
            Ok(())
        }
    }
}
