use std::fs;
use std::io::Write;
use std::path::PathBuf;

use clap::Parser;
use mstree_core::PlanConfig;
use mstree_parser::{LineDiagnostic, Span, parse};
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::report::{OutputConfig, OutputFormat, solve, write_report};

mod report;

#[derive(Parser, Debug)]
#[command(
    name = "mstree_cli",
    about = "Minimum spanning tree with edge replacement queries",
    version
)]
struct Args {
    /// Problem file: "n m", m candidate edges, then optionally "q" and q query edges
    #[arg(value_name = "PROBLEM")]
    problem: PathBuf,

    /// Print a JSON report instead of text
    #[arg(long)]
    json: bool,

    /// Only print the query answers
    #[arg(long)]
    no_tree: bool,

    /// Fail unless the candidates connect every vertex
    #[arg(long)]
    require_tree: bool,

    /// Fail on the first invalid or duplicate candidate instead of skipping it
    #[arg(long)]
    strict: bool,

    /// More logging on stderr (-v debug, -vv trace). RUST_LOG overrides this.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbose: u8) {
    let log_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| log_level.into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);

    let input = fs::read_to_string(&args.problem).unwrap_or_else(|e| {
        eprintln!("Failed to read {}: {}", args.problem.display(), e);
        std::process::exit(1);
    });

    let problem = match parse(&input) {
        Ok(problem) => problem,
        Err(e) => {
            eprintln!("Parse error: {}", e);
            if let Some(span) = e.error_span() {
                eprintln!();
                render_error_snippet(&input, span);
            }
            std::process::exit(2);
        }
    };
    info!(
        vertices = problem.vertex_count,
        candidates = problem.candidates.len(),
        queries = problem.queries.len(),
        "parsed problem"
    );

    let plan_config = PlanConfig {
        strict_edges: args.strict,
        require_spanning_tree: args.require_tree,
    };
    let output_config = OutputConfig {
        format: if args.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        },
        print_tree: !args.no_tree,
    };

    let result = solve(&problem, &plan_config).and_then(|report| {
        let mut stdout = std::io::stdout().lock();
        write_report(&report, &output_config, &mut stdout)?;
        stdout.flush()?;
        Ok(())
    });
    if let Err(e) = result {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn render_error_snippet(src: &str, span: Span) {
    let Some(ld) = LineDiagnostic::new(src, span) else {
        return;
    };
    let line = &src[ld.line_start..ld.line_end];
    let prefix = src.get(ld.line_start..span.start).unwrap_or("");
    let highlight = src.get(span.start..=span.end).unwrap_or(" ");
    let col = prefix.chars().count();
    let width = highlight.chars().count().max(1);

    eprintln!("{:>4} | {}", ld.line_no, line);
    let underline = "~".repeat(width);
    eprintln!(
        "     | {:space$}\x1b[31m{}\x1b[0m",
        "",
        underline,
        space = col
    );
}
