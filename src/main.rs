//! ApkScope CLI - dependency graph visualization from the command line.

use std::collections::BTreeSet;
use std::fmt::Write as _;
use std::path::Path;
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use apkscope::export::{export_to_string, ExportData};
use apkscope::fetch;
use apkscope::graph::{build_reverse_index, traverse, IndexGraph, TraversalConfig, TraversalResult};
use apkscope::parser::{apkindex, local, PackageIndex};
use apkscope::render::TreeRenderer;

/// Which way to follow dependency edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Direction {
    /// Follow "depends on" edges outward from the package
    Forward,
    /// Follow "is depended on by" edges outward from the package
    Reverse,
}

impl Direction {
    fn label(self) -> &'static str {
        match self {
            Direction::Forward => "forward",
            Direction::Reverse => "reverse",
        }
    }

    fn relation(self) -> &'static str {
        match self {
            Direction::Forward => "dependencies",
            Direction::Reverse => "dependents",
        }
    }
}

#[derive(Parser)]
#[command(name = "apkscope")]
#[command(version)]
#[command(about = "Dependency graph visualizer for Alpine APK package repositories", long_about = None)]
struct Cli {
    /// Package to analyze
    #[arg(long)]
    package: String,

    /// Repository URL, or path to a local index file
    #[arg(long)]
    repo: String,

    /// Treat the repository as a local test index in `name -> deps` format
    #[arg(long)]
    test_mode: bool,

    /// Render the graph as an ASCII tree
    #[arg(long)]
    ascii: bool,

    /// Maximum traversal depth
    #[arg(long, default_value_t = 5, value_parser = clap::value_parser!(u32).range(1..))]
    max_depth: u32,

    /// Exclude packages whose name contains this substring
    #[arg(long, default_value = "")]
    filter: String,

    /// Traversal direction
    #[arg(long, value_enum, default_value_t = Direction::Forward)]
    direction: Direction,

    /// Emit the traversal result as JSON instead of text
    #[arg(long, conflicts_with = "ascii")]
    json: bool,

    /// Audit the whole index for dependency cycles and exit
    #[arg(long)]
    cycles: bool,

    /// Verbose output (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(mut cli: Cli) -> Result<()> {
    let is_url = cli.repo.starts_with("http://") || cli.repo.starts_with("https://");
    if cli.test_mode && is_url {
        bail!("--test-mode requires a local index file path, got '{}'", cli.repo);
    }
    let local_source = cli.test_mode || is_local_path(&cli.repo);
    if !local_source && !is_url {
        bail!(
            "repository '{}' must be an http(s) URL or a local file path",
            cli.repo
        );
    }

    if !cli.filter.is_empty() && cli.filter.chars().count() < 2 {
        eprintln!(
            "warning: filter '{}' is shorter than 2 characters and will be ignored",
            cli.filter
        );
        cli.filter.clear();
    }

    let index = load_index(&cli.repo, local_source)?;
    tracing::info!(packages = index.len(), edges = index.edge_count(), "index loaded");

    if cli.cycles {
        return audit_cycles(&index);
    }

    let max_depth = cli.max_depth as usize;
    let config = TraversalConfig::new(max_depth).with_filter(cli.filter.clone());

    let result = match cli.direction {
        Direction::Forward => {
            if !index.contains(&cli.package) {
                bail!("package '{}' not found in index", cli.package);
            }
            traverse(&index, &cli.package, &config)
        }
        Direction::Reverse => {
            let reverse = build_reverse_index(&index);
            if !reverse.contains(&cli.package) && !cli.json {
                // Not an error: the package simply has no dependents
                println!("Nothing depends on '{}'", cli.package);
            }
            traverse(&reverse, &cli.package, &config)
        }
    };

    let report = render_report(
        &cli.package,
        cli.direction,
        max_depth,
        cli.ascii,
        cli.json,
        &result,
    )?;
    print!("{report}");

    Ok(())
}

/// Assembles the stdout report for a traversal result.
///
/// In JSON mode the report is exactly one JSON document; the cycle list
/// travels inside it rather than as separate lines, so the output stays
/// machine-parseable.
fn render_report(
    package: &str,
    direction: Direction,
    max_depth: usize,
    ascii: bool,
    json: bool,
    result: &TraversalResult,
) -> Result<String> {
    if json {
        let data = ExportData::new(package, direction.label(), max_depth, result);
        return Ok(export_to_string(&data)?);
    }

    let mut out = String::new();

    // Deduplicate via set semantics; BTreeSet also sorts the output
    let cycles: BTreeSet<String> = result.cycles.iter().map(|c| c.path()).collect();
    for cycle in &cycles {
        writeln!(out, "Cycle: {cycle}")?;
    }

    if ascii {
        let renderer =
            TreeRenderer::new(max_depth).with_empty_label(format!("no {}", direction.relation()));
        out.push_str(&renderer.render(&result.graph, package));
    } else {
        writeln!(
            out,
            "Dependency graph built: {} packages, {} cycles",
            result.graph.len(),
            cycles.len()
        )?;
        let mut direct: Vec<&str> = result
            .graph
            .get(package)
            .map(|deps| deps.iter().map(String::as_str).collect())
            .unwrap_or_default();
        direct.sort_unstable();
        if direct.is_empty() {
            writeln!(out, "Direct {}: none", direction.relation())?;
        } else {
            writeln!(
                out,
                "Direct {} ({}): {}",
                direction.relation(),
                direct.len(),
                direct.join(", ")
            )?;
        }
    }

    Ok(out)
}

/// Loads the index from a local test file or a remote repository.
fn load_index(repo: &str, local_source: bool) -> Result<PackageIndex> {
    if local_source {
        let index = local::parse_file(Path::new(repo))
            .with_context(|| format!("cannot load local index '{repo}'"))?;
        Ok(index)
    } else {
        let bytes = fetch::fetch_remote_index(repo)
            .with_context(|| format!("cannot load remote index from '{repo}'"))?;
        Ok(apkindex::parse_bytes(&bytes))
    }
}

/// Audits the entire index for dependency cycles.
fn audit_cycles(index: &PackageIndex) -> Result<()> {
    let graph = IndexGraph::from_index(index);
    let cycles = graph.detect_cycles();

    if cycles.is_empty() {
        println!(
            "No dependency cycles in index ({} packages, {} edges)",
            graph.node_count(),
            graph.edge_count()
        );
        return Ok(());
    }

    println!("{} dependency cycle(s) found:", cycles.len());
    for cycle in &cycles {
        let mut path = cycle.join(" -> ");
        if let Some(first) = cycle.first() {
            path.push_str(" -> ");
            path.push_str(first);
        }
        println!("Cycle: {path}");
    }
    Ok(())
}

fn is_local_path(repo: &str) -> bool {
    repo.starts_with('/') || repo.starts_with("./") || repo.starts_with("../")
}
