use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result, anyhow};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use serde::Serialize;
use tracing::{info, info_span};

use affil_cli::batch::{BatchSummary, run_batch};
use affil_match::{MatchEngine, MatchOptions, RecordFactory, ReferenceIndex, ResolvedMatch};
use affil_model::OutputRecord;
use affil_registry::{RegistrySnapshot, default_registry_path};

use crate::cli::{BatchArgs, Cli, EngineArgs, LookupArgs, MatchArgs, StatsArgs};
use crate::summary::{print_lookup, print_matches, print_records, print_stats};

/// Registry path from `--registry`, falling back to the environment and the bundled data file.
pub fn registry_path(cli: &Cli) -> PathBuf {
    cli.registry.clone().unwrap_or_else(default_registry_path)
}

/// Load the registry and build the match engine for this invocation.
pub fn load_engine(path: &Path, engine: &EngineArgs) -> Result<MatchEngine> {
    let span = info_span!("startup", registry = %path.display());
    let _guard = span.enter();
    let start = Instant::now();

    let options = MatchOptions::default()
        .with_min_name_len(engine.min_name_len)
        .with_acronym_guard(!engine.no_acronym_guard);
    let snapshot = RegistrySnapshot::load(path)
        .with_context(|| format!("load registry {}", path.display()))?;
    let index = ReferenceIndex::build(snapshot, options.min_name_len)
        .context("build reference index")?;
    info!(
        fingerprint = index.fingerprint(),
        duration_ms = start.elapsed().as_millis(),
        "engine ready"
    );
    Ok(MatchEngine::new(Arc::new(index)).with_options(options))
}

#[derive(Serialize)]
struct MatchOutput<'a> {
    affiliation: &'a str,
    records: Vec<OutputRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    matches: Option<Vec<ResolvedMatch>>,
}

pub fn run_match(engine: &MatchEngine, args: &MatchArgs) -> Result<()> {
    let outputs: Vec<MatchOutput<'_>> = args
        .affiliations
        .iter()
        .map(|affiliation| {
            let matches = engine.find_matches(affiliation);
            MatchOutput {
                affiliation,
                records: engine.records(&matches),
                matches: args.explain.then_some(matches),
            }
        })
        .collect();

    if args.json {
        let json = serde_json::to_string_pretty(&outputs).context("serialize results")?;
        println!("{json}");
        return Ok(());
    }
    for output in &outputs {
        print_records(output.affiliation, &output.records);
        if let Some(matches) = &output.matches {
            print_matches(matches);
        }
    }
    Ok(())
}

pub fn run_batch_file(engine: &MatchEngine, args: &BatchArgs) -> Result<BatchSummary> {
    let input = File::open(&args.input)
        .with_context(|| format!("open {}", args.input.display()))?;

    let progress = ProgressBar::with_draw_target(None, ProgressDrawTarget::stderr());
    progress.set_style(
        ProgressStyle::with_template("{spinner} {pos} lines ({elapsed})")
            .context("progress template")?,
    );

    let writer: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("create {}", path.display()))?,
        )),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };
    let summary = run_batch(engine, BufReader::new(input), writer, &progress)?;
    progress.finish_and_clear();

    if let Some(path) = &args.output {
        eprintln!(
            "{} affiliations, {} matched, {} records -> {}",
            summary.affiliations,
            summary.matched,
            summary.records,
            path.display()
        );
    }
    Ok(summary)
}

pub fn run_lookup(engine: &MatchEngine, args: &LookupArgs) -> Result<()> {
    let index = engine.index();
    let institution = index
        .institution_by_id(&args.id)
        .ok_or_else(|| anyhow!("unknown registry id: {}", args.id))?;
    let record = RecordFactory::new(index.names()).build(institution);
    if args.json {
        let json = serde_json::to_string_pretty(&record).context("serialize record")?;
        println!("{json}");
    } else {
        print_lookup(&record);
    }
    Ok(())
}

#[derive(Serialize)]
struct StatsOutput<'a> {
    source: &'a Path,
    stats: affil_match::IndexStats,
    load: &'a affil_registry::LoadReport,
}

pub fn run_stats(engine: &MatchEngine, registry: &Path, args: &StatsArgs) -> Result<()> {
    let index = engine.index();
    let stats = index.stats();
    if args.json {
        let output = StatsOutput {
            source: registry,
            stats,
            load: index.load_report(),
        };
        let json = serde_json::to_string_pretty(&output).context("serialize stats")?;
        println!("{json}");
    } else {
        println!("Registry: {}", registry.display());
        print_stats(&stats, index.load_report());
    }
    Ok(())
}
