use anyhow::{Context, bail};
use clap::ArgMatches;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use linkmap_core::{
    CentralityMeasure, CommunityAlgorithm, Edge, FigureOptions, community_figure, edgelist,
    top_nodes,
};
use linkmap_search::SearchClient;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Environment variable naming the raw-data directory, used when
/// --data-dir is not given.
pub const DATA_DIR_ENV: &str = "DIR_DATA_RAW";

/// Resolve the raw-data directory from the flag or the environment,
/// expanding a leading tilde.
pub fn resolve_data_dir(flag: Option<&PathBuf>) -> anyhow::Result<PathBuf> {
    let raw = match flag {
        Some(path) => path.display().to_string(),
        None => match env::var(DATA_DIR_ENV) {
            Ok(value) => value,
            Err(_) => bail!(
                "no data directory: pass --data-dir or set {}",
                DATA_DIR_ENV
            ),
        },
    };
    let expanded = shellexpand::tilde(&raw);
    Ok(PathBuf::from(expanded.as_ref()))
}

/// Load the edge list dataset, with a spinner while the CSV streams in.
pub fn load_dataset(data_dir: &Path) -> anyhow::Result<Vec<Edge>> {
    let path = edgelist::dataset_path(data_dir);
    let spinner = progress_spinner();
    spinner.set_message(format!("Loading {}", path.display()));

    let edges = edgelist::load_edges(&path)
        .with_context(|| format!("failed to load edge list from {}", path.display()))?;

    spinner.finish_and_clear();
    debug!(edges = edges.len(), "loaded edge list");
    Ok(edges)
}

fn progress_spinner() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap(),
    );
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

pub fn handle_graph(args: &ArgMatches) -> anyhow::Result<()> {
    let options = FigureOptions {
        search_term: args.get_one::<String>("search-term").unwrap().clone(),
        algorithm: args
            .get_one::<String>("algorithm")
            .unwrap()
            .parse::<CommunityAlgorithm>()?,
        community_filter: *args.get_one::<i64>("community").unwrap(),
        display_centrality: args.get_flag("display-centrality"),
        seed: *args.get_one::<u64>("seed").unwrap(),
        ..FigureOptions::default()
    };
    let output = args.get_one::<PathBuf>("output").unwrap();
    let data_dir = resolve_data_dir(args.get_one::<PathBuf>("data-dir"))?;

    let edges = load_dataset(&data_dir)?;
    let result = community_figure(&edges, &options)?;

    println!(
        "{} {} pages, {} links, {} communities ({})",
        "✓".green().bold(),
        result.vertex_count,
        result.edge_count,
        result.community_count,
        options.algorithm
    );

    let html = result.figure.to_html()?;
    fs::write(output, html)
        .with_context(|| format!("failed to write figure to {}", output.display()))?;
    println!(
        "{} Figure written to {}",
        "✓".green().bold(),
        output.display().to_string().bright_white()
    );
    Ok(())
}

pub fn handle_top(args: &ArgMatches) -> anyhow::Result<()> {
    let term = args.get_one::<String>("search-term").unwrap();
    let measure = args
        .get_one::<String>("measure")
        .unwrap()
        .parse::<CentralityMeasure>()?;
    let count = *args.get_one::<usize>("count").unwrap();
    let data_dir = resolve_data_dir(args.get_one::<PathBuf>("data-dir"))?;

    let edges = load_dataset(&data_dir)?;
    let ranked = top_nodes(&edges, term, measure, count)?;

    println!(
        "{} Top {} pages matching '{}' by {}",
        "✓".green().bold(),
        ranked.len(),
        term.bright_white(),
        measure
    );
    for (position, row) in ranked.iter().enumerate() {
        println!(
            "  {:>3}. {:>12.6}  {}",
            position + 1,
            row.score,
            row.url.bright_white()
        );
    }
    Ok(())
}

pub async fn handle_search(args: &ArgMatches) -> anyhow::Result<()> {
    let term = args.get_one::<String>("TERM").unwrap();
    let count = *args.get_one::<usize>("count").unwrap();

    let spinner = progress_spinner();
    spinner.set_message(format!("Searching GOV.UK for '{}'", term));
    let hits = SearchClient::new().search(term, count).await;
    spinner.finish_and_clear();
    let hits = hits?;

    if hits.is_empty() {
        println!("No results for '{}'", term);
        return Ok(());
    }
    println!(
        "{} {} results for '{}'",
        "✓".green().bold(),
        hits.len(),
        term.bright_white()
    );
    for hit in &hits {
        println!("  {:>10.3}  {}", hit.score, hit.url.bright_white());
    }
    Ok(())
}
