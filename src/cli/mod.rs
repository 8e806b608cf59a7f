//! Command-line interface for longbox.
//!
//! With no subcommand the data-quality validator runs, which is the batch
//! entry point used in CI. The other commands expose the core functions over
//! the snapshot in the data directory.

use std::collections::HashSet;
use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::config::{self, ResolvedConfig};
use crate::core::{
    collection_reading_order, compute_owned_issues, connected_sources, era_coverage, overlap_for,
    recommend_with_limit, sequence_with_report, suggested_comparisons,
};
use crate::domain::{shelved_slugs, RelationType};
use crate::issues::{parse_issues, ParsedIssueCache};
use crate::library::Snapshot;
use crate::validate::validate;

/// longbox - comic collection continuity and data-quality tools
#[derive(Parser, Debug)]
#[command(name = "longbox")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory holding the snapshot JSON files (overrides config)
    #[arg(long, global = true, env = "LONGBOX_DATA")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate event -> edition mappings (default command)
    Validate,

    /// Parse an issues-collected description
    Parse {
        /// Free text, e.g. "Silver Surfer #34-38, 40, 44-60"
        text: String,
    },

    /// Find catalog items by title, slug or issue text
    Search {
        /// Case-insensitive text to look for
        query: Option<String>,

        /// Only items from this era slug
        #[arg(long)]
        era: Option<String>,
    },

    /// Show how much of an item the collection already holds
    Overlap {
        /// Catalog item slug
        slug: String,
    },

    /// Order catalog items along their relationships
    Order {
        /// Catalog item slugs, in tie-break order
        #[arg(required = true)]
        slugs: Vec<String>,

        /// Follow every relationship type instead of saga order only
        #[arg(long)]
        all_types: bool,
    },

    /// Reading order for the whole collection
    Plan,

    /// Recommend what to read next
    Recommend {
        /// Maximum number of recommendations
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Per-era collection coverage
    Coverage,

    /// Catalog items that collect many of the same issues
    Compare,

    /// Show resolved configuration (debug)
    Config,
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(self) -> Result<()> {
        let config = config::config()?;
        let data_dir = self.data_dir.unwrap_or_else(|| config.data_dir.clone());

        match self.command.unwrap_or(Commands::Validate) {
            Commands::Validate => run_validate(&data_dir, config).await,
            Commands::Parse { text } => show_parse(&text),
            Commands::Search { query, era } => {
                show_search(&data_dir, query.as_deref(), era.as_deref()).await
            }
            Commands::Overlap { slug } => show_overlap(&data_dir, &slug).await,
            Commands::Order { slugs, all_types } => show_order(&data_dir, &slugs, all_types).await,
            Commands::Plan => show_plan(&data_dir).await,
            Commands::Recommend { limit } => {
                show_recommendations(&data_dir, limit.unwrap_or(config.recommend_limit)).await
            }
            Commands::Coverage => show_coverage(&data_dir).await,
            Commands::Compare => show_comparisons(&data_dir).await,
            Commands::Config => show_config(config, &data_dir),
        }
    }
}

/// Run the validator, print the report, exit 1 on errors
async fn run_validate(data_dir: &std::path::Path, config: &ResolvedConfig) -> Result<()> {
    let snapshot = Snapshot::load_all(data_dir).await?;
    let report = validate(snapshot.validation_input(), &config.validator);

    report.render(&mut io::stdout().lock())?;

    if report.has_errors() {
        std::process::exit(report.exit_code());
    }
    Ok(())
}

fn show_parse(text: &str) -> Result<()> {
    let parsed = parse_issues(text);

    if parsed.is_empty() {
        println!("No series or issues recognized (insufficient data)");
    }
    for (series, numbers) in &parsed.numbers {
        let listed: Vec<String> = numbers.iter().map(u32::to_string).collect();
        println!("{}: {}", series, listed.join(","));
    }
    for series in &parsed.bare_series {
        println!("{}: (one-shot)", series);
    }
    for segment in &parsed.unattributed {
        println!("unattributed: {}", segment);
    }

    Ok(())
}

async fn show_search(
    data_dir: &std::path::Path,
    query: Option<&str>,
    era: Option<&str>,
) -> Result<()> {
    let snapshot = Snapshot::load_catalog(data_dir).await?;

    let mut matches = match query {
        Some(query) => snapshot.catalog.search(query),
        None => snapshot.catalog.items().iter().collect(),
    };
    if let Some(era) = era {
        let in_era: HashSet<&str> = snapshot
            .catalog
            .filter_by_era(era)
            .into_iter()
            .map(|item| item.slug.as_str())
            .collect();
        matches.retain(|item| in_era.contains(item.slug.as_str()));
    }

    if matches.is_empty() {
        println!("No matching items");
        return Ok(());
    }

    let cache = ParsedIssueCache::from_catalog(snapshot.catalog.items());
    let owned_issues = compute_owned_issues(&snapshot.ownership, &cache);
    let shelved = shelved_slugs(&snapshot.ownership);

    println!("{:<30} {:<50} {}", "SLUG", "TITLE", "OVERLAP");
    println!("{}", "-".repeat(95));
    for item in matches {
        let overlap = overlap_for(item, &cache, &owned_issues, &shelved);
        println!("{:<30} {:<50} {}", item.slug, item.title, overlap);
    }
    Ok(())
}

async fn show_overlap(data_dir: &std::path::Path, slug: &str) -> Result<()> {
    let snapshot = Snapshot::load_catalog(data_dir).await?;
    let item = match snapshot.catalog.get(slug) {
        Ok(item) => item,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    let cache = ParsedIssueCache::from_catalog(snapshot.catalog.items());
    let owned_issues = compute_owned_issues(&snapshot.ownership, &cache);
    let shelved = shelved_slugs(&snapshot.ownership);

    println!("{}: {}", item.title, overlap_for(item, &cache, &owned_issues, &shelved));
    Ok(())
}

async fn show_order(data_dir: &std::path::Path, slugs: &[String], all_types: bool) -> Result<()> {
    let snapshot = Snapshot::load_catalog(data_dir).await?;

    let unknown: Vec<&String> = slugs
        .iter()
        .filter(|slug| snapshot.catalog.get(slug).is_err())
        .collect();
    if !unknown.is_empty() {
        for slug in unknown {
            eprintln!("catalog item not found: {}", slug);
        }
        std::process::exit(1);
    }

    let allowed: &[RelationType] = if all_types {
        &RelationType::ALL
    } else {
        &RelationType::SAGA
    };
    let sequence = sequence_with_report(slugs, &snapshot.relationships, allowed);

    for (pos, slug) in sequence.order.iter().enumerate() {
        let marker = if sequence.appended.contains(slug) { " (cycle)" } else { "" };
        let title = snapshot.catalog.get(slug).map(|i| i.title.as_str()).unwrap_or(slug);
        println!("{:>3}. {}{}", pos + 1, title, marker);
    }

    Ok(())
}

async fn show_plan(data_dir: &std::path::Path) -> Result<()> {
    let snapshot = Snapshot::load_catalog(data_dir).await?;
    let order = collection_reading_order(
        &snapshot.ownership,
        snapshot.catalog.items(),
        &snapshot.eras,
        &snapshot.relationships,
    );

    if order.is_empty() {
        println!("Collection is empty");
        return Ok(());
    }

    for (pos, slug) in order.iter().enumerate() {
        match snapshot.catalog.get(slug) {
            Ok(item) => println!("{:>3}. {}", pos + 1, item.title),
            Err(e) => println!("{:>3}. {} ({})", pos + 1, slug, e),
        }
    }
    Ok(())
}

async fn show_recommendations(data_dir: &std::path::Path, limit: usize) -> Result<()> {
    let snapshot = Snapshot::load_catalog(data_dir).await?;
    let cache = ParsedIssueCache::from_catalog(snapshot.catalog.items());

    let recommendations = recommend_with_limit(
        &snapshot.ownership,
        snapshot.catalog.items(),
        &snapshot.relationships,
        &cache,
        limit,
    );

    if recommendations.is_empty() {
        println!("No recommendations (add items to your collection first)");
        return Ok(());
    }

    println!("{:<6} {:<50} {}", "SCORE", "TITLE", "REASONS");
    println!("{}", "-".repeat(90));
    for rec in &recommendations {
        println!("{:<6} {:<50} {}", rec.score, rec.item.title, rec.reasons.join("; "));
        let sources = connected_sources(rec, &snapshot.ownership, &snapshot.relationships);
        if !sources.is_empty() {
            let listed: Vec<&str> = sources.into_iter().collect();
            println!("{:<6} from: {}", "", listed.join(", "));
        }
    }
    Ok(())
}

async fn show_coverage(data_dir: &std::path::Path) -> Result<()> {
    let snapshot = Snapshot::load_catalog(data_dir).await?;
    let coverage = era_coverage(&snapshot.eras, snapshot.catalog.items(), &snapshot.ownership);

    println!("{:<30} {:>10} {:>6} {:>10}", "ERA", "OWNED", "PCT", "ESSENTIAL");
    println!("{}", "-".repeat(60));
    for era in coverage {
        println!(
            "{:<30} {:>10} {:>5}% {:>9}%",
            era.era_name,
            format!("{}/{}", era.owned, era.total),
            era.pct,
            era.essential_pct
        );
    }
    Ok(())
}

async fn show_comparisons(data_dir: &std::path::Path) -> Result<()> {
    let snapshot = Snapshot::load_catalog(data_dir).await?;
    let cache = ParsedIssueCache::from_catalog(snapshot.catalog.items());

    let comparisons = suggested_comparisons(snapshot.catalog.items(), &cache);
    if comparisons.is_empty() {
        println!("No overlapping items found");
    }
    for c in comparisons {
        println!("{} vs {}: {}", c.title_a, c.title_b, c.reason);
    }
    Ok(())
}

fn show_config(config: &ResolvedConfig, data_dir: &std::path::Path) -> Result<()> {
    let config_file = config
        .config_file
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "(none)".to_string());

    println!("Config file: {}", config_file);
    println!("Data: {}", data_dir.display());
    println!("Max era distance: {}", config.validator.max_era_distance);
    println!("Recommendation limit: {}", config.recommend_limit);
    Ok(())
}
