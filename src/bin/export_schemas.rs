//! Prints JSON Schemas for the stored comparison blobs.
//!
//! ```text
//! export_schemas                   # all schemas to stdout
//! export_schemas --only scores     # one schema
//! export_schemas --out-dir schemas # one file per schema
//! ```

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use procure_compare::config::AppConfig;
use procure_compare::domain::value_objects::{
    ItemComparison, PriceDifference, QuoteScore, ScoringCriteria,
};
use procure_compare::telemetry::init_tracing;
use schemars::schema::RootSchema;
use schemars::schema_for;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "export_schemas")]
#[command(about = "Export JSON Schemas for persisted comparison data")]
struct Cli {
    /// Export a single blob type
    #[arg(short, long, value_enum)]
    only: Option<Blob>,
    /// Write `<name>.schema.json` files here instead of stdout
    #[arg(short = 'd', long)]
    out_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Blob {
    ScoringCriteria,
    Scores,
    PriceDifferences,
    ItemComparisons,
}

impl Blob {
    const ALL: [Blob; 4] = [
        Blob::ScoringCriteria,
        Blob::Scores,
        Blob::PriceDifferences,
        Blob::ItemComparisons,
    ];

    fn name(self) -> &'static str {
        match self {
            Blob::ScoringCriteria => "scoring_criteria",
            Blob::Scores => "scores",
            Blob::PriceDifferences => "price_differences",
            Blob::ItemComparisons => "item_comparisons",
        }
    }

    fn schema(self) -> RootSchema {
        match self {
            Blob::ScoringCriteria => schema_for!(ScoringCriteria),
            Blob::Scores => schema_for!(Vec<QuoteScore>),
            Blob::PriceDifferences => schema_for!(Vec<PriceDifference>),
            Blob::ItemComparisons => schema_for!(Vec<ItemComparison>),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load().context("loading configuration")?;
    init_tracing(&config.log)?;

    let blobs: Vec<Blob> = match cli.only {
        Some(blob) => vec![blob],
        None => Blob::ALL.to_vec(),
    };

    match cli.out_dir {
        Some(dir) => {
            std::fs::create_dir_all(&dir)
                .with_context(|| format!("creating {}", dir.display()))?;
            for blob in blobs {
                let path = dir.join(format!("{}.schema.json", blob.name()));
                let json = serde_json::to_string_pretty(&blob.schema())?;
                std::fs::write(&path, json)
                    .with_context(|| format!("writing {}", path.display()))?;
                info!(path = %path.display(), "schema written");
            }
        }
        None => {
            let mut all = serde_json::Map::new();
            for blob in blobs {
                all.insert(blob.name().to_string(), serde_json::to_value(blob.schema())?);
            }
            println!("{}", serde_json::to_string_pretty(&all)?);
        }
    }

    Ok(())
}
