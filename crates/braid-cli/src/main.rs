//! Braid - ACL policy combiner
//!
//! Usage:
//!   braid -f policy.hujson -d tenants/            # merged document to stdout
//!   braid -f policy.hujson -d tenants/ -o out.hujson
//!   braid -f policy.hujson -d tenants/ --sections groups,acls

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use braid_core::jwcc;
use braid_core::merge::{merge_docs, SectionRegistry};
use braid_core::sources::{collect_children, Document};

#[derive(Parser)]
#[command(name = "braid")]
#[command(about = "Combine JWCC ACL policy fragments into a single document", long_about = None)]
struct Cli {
    /// Parent template document
    #[arg(short = 'f', long)]
    parent: PathBuf,

    /// Directory of child overlay documents (.hujson / .json)
    #[arg(short = 'd', long)]
    children: PathBuf,

    /// Output file; stdout when omitted
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Comma-separated section allow-list; defaults to all known sections
    #[arg(long, value_delimiter = ',')]
    sections: Option<Vec<String>>,

    /// Drop a section from the merged document (repeatable)
    #[arg(long)]
    omit: Vec<String>,

    /// Output syntax
    #[arg(long, value_enum, default_value = "hujson")]
    format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// JWCC with comments preserved
    Hujson,
    /// Plain JSON, comments stripped
    Json,
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "braid=debug,braid_core=debug,info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let registry = SectionRegistry::predefined();
    let active = match &cli.sections {
        Some(allowed) => registry.allowed(allowed)?,
        None => registry,
    };

    let mut parent = Document::load(&cli.parent)?;
    let children = collect_children(&cli.children)?;
    tracing::info!(
        parent = %parent.path,
        children = children.len(),
        "merging policy documents"
    );

    merge_docs(&active, &mut parent, &children)?;

    for section in &cli.omit {
        if parent.root.remove(section).is_some() {
            tracing::debug!(section = %section, "omitted section from output");
        }
    }

    let rendered = match cli.format {
        OutputFormat::Hujson => jwcc::format::to_string(&parent.root),
        OutputFormat::Json => {
            let plain = jwcc::json::to_plain_object(&parent.root);
            let mut text = serde_json::to_string_pretty(&plain)
                .context("Failed to serialize merged document as JSON")?;
            text.push('\n');
            text
        }
    };

    match &cli.output {
        Some(path) => std::fs::write(path, rendered)
            .with_context(|| format!("Failed to write output file: {}", path.display()))?,
        None => print!("{rendered}"),
    }

    Ok(())
}
