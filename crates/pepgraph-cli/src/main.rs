//! pepgraph CLI
//!
//! - `convert`: PEP feed → `schema.{ttl,nt}` + `data.{ttl,nt}`
//! - `summary`: read a serialized instance graph back and print the
//!   status/supersession/dependency/author views

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use pepgraph_rdf::serialize::serialize;
use pepgraph_rdf::{load, query, Namespaces, PepGraphs, RdfFormat};
use tracing_subscriber::EnvFilter;

mod config;
mod feed;

use config::{ConvertConfig, OutputFormat, DEFAULT_FEED_URL, DEFAULT_OUT_DIR};
use feed::FeedSource;

#[derive(Parser)]
#[command(name = "pepgraph")]
#[command(author, version, about = "Python Enhancement Proposals as an RDF knowledge graph")]
struct Cli {
    /// Debug-level logging (overrides RUST_LOG).
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert the PEP feed into a schema graph and an instance graph.
    Convert(ConvertArgs),

    /// Summarize a serialized instance graph.
    Summary(SummaryArgs),
}

#[derive(Args)]
struct NamespaceArgs {
    /// TOML config file
    #[arg(long)]
    config: Option<PathBuf>,
    /// Schema namespace (must end in '/' or '#')
    #[arg(long)]
    schema_ns: Option<String>,
    /// Instance namespace (must end in '/' or '#')
    #[arg(long)]
    instance_ns: Option<String>,
}

impl NamespaceArgs {
    fn resolve(&self) -> Result<(ConvertConfig, Namespaces)> {
        let config = ConvertConfig::load(self.config.as_deref())?;
        let ns = config.namespaces_with(self.schema_ns.as_deref(), self.instance_ns.as_deref())?;
        Ok((config, ns))
    }
}

#[derive(Args)]
struct ConvertArgs {
    /// Local peps.json
    #[arg(short, long, conflicts_with = "url")]
    input: Option<PathBuf>,
    /// Download the feed (needs the `fetch` feature)
    #[arg(long, num_args = 0..=1, default_missing_value = DEFAULT_FEED_URL)]
    url: Option<String>,
    /// Output directory [default: generated]
    #[arg(short, long)]
    out_dir: Option<PathBuf>,
    /// Output serialization [default: turtle]
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,
    #[command(flatten)]
    ns: NamespaceArgs,
}

#[derive(Args)]
struct SummaryArgs {
    /// Serialized instance graph (.ttl or .nt)
    #[arg(short, long)]
    data: PathBuf,
    /// List this author's PEPs, oldest first
    #[arg(long)]
    author: Option<String>,
    /// List every PEP written by the authors of this PEP
    #[arg(long)]
    pep: Option<u32>,
    #[command(flatten)]
    ns: NamespaceArgs,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Convert(args) => cmd_convert(&args),
        Commands::Summary(args) => cmd_summary(&args),
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Flag, then config file; a URL beats a local file at the same level.
fn feed_source(args: &ConvertArgs, config: &ConvertConfig) -> Result<FeedSource> {
    if let Some(url) = &args.url {
        return Ok(FeedSource::Url(url.clone()));
    }
    if let Some(input) = &args.input {
        return Ok(FeedSource::File(input.clone()));
    }
    if let Some(url) = &config.feed_url {
        return Ok(FeedSource::Url(url.clone()));
    }
    if let Some(input) = &config.input {
        return Ok(FeedSource::File(input.clone()));
    }
    Err(anyhow!("no PEP feed given: pass --input <peps.json> or --url"))
}

fn cmd_convert(args: &ConvertArgs) -> Result<()> {
    let (config, ns) = args.ns.resolve()?;
    let source = feed_source(args, &config)?;
    let out_dir = args
        .out_dir
        .clone()
        .or_else(|| config.out_dir.clone())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUT_DIR));
    let format: RdfFormat = args.format.or(config.format).unwrap_or_default().into();

    println!("{} PEP feed {}", "Converting".green().bold(), source);
    let feed = feed::load_feed(&source)?;
    let graphs = pepgraph_rdf::convert_with(&feed, &ns)
        .with_context(|| format!("failed to convert {source}"))?;

    for (path, triples) in write_graphs(&graphs, &ns, format, &out_dir)? {
        println!("  {} {} ({} triples)", "→".cyan(), path.display(), triples);
    }
    println!("  {} {} PEPs", "→".yellow(), feed.len());
    Ok(())
}

/// Write `schema.<ext>` and `data.<ext>` under `out_dir`, creating it.
fn write_graphs(
    graphs: &PepGraphs,
    ns: &Namespaces,
    format: RdfFormat,
    out_dir: &Path,
) -> Result<Vec<(PathBuf, usize)>> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("failed to create {}", out_dir.display()))?;

    let mut written = Vec::new();
    for (stem, graph) in [("schema", &graphs.schema), ("data", &graphs.instances)] {
        let path = out_dir.join(format!("{stem}.{}", format.extension()));
        fs::write(&path, serialize(graph, format, ns))
            .with_context(|| format!("failed to write {}", path.display()))?;
        written.push((path, graph.len()));
    }
    Ok(written)
}

fn cmd_summary(args: &SummaryArgs) -> Result<()> {
    let (_, ns) = args.ns.resolve()?;
    println!("{} {}", "Summarizing".green().bold(), args.data.display());

    let graph = load::graph_from_file(&args.data)
        .with_context(|| format!("failed to load {}", args.data.display()))?;

    println!("{}", "PEP status distribution".bold());
    let distribution = query::status_distribution(&graph, &ns);
    let total: usize = distribution.values().sum();
    for (status, count) in &distribution {
        println!("  {:<12} {:>4}", status, count);
    }
    println!("  {:<12} {:>4}", "total".dimmed(), total);

    let supersessions = query::supersessions(&graph, &ns);
    let dependencies = query::dependencies(&graph, &ns);
    println!(
        "  {} {} supersessions, {} dependencies",
        "→".yellow(),
        supersessions.len(),
        dependencies.len()
    );

    if let Some(author) = &args.author {
        let peps = query::peps_by_author(&graph, &ns, author);
        println!("{} ({} PEPs)", author.bold(), peps.len());
        for pep in &peps {
            print_summary_line(pep);
        }
    }

    if let Some(number) = args.pep {
        let contributions = query::author_contributions(&graph, &ns, number);
        if contributions.is_empty() {
            println!("  {} PEP {} has no recorded authors", "→".yellow(), number);
        }
        for (author, peps) in &contributions {
            println!("{} ({} PEPs)", author.bold(), peps.len());
            for pep in peps {
                print_summary_line(pep);
            }
        }
    }

    Ok(())
}

fn print_summary_line(pep: &query::PepSummary) {
    let created = pep
        .created
        .map(|d| d.to_string())
        .unwrap_or_else(|| "----------".to_string());
    println!(
        "  {} PEP {:>4} [{}] {}",
        created.dimmed(),
        pep.number,
        pep.status.cyan(),
        pep.title
    );
}
