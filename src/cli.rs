// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Command line front end.

use anyhow::{Context, Result};
use clap::Parser;
use mcs_pof::input::{self, MultiplicityFormat};
use mcs_pof::report::{self, format_general};
use mcs_pof::scoring::{check_probability, Weighting};
use mcs_pof::{McsCollection, Scorer, SearchConfig, SearchContext, SearchEngine};
use std::path::PathBuf;
use tracing::{debug, warn};

fn parse_probability(s: &str) -> Result<f64, String> {
    let p: f64 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;
    check_probability(p).map_err(|e| e.to_string())
}

fn parse_lambda(s: &str) -> Result<f64, String> {
    let lambda: f64 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;
    if lambda.is_finite() && lambda > 0.0 {
        Ok(lambda)
    } else {
        Err("lambda must be positive".to_string())
    }
}

fn parse_threads(s: &str) -> Result<usize, String> {
    let n: usize = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;
    if n == 0 {
        Err("threads must be at least 1".to_string())
    } else {
        Ok(n)
    }
}

/// Calculate the probability of failure (PoF) of a metabolic network from its
/// low-cardinality minimal cut sets.
///
/// MCSs of a compressed network give the PoF of the original uncompressed one
/// when the compression file is provided.
#[derive(Parser, Debug)]
#[command(name = "pof", version)]
pub struct Cli {
    /// File with binary-encoded MCSs, one per line (e.g. '100010100...'),
    /// sorted by ascending cardinality
    #[arg(short = 'm', long = "mcs")]
    pub mcs: PathBuf,

    /// File with the number of linearly compressed reactions per column of the
    /// MCS file (e.g. '1 1 3 1 2...'). Without it the network is uncompressed
    #[arg(short = 'c', long = "compr")]
    pub compression: Option<PathBuf>,

    /// Read the compression file as reaction names joined by this delimiter
    /// (e.g. 'R1%R2 R3') instead of counts
    #[arg(long, requires = "compression")]
    pub delimiter: Option<char>,

    /// Number of reactions in the uncompressed network
    /// [default: sum of the compression multiplicities]
    #[arg(short = 'r', long = "rxns")]
    pub reactions: Option<usize>,

    /// Maximum cardinality up to which the PoF is calculated (0 = all reactions)
    #[arg(short = 'd', long = "d-max", default_value_t = 0)]
    pub max_cardinality: usize,

    /// Number of worker threads
    #[arg(short = 't', long, default_value_t = 1, value_parser = parse_threads)]
    pub threads: usize,

    /// Failure probability of a single reaction, in [0, 1)
    #[arg(short = 'p', long = "prob", default_value_t = 1e-3, value_parser = parse_probability)]
    pub probability: f64,

    /// Weight F(d) by a Poisson distribution with this mean instead of by the
    /// binomial distribution of independent failures
    #[arg(short = 'l', long, value_parser = parse_lambda)]
    pub lambda: Option<f64>,

    /// Recompute compressed expansions instead of memoizing them
    #[arg(short = 'n', long = "no-cache")]
    pub no_cache: bool,

    /// Do not draw the per-seed progress bar
    #[arg(long)]
    pub no_progress: bool,

    /// Print the non-zero cells of the contribution table
    #[arg(long)]
    pub print_table: bool,

    /// Print the PoF polynomial in p
    #[arg(long)]
    pub polynomial: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info", value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: String,
}

impl Cli {
    fn config(&self) -> SearchConfig {
        SearchConfig::new()
            .with_max_cardinality(self.max_cardinality)
            .with_threads(self.threads)
            .with_cache(!self.no_cache)
            .with_universe_size(self.reactions)
    }

    fn weighting(&self) -> Weighting {
        match self.lambda {
            Some(lambda) => Weighting::Poisson { lambda },
            None => Weighting::Binomial {
                p: self.probability,
            },
        }
    }
}

/// Build the context described by `cli`.
fn prepare(cli: &Cli) -> Result<SearchContext> {
    let sets = input::read_mcs_file(&cli.mcs)
        .with_context(|| format!("Failed to read MCS file {}", cli.mcs.display()))?;
    let collection = McsCollection::new(sets).context("Invalid MCS collection")?;
    let config = cli.config();

    let Some(path) = &cli.compression else {
        if cli.reactions.is_some() {
            warn!("--rxns only applies to compressed networks; ignoring it");
        }
        return Ok(SearchContext::new(collection, &config));
    };
    let format = match cli.delimiter {
        Some(delimiter) => MultiplicityFormat::Names { delimiter },
        None => MultiplicityFormat::Counts,
    };
    let multiplicities = input::read_multiplicity_file(path, format)
        .with_context(|| format!("Failed to read compression file {}", path.display()))?;
    SearchContext::compressed(collection, &multiplicities, &config)
        .context("Compression does not match the MCS file")
}

/// Run the search and render the report.
pub fn render(cli: &Cli) -> Result<String> {
    let ctx = prepare(cli)?;
    SearchEngine::new(ctx.threads)?
        .with_progress(!cli.no_progress)
        .search(&ctx);
    for (name, value) in ctx.statistics.snapshot() {
        debug!("{}: {}", name, value);
    }

    let scorer = Scorer::new(&ctx.table);
    let mut out = String::new();
    if cli.print_table {
        out.push_str(&report::contribution_table(&ctx.table).to_string());
        out.push('\n');
    }
    out.push_str(&format!("Weighting: {}\n", cli.weighting()));
    out.push_str(&report::score_table(&scorer.rows(cli.weighting())).to_string());

    let (estimate, polynomial) = scorer.extrapolate(cli.probability);
    out.push_str(&format!(
        "\nPoF at p = {}: {}\n",
        cli.probability,
        format_general(estimate, 10)
    ));
    if cli.polynomial {
        out.push_str(&format!("PoF(p) = {}\n", polynomial));
    }
    Ok(out)
}

pub fn run(cli: Cli) -> Result<()> {
    print!("{}", render(&cli)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::io::Write;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["pof", "-m", "mcs.txt"]).unwrap();
        assert_eq!(cli.max_cardinality, 0);
        assert_eq!(cli.threads, 1);
        assert_eq!(cli.probability, 1e-3);
        assert!(cli.lambda.is_none());
        assert!(!cli.no_cache);
        assert!(!cli.no_progress);
        assert_eq!(cli.weighting(), Weighting::Binomial { p: 1e-3 });
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(Cli::try_parse_from(["pof"]).is_err());
        assert!(Cli::try_parse_from(["pof", "-m", "x", "-p", "1"]).is_err());
        assert!(Cli::try_parse_from(["pof", "-m", "x", "-t", "0"]).is_err());
        assert!(Cli::try_parse_from(["pof", "-m", "x", "-l", "-2"]).is_err());
        assert!(Cli::try_parse_from(["pof", "-m", "x", "--delimiter", "%"]).is_err());
    }

    #[test]
    fn test_render_singletons() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "10000\n01000\n00100").unwrap();
        let path = file.path().to_str().unwrap().to_string();
        let cli =
            Cli::try_parse_from([
                "pof",
                "-m",
                &path,
                "-d",
                "2",
                "--polynomial",
                "--print-table",
                "--no-progress",
            ])
            .unwrap();
        let out = render(&cli).unwrap();
        assert!(out.contains("F(d)"));
        assert!(out.contains("0.6"));
        assert!(out.contains("0.9"));
        assert!(out.contains("PoF(p) = 3*p - 3*p^2 + 1*p^3"), "{}", out);
    }

    #[test]
    fn test_render_compressed_with_names() {
        let mut mcs = tempfile::NamedTempFile::new().unwrap();
        writeln!(mcs, "110").unwrap();
        let mut compression = tempfile::NamedTempFile::new().unwrap();
        writeln!(compression, "A%B C%D%E F").unwrap();
        let cli = Cli::try_parse_from([
            "pof",
            "-m",
            mcs.path().to_str().unwrap(),
            "-c",
            compression.path().to_str().unwrap(),
            "--delimiter",
            "%",
        ])
        .unwrap();
        let out = render(&cli).unwrap();
        assert!(out.contains("possible CS"));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let cli = Cli::try_parse_from(["pof", "-m", "/nonexistent/mcs.txt"]).unwrap();
        let err = render(&cli).unwrap_err();
        assert!(err.to_string().contains("Failed to read MCS file"));
    }
}
