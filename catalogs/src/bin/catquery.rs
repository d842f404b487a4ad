//! Fetch a catalogue cone from VizieR and print it as TSV.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::Parser;

use catalogs::{QueryOptions, VizierClient};

#[derive(Parser, Debug)]
#[command(name = "catquery", about = "Download an astronomical catalogue around a sky position")]
struct Args {
    /// Right Ascension of the field centre, degrees
    #[arg(long)]
    ra: f64,

    /// Declination of the field centre, degrees
    #[arg(long)]
    dec: f64,

    /// Search radius, degrees
    #[arg(long, default_value_t = 0.1)]
    radius: f64,

    /// Catalogue short name (ps1, gaiadr2, apass, ...) or VizieR identifier
    #[arg(long, default_value = "ps1")]
    catalog: String,

    /// Server-side row limit
    #[arg(long)]
    limit: Option<usize>,

    /// Column filter, as NAME=EXPRESSION (repeatable)
    #[arg(long = "filter", value_parser = parse_filter)]
    filters: Vec<(String, String)>,

    /// Write the TSV to this file instead of standard output
    #[arg(long)]
    output: Option<PathBuf>,
}

fn parse_filter(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(name, expr)| (name.to_string(), expr.to_string()))
        .ok_or_else(|| format!("filter {raw:?} is not NAME=EXPRESSION"))
}

fn emit(tsv: &str, output: Option<&Path>) -> io::Result<()> {
    match output {
        Some(path) => fs::write(path, tsv),
        None => io::stdout().write_all(tsv.as_bytes()),
    }
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let options = QueryOptions {
        limit: args.limit,
        filters: args.filters,
        extra: Vec::new(),
    };

    let client = match VizierClient::new() {
        Ok(client) => client,
        Err(err) => {
            eprintln!("Failed to set up VizieR client: {err}");
            std::process::exit(1);
        }
    };

    match client.query_region(args.ra, args.dec, args.radius, &args.catalog, &options) {
        Ok(Some(cat)) => {
            if let Err(err) = emit(&cat.to_tsv(), args.output.as_deref()) {
                eprintln!("Failed to write output: {err}");
                std::process::exit(1);
            }
        }
        Ok(None) => {
            eprintln!("No result for catalogue {}", args.catalog);
            std::process::exit(1);
        }
        Err(err) => {
            eprintln!("Query failed: {err}");
            std::process::exit(1);
        }
    }
}
