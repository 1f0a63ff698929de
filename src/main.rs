use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Runs an arp program and prints its result.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Program file to run.
    #[arg(default_value = concat!(env!("CARGO_MANIFEST_DIR"), "/sample.arp"))]
    path: PathBuf,

    /// Evaluate this source text instead of reading a file.
    #[arg(short, long, value_name = "SOURCE")]
    eval: Option<String>,

    /// Print the token list as JSON and exit.
    #[arg(long)]
    tokens: bool,

    /// Print the parsed tree and function table as JSON and exit.
    #[arg(long)]
    ast: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let source = match args.eval {
        Some(source) => source,
        None => fs::read_to_string(&args.path)
            .with_context(|| format!("failed to read '{}'", args.path.display()))?,
    };

    let tokens = arplang::tokenize(&source)?;
    if args.tokens {
        println!("{}", serde_json::to_string_pretty(&tokens)?);
        return Ok(());
    }

    let program = arplang::parse(tokens)?;
    if args.ast {
        println!("{}", serde_json::to_string_pretty(&program)?);
        return Ok(());
    }

    let result = arplang::evaluate(&program)?;
    println!("{}", result);
    Ok(())
}
