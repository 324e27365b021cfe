mod config;
mod errors;
mod glossary;
mod linker;
mod parser;
mod site;
mod syntax;
mod tokenizer;

use anyhow::Context;
use clap::Parser;
use config::SiteConfig;
use errors::GlossaryError;
use glossary::DuplicatePolicy;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing::Level;

#[derive(Parser, Debug)]
#[command(name = "glossite", about = "Build a cross-linked HTML glossary from a term file")]
struct Cli {
    /// Term file: term line, one or two definition lines, blank line
    input: Option<PathBuf>,
    /// Folder receiving index.html and one page per term
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Title shown on every page
    #[arg(long, default_value = "Glossary")]
    title: String,
    /// How to treat a term defined more than once
    #[arg(long, value_enum, default_value_t = DuplicatePolicy::KeepLast)]
    duplicates: DuplicatePolicy,
    /// Leave a term's own name unlinked inside its definition
    #[arg(long)]
    no_self_links: bool,
    /// Create the output folder if it does not exist
    #[arg(long)]
    create_dir: bool,
    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
    /// Only log warnings and errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

impl Cli {
    fn log_level(&self) -> Level {
        match (self.quiet, self.verbose) {
            (true, _) => Level::WARN,
            (false, 0) => Level::INFO,
            (false, 1) => Level::DEBUG,
            _ => Level::TRACE,
        }
    }

    fn site_config(&self) -> SiteConfig {
        SiteConfig {
            title: self.title.clone(),
            duplicates: self.duplicates,
            link_self: !self.no_self_links,
            create_dir: self.create_dir,
            ..SiteConfig::default()
        }
    }
}

fn prompt(msg: &str) -> io::Result<String> {
    let mut out = io::stdout().lock();
    writeln!(out, "{msg}")?;
    out.flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\n', '\r']).to_string())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(cli.log_level())
        .with_writer(io::stderr)
        .init();

    let input = match &cli.input {
        Some(p) => p.clone(),
        None => prompt("Enter the name of an input file: ")?.into(),
    };
    let source = std::fs::read_to_string(&input)
        .with_context(|| format!("cannot read {}", input.display()))?;
    let output = match &cli.output {
        Some(p) => p.clone(),
        None => prompt("Enter the name of the folder to store the glossary: ")?.into(),
    };

    match site::generate(&source, &output, &cli.site_config()) {
        Ok(report) => {
            println!(
                "Wrote {} pages with {} links to {}",
                report.pages,
                report.links,
                output.display()
            );
            Ok(())
        }
        Err(GlossaryError::Parse(e)) => {
            eprintln!("{}", e.user_msg(input.to_str()));
            std::process::exit(1);
        }
        Err(e) => Err(e).with_context(|| format!("building glossary from {}", input.display())),
    }
}
