use std::{fs, path::Path, time::Duration};

use anyhow::Context;
use clap::Parser;
use log::{LevelFilter, info};
use mla_cite::{
    Citation, ScrapeConfig, Works, generate_citations,
    scrape::{auto_cite_webpage_with, get_data_from_webpage_with},
};
use owo_colors::OwoColorize;

use crate::cli::{Cli, Command, Source};

mod cli;

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();
    init_logging(args.verbose);

    match args.command {
        Command::Cite {
            from,
            output,
            timeout,
        } => cite(&from, output.as_deref(), &scrape_config(timeout)),
        Command::Scrape {
            url,
            timeout,
            render,
        } => {
            let config = scrape_config(timeout);
            if render {
                println!("{}", auto_cite_webpage_with(&url, &config)?);
            } else {
                let page = get_data_from_webpage_with(&url, &config)?;
                println!("{}", serde_json::to_string_pretty(&Citation::Webpage(page))?);
            }
            Ok(())
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn scrape_config(timeout: u64) -> ScrapeConfig {
    ScrapeConfig {
        global_timeout: Duration::from_secs(timeout),
        ..ScrapeConfig::default()
    }
}

fn load(source: &Source, config: &ScrapeConfig) -> anyhow::Result<Vec<Citation>> {
    match source {
        Source::File(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            let works: Works = serde_json::from_str(&text)
                .with_context(|| format!("failed to parse citations in {}", path.display()))?;
            Ok(works.into_vec())
        }
        Source::Url(url) => Ok(vec![Citation::Webpage(get_data_from_webpage_with(url, config)?)]),
    }
}

fn cite(sources: &[Source], output: Option<&Path>, config: &ScrapeConfig) -> anyhow::Result<()> {
    let mut records = Vec::new();
    let (mut ok, mut failed) = (0usize, 0usize);
    for source in sources {
        match load(source, config) {
            Ok(loaded) => {
                info!("{} record(s) from {source}", loaded.len());
                records.extend(loaded);
                ok += 1;
            }
            Err(e) => {
                eprintln!("{} {source}: {e:#}", paint_fail("✗"));
                failed += 1;
            }
        }
    }

    if !records.is_empty() {
        let page = generate_citations(&records)?;
        match output {
            Some(path) => fs::write(path, &page)
                .with_context(|| format!("failed to write {}", path.display()))?,
            None => println!("{page}"),
        }
    }

    eprintln!(
        "{} {ok}  {} {failed}",
        paint_ok("✓"),
        paint_fail("✗")
    );
    Ok(())
}

fn colour_enabled() -> bool {
    std::env::var_os("NO_COLOR").is_none()
}

fn paint_ok(s: &str) -> String {
    if colour_enabled() { s.green().to_string() } else { s.to_string() }
}

fn paint_fail(s: &str) -> String {
    if colour_enabled() { s.red().to_string() } else { s.to_string() }
}
