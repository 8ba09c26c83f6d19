use std::{fmt, fs, path::PathBuf, str::FromStr};

use clap::{ArgAction, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Log more (-v info, -vv debug, -vvv trace); RUST_LOG takes precedence
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build a works-cited page from citation files and webpages
    Cite {
        #[arg(value_name = "SRC", required = true)]
        from: Vec<Source>,
        /// Write the page to FILE instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
        /// Seconds to wait for each webpage
        #[arg(long, value_name = "SECS", default_value_t = 15)]
        timeout: u64,
    },
    /// Print the citation record scraped from a webpage as JSON
    Scrape {
        #[arg(value_name = "URL")]
        url: String,
        /// Seconds to wait for the page
        #[arg(long, value_name = "SECS", default_value_t = 15)]
        timeout: u64,
        /// Print the rendered citation instead of the record
        #[arg(long)]
        render: bool,
    },
}

#[derive(Clone, Debug)]
/// Where citation records come from, which can either be
///
/// - a JSON file holding one record or a list of them, or
/// - the URL of a webpage to scrape.
pub enum Source {
    File(PathBuf),
    Url(String),
}

impl FromStr for Source {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Anything that exists on disk is a file; URL validation happens when we fetch.
        if let Ok(path) = fs::canonicalize(s) {
            Ok(Source::File(path))
        } else {
            Ok(Source::Url(s.to_string()))
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::File(path) => write!(f, "{}", path.display()),
            Source::Url(url) => f.write_str(url),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_json_path_is_a_file_source() {
        // Created in the working directory so it can be named relatively, as users do.
        let works = tempfile::Builder::new()
            .prefix("works-")
            .suffix(".json")
            .tempfile_in(".")
            .expect("works file");
        let name = works.path().file_name().unwrap().to_str().unwrap().to_string();
        let relative = format!("./{name}");

        match Source::from_str(&relative).expect("parse") {
            Source::File(p) => {
                assert!(p.is_absolute(), "{} should be canonical", p.display());
                assert_eq!(p.file_name().unwrap().to_str(), Some(name.as_str()));
                assert_eq!(Source::File(p.clone()).to_string(), p.display().to_string());
            }
            Source::Url(u) => panic!("{u} should have been read as a file"),
        }
    }

    #[test]
    fn missing_json_path_is_treated_as_url() {
        let src = Source::from_str("./no-such-works.json").expect("parse");
        assert!(matches!(src, Source::Url(ref u) if u == "./no-such-works.json"));
    }

    #[test]
    fn from_str_falls_back_to_url() {
        proptest::proptest!(|(s in "https://[a-z]{1,12}\\.example/[a-z0-9_-]{0,16}")| {
            let src = Source::from_str(&s).expect("parse");
            match src {
                Source::Url(u) => proptest::prop_assert_eq!(u, s),
                Source::File(_) => proptest::prop_assert!(false, "should not be a file"),
            }
        })
    }

    #[test]
    fn cite_requires_a_source() {
        assert!(Cli::try_parse_from(["cite", "cite"]).is_err());
        let cli = Cli::try_parse_from(["cite", "-vv", "cite", "https://example.com/", "-o", "out.txt"])
            .expect("parse");
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Command::Cite { from, output, timeout } => {
                assert_eq!(from.len(), 1);
                assert_eq!(output, Some(PathBuf::from("out.txt")));
                assert_eq!(timeout, 15);
            }
            _ => panic!("expected cite"),
        }
    }

    #[test]
    fn scrape_render_flag() {
        let cli = Cli::try_parse_from(["cite", "scrape", "https://example.com/", "--render"])
            .expect("parse");
        match cli.command {
            Command::Scrape { url, render, .. } => {
                assert_eq!(url, "https://example.com/");
                assert!(render);
            }
            _ => panic!("expected scrape"),
        }
    }
}
