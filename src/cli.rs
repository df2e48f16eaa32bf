//! The `cpr-sniff` command line scanner

use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info};

use crate::cpr::Cpr;
use crate::error::CprError;
use crate::{matcher, validators};

const STDIN_NAME: &str = "(standard input)";

#[derive(Debug, Clone, Parser)]
#[command(name = "cpr-sniff")]
#[command(about = "Find Danish CPR numbers in text")]
pub struct CliConfig {
    #[arg(
        help = "Files to scan; reads standard input when empty or '-'. All inputs are read before scanning, so an unreadable path stops the run with no output"
    )]
    pub paths: Vec<PathBuf>,

    #[arg(long, help = "Validate each input line as a single CPR number")]
    pub check: bool,

    #[arg(long, conflicts_with = "check", help = "Also report rejected candidates and why")]
    pub explain: bool,

    #[arg(long, conflicts_with = "explain", help = "Print only the number of matches")]
    pub count: bool,

    #[arg(short, long, help = "Print nothing; the exit status tells whether anything matched")]
    pub quiet: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

/// One named input
#[derive(Debug, Clone)]
pub struct Source {
    pub name: String,
    pub content: String,
}

impl CliConfig {
    /// Read every input named on the command line
    pub fn sources(&self) -> Result<Vec<Source>> {
        if self.paths.is_empty() {
            return Ok(vec![read_stdin()?]);
        }

        self.paths
            .iter()
            .map(|path| {
                if path.as_os_str() == "-" {
                    return read_stdin();
                }
                let content = fs::read_to_string(path)
                    .with_context(|| format!("cannot read {}", path.display()))?;
                Ok(Source {
                    name: path.display().to_string(),
                    content,
                })
            })
            .collect()
    }
}

fn read_stdin() -> Result<Source> {
    let mut content = String::new();
    io::stdin()
        .read_to_string(&mut content)
        .context("cannot read standard input")?;
    Ok(Source {
        name: STDIN_NAME.to_string(),
        content,
    })
}

/// A candidate located in a source, with its rejection reason if it failed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    /// 1-based line
    pub line: usize,
    /// 1-based byte column within the line
    pub column: usize,
    pub text: String,
    pub rejected: Option<CprError>,
}

/// Scan content line by line. Matches never span lines, so this finds the
/// same numbers as scanning the whole text.
pub fn scan(content: &str, explain: bool) -> Vec<Finding> {
    let mut findings = Vec::new();

    for (idx, line) in content.lines().enumerate() {
        let finding = |m: regex::Match<'_>, rejected| Finding {
            line: idx + 1,
            column: m.start() + 1,
            text: m.as_str().to_string(),
            rejected,
        };

        if explain {
            for m in matcher::candidates(line) {
                let rejected = validators::check(&validators::normalize(m.as_str())).err();
                findings.push(finding(m, rejected));
            }
        } else {
            findings.extend(matcher::accepted(line).map(|m| finding(m, None)));
        }
    }

    findings
}

/// Validate each non-blank line as one CPR token
pub fn check_lines(content: &str) -> Vec<(&str, Result<Cpr, CprError>)> {
    content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| (line, Cpr::parse(line)))
        .collect()
}

/// Run the scanner over all sources, writing results to `out`.
/// Returns whether anything valid was found.
pub fn run<W: Write>(config: &CliConfig, out: &mut W) -> Result<bool> {
    let sources = config.sources()?;
    let named = sources.len() > 1;
    let mut matched = false;

    for source in &sources {
        if config.check {
            let verdicts = check_lines(&source.content);
            let valid = verdicts.iter().filter(|(_, v)| v.is_ok()).count();
            debug!(source = %source.name, lines = verdicts.len(), valid, "checked lines");
            matched |= valid > 0;

            if config.quiet {
                continue;
            }
            if config.count {
                write_count(out, named.then_some(source.name.as_str()), valid)?;
                continue;
            }
            for (token, verdict) in verdicts {
                match verdict {
                    Ok(_) => writeln!(out, "{token}: valid")?,
                    Err(reason) => writeln!(out, "{token}: invalid ({reason})")?,
                }
            }
            continue;
        }

        let findings = scan(&source.content, config.explain);
        let valid = findings.iter().filter(|f| f.rejected.is_none()).count();
        debug!(source = %source.name, candidates = findings.len(), valid, "scanned source");
        matched |= valid > 0;

        if config.quiet {
            continue;
        }
        if config.count {
            write_count(out, named.then_some(source.name.as_str()), valid)?;
            continue;
        }
        for f in findings {
            write!(out, "{}:{}:{}: {}", source.name, f.line, f.column, f.text)?;
            match f.rejected {
                Some(reason) => writeln!(out, " (rejected: {reason})")?,
                None => writeln!(out)?,
            }
        }
    }

    info!(sources = sources.len(), matched, "done");
    Ok(matched)
}

fn write_count<W: Write>(out: &mut W, name: Option<&str>, count: usize) -> io::Result<()> {
    match name {
        Some(name) => writeln!(out, "{name}:{count}"),
        None => writeln!(out, "{count}"),
    }
}
