//! Minimal CLI: TypeScript → (nodes | mock)
use std::io::Read;
use std::path::{Path, PathBuf};
use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use crate::error::Error;
use crate::generate::DataGenerator;
use crate::ir::Node;
use crate::registry::{self, ExtractorRegistry};

pub const DEFAULT_COUNT: usize = 10;

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// extract type shapes from TypeScript interfaces / type aliases and generate mock JSON data
#[derive(Parser, Debug)]
#[command(name = "ts-mockgen", version)]
pub struct CommandLineInterface {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// generate mock records, one collection per interface / type alias
    Mock(MockOut),
    /// print the extracted node trees
    Nodes(NodesOut),
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    /// language identifier (typescript, typescriptreact); inferred from the file extension if omitted
    #[arg(long)]
    language: Option<String>,

    /// One or more inputs. May be literal paths or quoted glob patterns or '-' for stdin
    #[arg(long, short, num_args = 1.., required = true)]
    input: Vec<String>,
}

#[derive(clap::Parser, Debug)]
struct MockOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// records per collection; anything that is not a non-negative integer means 10
    #[arg(long, short = 'n', default_value = "10")]
    count: String,

    /// inputs are node trees written by `nodes` rather than TypeScript
    #[arg(long)]
    from_nodes: bool,

    /// output .json file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// single-line JSON
    #[arg(long)]
    compact: bool,
}

#[derive(clap::Parser, Debug)]
struct NodesOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// output .json file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// single-line JSON
    #[arg(long)]
    compact: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Source {
    Stdin,
    File(PathBuf),
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl InputSettings {
    fn load(&self, registry: &ExtractorRegistry, from_nodes: bool) -> anyhow::Result<Vec<Node>> {
        let mut roots = Vec::new();
        for source in resolve_sources(&self.input)? {
            let text = source.read()?;
            let nodes = if from_nodes {
                crate::path_de::nodes_from_str(&text)
                    .with_context(|| format!("failed to decode node trees from {source}"))?
            } else {
                let language = self.language_for(&source)?;
                let extractor = registry.create(language)?;
                let nodes = match &source {
                    Source::Stdin => extractor.parse_selection(&text),
                    Source::File(_) => extractor.parse_source(&text),
                };
                nodes.with_context(|| format!("failed to extract types from {source}"))?
            };
            tracing::debug!(%source, roots = nodes.len(), "loaded");
            roots.extend(nodes);
        }
        Ok(roots)
    }

    fn language_for(&self, source: &Source) -> Result<&str, Error> {
        if let Some(language) = self.language.as_deref() {
            return Ok(language);
        }
        match source {
            Source::Stdin => Ok(registry::TYPESCRIPT),
            Source::File(path) => registry::detect_language(path).ok_or_else(|| {
                let ext = path.extension().map(|e| e.to_string_lossy().into_owned());
                Error::UnsupportedLanguage(ext.unwrap_or_else(|| path.display().to_string()))
            }),
        }
    }
}

impl Source {
    fn read(&self) -> Result<String, Error> {
        match self {
            Source::Stdin => {
                let mut text = String::new();
                std::io::stdin()
                    .read_to_string(&mut text)
                    .map_err(|source| Error::Read { path: PathBuf::from("-"), source })?;
                Ok(text)
            }
            Source::File(path) => std::fs::read_to_string(path)
                .map_err(|source| Error::Read { path: path.clone(), source }),
        }
    }
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Source::Stdin => f.write_str("<stdin>"),
            Source::File(path) => write!(f, "{}", path.display()),
        }
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }
    pub fn run(&self) -> anyhow::Result<()> {
        let registry = ExtractorRegistry::builtin();
        match &self.cmd {
            Command::Mock(target) => {
                let nodes = target.input_settings.load(&registry, target.from_nodes)?;
                if nodes.is_empty() {
                    report_nothing_found();
                    return Ok(());
                }
                let count = parse_count(&target.count);
                let dataset = DataGenerator::new(&nodes).generate(count);
                write_json(&dataset, target.out.as_deref(), target.compact)
            }
            Command::Nodes(target) => {
                let nodes = target.input_settings.load(&registry, false)?;
                if nodes.is_empty() {
                    report_nothing_found();
                    return Ok(());
                }
                write_json(&nodes, target.out.as_deref(), target.compact)
            }
        }
    }
}

/// Non-negative integer text, otherwise the default of 10.
pub fn parse_count(raw: &str) -> usize {
    static DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+$").expect("count pattern"));
    let raw = raw.trim();
    if !DIGITS.is_match(raw) {
        tracing::warn!(count = raw, default = DEFAULT_COUNT, "invalid count, using the default");
        return DEFAULT_COUNT;
    }
    raw.parse().unwrap_or(DEFAULT_COUNT)
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn report_nothing_found() {
    eprintln!("{} no interfaces or type aliases found", "info:".cyan().bold());
}

fn write_json<T: Serialize>(value: &T, out: Option<&Path>, compact: bool) -> anyhow::Result<()> {
    let src = if compact {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };
    let Some(out) = out else {
        println!("{src}");
        return Ok(());
    };
    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    std::fs::write(out, &src).with_context(|| format!("failed to write {}", out.display()))?;
    Ok(())
}

fn resolve_sources<I>(patterns: I) -> Result<Vec<Source>, Error>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    fn has_glob_chars(s: &str) -> bool {
        s.bytes().any(|b| matches!(b, b'*' | b'?' | b'[' | b'{'))
    }

    let mut out = Vec::<Source>::new();

    for raw in patterns {
        let pattern = raw.as_ref();

        if pattern == "-" {
            out.push(Source::Stdin);
        } else if has_glob_chars(pattern) {
            let mut matched_any = false;
            for entry in glob::glob(pattern)? {
                let path = entry.map_err(|e| Error::Read {
                    path: e.path().to_path_buf(),
                    source: std::io::Error::from(e),
                })?;
                matched_any = true;
                out.push(Source::File(path));
            }
            if !matched_any {
                return Err(Error::NoMatches(pattern.to_string()));
            }
        } else {
            out.push(Source::File(PathBuf::from(pattern)));
        }
    }

    Ok(out)
}
