//! Print the OpenAPI document as JSON or YAML.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::io::{self, Write};

use clap::{Parser, ValueEnum};
use tenders::ApiDoc;
use utoipa::OpenApi;

/// Output encodings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
enum Format {
    #[default]
    Json,
    Yaml,
}

/// `openapi-dump` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "openapi-dump",
    about = "Print the tenders OpenAPI document",
    version
)]
struct CliArgs {
    /// Encoding of the printed document.
    #[arg(long, value_enum, default_value_t = Format::Json)]
    format: Format,
}

fn render(format: Format) -> io::Result<String> {
    let doc = ApiDoc::openapi();
    match format {
        Format::Json => doc.to_pretty_json().map_err(io::Error::other),
        Format::Yaml => doc.to_yaml().map_err(io::Error::other),
    }
}

fn main() -> io::Result<()> {
    let args = CliArgs::try_parse().map_err(io::Error::other)?;
    let rendered = render(args.format)?;
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{rendered}")
}
