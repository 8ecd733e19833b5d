//! `psp`: translate property specification patterns from the command line.

mod cli;
mod request;
mod response;

use std::io::Read;

use clap::Parser;
use miette::IntoDiagnostic;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use psp_mapping::{MapperRegistry, Notation, RegistryOptions, TargetLogic};
use psp_model::{Pattern, Scope};

use crate::cli::{parse_output_format, Cli, Commands, OutputFormat};
use crate::request::{RequestError, TranslateRequest};
use crate::response::{
    render_matrix_text, render_targets_text, target_entries, TranslateResponse,
};

fn read_request(source: &str) -> Result<String, RequestError> {
    let read = if source == "-" {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text).map(|_| text)
    } else {
        std::fs::read_to_string(source)
    };
    read.map_err(|e: std::io::Error| RequestError::Io {
        path: if source == "-" {
            "<stdin>".to_string()
        } else {
            source.to_string()
        },
        source: e,
    })
}

fn parse_request(text: &str) -> Result<(TargetLogic, Scope, Pattern), RequestError> {
    let request = TranslateRequest::parse(text)?;
    let target = request.target()?;
    Ok((target, request.scope.build()?, request.pattern.build()?))
}

fn print_json<T: serde::Serialize>(value: &T) -> miette::Result<()> {
    let text = serde_json::to_string_pretty(value).into_diagnostic()?;
    println!("{text}");
    Ok(())
}

fn run_translate(
    registry: &MapperRegistry,
    source: &str,
    format: OutputFormat,
) -> miette::Result<()> {
    let text = read_request(source)?;
    let (target, scope, pattern) = match parse_request(&text) {
        Ok(parts) => parts,
        Err(e) => {
            if e.is_unsupported_type() {
                warn!("request names a type the catalogue does not define");
            }
            return Err(e.into());
        }
    };
    debug!(logic = %target, scope = %scope.kind(), pattern = %pattern.kind(), "request parsed");

    let response: TranslateResponse = registry.translate(target, &scope, &pattern)?.into();
    match format {
        OutputFormat::Json => print_json(&response),
        OutputFormat::Text => {
            print!("{}", response.render_text());
            Ok(())
        }
    }
}

fn run_matrix(
    registry: &MapperRegistry,
    target: &str,
    format: OutputFormat,
) -> miette::Result<()> {
    let target: TargetLogic = target.parse()?;
    let matrix = registry.matrix(target)?;
    match format {
        OutputFormat::Json => print_json(&matrix),
        OutputFormat::Text => {
            print!("{}", render_matrix_text(target, &matrix));
            Ok(())
        }
    }
}

fn run_targets(registry: &MapperRegistry, format: OutputFormat) -> miette::Result<()> {
    let entries = target_entries(registry);
    match format {
        OutputFormat::Json => print_json(&entries),
        OutputFormat::Text => {
            print!("{}", render_targets_text(&entries));
            Ok(())
        }
    }
}

fn main() -> miette::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let notation: Notation = cli
        .notation
        .parse()
        .map_err(|e: String| miette::miette!("{e}. Use 'unicode' or 'ascii'."))?;
    let registry = MapperRegistry::new(RegistryOptions { notation })?;
    info!(?notation, "mapper registry ready");

    match cli.command {
        Commands::Translate { request, format } => {
            run_translate(&registry, &request, parse_output_format(&format)?)
        }
        Commands::Matrix { target, format } => {
            run_matrix(&registry, &target, parse_output_format(&format)?)
        }
        Commands::Targets { format } => run_targets(&registry, parse_output_format(&format)?),
    }
}
