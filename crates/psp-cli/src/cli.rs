//! CLI argument definitions: top-level `Cli` struct and `Commands` enum.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "psp")]
#[command(about = "Translate property specification patterns into temporal logics")]
#[command(version)]
pub(crate) struct Cli {
    /// Symbol set of the LTL and MTL output: unicode | ascii
    #[arg(long, global = true, default_value = "unicode")]
    pub(crate) notation: String,

    #[command(subcommand)]
    pub(crate) command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Translate one `{scope, pattern, target_logic}` request
    Translate {
        /// Request file, or `-` for stdin
        #[arg(long)]
        request: String,

        /// Output format: text | json
        #[arg(long, default_value = "json")]
        format: String,
    },

    /// List the scopes each pattern supports in one target logic
    Matrix {
        /// Target logic key, e.g. `Prism`
        #[arg(long)]
        target: String,

        /// Output format: text | json
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// List the target logic keys
    Targets {
        /// Output format: text | json
        #[arg(long, default_value = "text")]
        format: String,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

pub(crate) fn parse_output_format(raw: &str) -> miette::Result<OutputFormat> {
    match raw {
        "text" => Ok(OutputFormat::Text),
        "json" => Ok(OutputFormat::Json),
        other => Err(miette::miette!(
            "Unknown output format: {other}. Use 'text' or 'json'."
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn output_formats() {
        assert_eq!(parse_output_format("json").unwrap(), OutputFormat::Json);
        assert_eq!(parse_output_format("text").unwrap(), OutputFormat::Text);
        assert!(parse_output_format("yaml").is_err());
    }

    #[test]
    fn notation_is_global() {
        let cli = Cli::try_parse_from(["psp", "targets", "--notation", "ascii"]).unwrap();
        assert_eq!(cli.notation, "ascii");
    }
}
