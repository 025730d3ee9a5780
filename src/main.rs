mod cli_commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use cli_commands::OutputFormat;

/// Convert geometries between WKT, GeoJSON and geo interface records
#[derive(Parser, Debug)]
#[command(name = "geodaisy", author, version, about, long_about = None, disable_help_subcommand = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    verbose: Verbosity<WarnLevel>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert a geometry to another representation
    Convert {
        /// WKT or serialized GeoJSON, or '-' to read standard input
        input: String,

        /// Representation to produce
        #[arg(long, value_enum, default_value_t = OutputFormat::Geojson)]
        to: OutputFormat,

        /// Write the result to this file instead of standard output
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Print some details about a geometry
    Show {
        /// WKT or serialized GeoJSON, or '-' to read standard input
        input: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.verbose.log_level_filter())
        .format_timestamp(None)
        .init();

    run(cli)
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Convert { input, to, output } => {
            cli_commands::convert(&input, to, output.as_deref())
        }
        Commands::Show { input } => cli_commands::show_detail(&input),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: Vec<&str>) -> Result<Cli> {
        Ok(Cli::try_parse_from(args)?)
    }

    #[test]
    fn test_help() {
        let err = parse(vec!["geodaisy"]).unwrap_err().to_string();
        assert!(err.contains("Usage: geodaisy [OPTIONS] <COMMAND>"));
    }

    #[test]
    fn test_convert_args() {
        let cli = parse(vec!["geodaisy", "convert", "POINT (1 2)", "--to", "wkt"]).unwrap();
        match cli.command {
            Commands::Convert { input, to, output } => {
                assert_eq!(input, "POINT (1 2)");
                assert_eq!(to, OutputFormat::Wkt);
                assert_eq!(output, None);
            }
            other => panic!("Unexpected command: {other:?}"),
        }

        let cli = parse(vec!["geodaisy", "-v", "convert", "-", "-o", "out.json"]).unwrap();
        match cli.command {
            Commands::Convert { to, output, .. } => {
                assert_eq!(to, OutputFormat::Geojson);
                assert_eq!(output.as_deref(), Some("out.json"));
            }
            other => panic!("Unexpected command: {other:?}"),
        }

        assert!(parse(vec!["geodaisy", "convert", "POINT (1 2)", "--to", "kml"]).is_err());
    }

    #[test]
    fn test_run_show() {
        let cli = parse(vec!["geodaisy", "show", "MULTIPOINT ((1 2), (3 4))"]).unwrap();
        run(cli).unwrap();

        let cli = parse(vec!["geodaisy", "show", "NOTASHAPE (1 2)"]).unwrap();
        assert!(run(cli).is_err());
    }
}
