//! Argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use sift_core::FilterOperator;

#[derive(Parser, Debug)]
#[command(name = "sift", version, about = "Filter data frames by displayed values")]
pub struct Cli {
    /// Config file (defaults to <config dir>/sift/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print filtered rows, filter order and cross-filter rows as JSON
    View {
        /// Data frame JSON file
        frame: PathBuf,

        /// Filter JSON file: {"<column>": {"filteredSet": [...]}, ...}
        #[arg(long)]
        filter: Option<PathBuf>,
    },

    /// Print the value counts a column's filter popup would offer
    Options {
        /// Data frame JSON file
        frame: PathBuf,

        /// Column display name
        #[arg(long)]
        column: String,

        /// Filter JSON file
        #[arg(long)]
        filter: Option<PathBuf>,

        /// Narrow the options with a search term
        /// (defaults to the search stored in the filter file for this column)
        #[arg(long)]
        search: Option<String>,

        /// Search operator: contains, =, !=, >, >=, <, <=
        #[arg(long)]
        operator: Option<FilterOperator>,

        /// Print the distinct values without counts
        #[arg(long)]
        values_only: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_view() {
        let cli = Cli::try_parse_from(["sift", "view", "frame.json", "--filter", "f.json"]).unwrap();
        match cli.command {
            Command::View { frame, filter } => {
                assert_eq!(frame, PathBuf::from("frame.json"));
                assert_eq!(filter, Some(PathBuf::from("f.json")));
            }
            other => panic!("unexpected command: {other:?}"),
        }
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_parse_options_with_operator() {
        let cli = Cli::try_parse_from([
            "sift",
            "--config",
            "c.toml",
            "options",
            "frame.json",
            "--column",
            "latency",
            "--search",
            "10",
            "--operator",
            ">=",
        ])
        .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("c.toml")));
        match cli.command {
            Command::Options {
                column,
                search,
                operator,
                values_only,
                ..
            } => {
                assert_eq!(column, "latency");
                assert_eq!(search.as_deref(), Some("10"));
                assert_eq!(operator, Some(FilterOperator::GreaterOrEqual));
                assert!(!values_only);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_unknown_operator_is_rejected() {
        let result = Cli::try_parse_from([
            "sift",
            "options",
            "frame.json",
            "--column",
            "x",
            "--operator",
            "~",
        ]);
        assert!(result.is_err());
    }
}
