//! CLI argument parsing for mdschema.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use crate::report::Format;
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// mdschema: validate Markdown documents against a YAML structure schema.
///
/// A schema declares the expected heading hierarchy (literal headings,
/// regular expressions or expressions over the file name), per-section
/// content rules, front matter fields and link checks.
#[derive(Parser, Debug)]
#[command(name = "mdschema")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    ///
    /// MDSCHEMA_LOG overrides this with a full filter directive.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands for mdschema.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate documents against a schema.
    ///
    /// Exits 0 when no error-severity violation is found, 2 when at least
    /// one is (or any warning with --strict), and 1 on usage or schema errors.
    Check(CheckArgs),

    /// Print a schema inferred from an existing document.
    ///
    /// The structure mirrors the document's heading tree, using literal
    /// headings, plus the types of its front matter fields.
    Derive(DeriveArgs),
}

/// Arguments for the `check` command.
#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Files, directories or glob patterns to check.
    #[arg(default_value = ".")]
    pub paths: Vec<PathBuf>,

    /// Schema file. Defaults to .mdschema.yml or .mdschema.yaml found in the
    /// current directory or one of its ancestors.
    #[arg(short, long)]
    pub schema: Option<PathBuf>,

    /// Report format.
    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    pub format: Format,

    /// Glob patterns of files to skip.
    #[arg(short, long)]
    pub exclude: Vec<String>,

    /// Fetch external links, overriding the schema setting.
    #[arg(long)]
    pub check_external: bool,

    /// Timeout in seconds for each external link request.
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Treat warnings as failures.
    #[arg(long)]
    pub strict: bool,
}

/// Arguments for the `derive` command.
#[derive(Parser, Debug)]
pub struct DeriveArgs {
    /// Markdown document to derive a schema from.
    pub file: PathBuf,

    /// Write the schema to this file instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl Cli {
    /// Parse command line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_debug_assert() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_check_defaults() {
        let cli = Cli::try_parse_from(["mdschema", "check"]).unwrap();
        assert_eq!(cli.verbose, 0);
        if let Command::Check(args) = cli.command {
            assert_eq!(args.paths, vec![PathBuf::from(".")]);
            assert!(args.schema.is_none());
            assert_eq!(args.format, Format::Text);
            assert!(args.exclude.is_empty());
            assert!(!args.check_external);
            assert!(args.timeout.is_none());
            assert!(!args.strict);
        } else {
            panic!("Expected Check command");
        }
    }

    #[test]
    fn parse_check_full() {
        let cli = Cli::try_parse_from([
            "mdschema",
            "-vv",
            "check",
            "docs",
            "README.md",
            "--schema",
            "schema.yml",
            "--format",
            "json",
            "--exclude",
            "docs/drafts/**",
            "--exclude",
            "CHANGELOG.md",
            "--check-external",
            "--timeout",
            "5",
            "--strict",
        ])
        .unwrap();

        assert_eq!(cli.verbose, 2);
        if let Command::Check(args) = cli.command {
            assert_eq!(
                args.paths,
                vec![PathBuf::from("docs"), PathBuf::from("README.md")]
            );
            assert_eq!(args.schema, Some(PathBuf::from("schema.yml")));
            assert_eq!(args.format, Format::Json);
            assert_eq!(args.exclude, vec!["docs/drafts/**", "CHANGELOG.md"]);
            assert!(args.check_external);
            assert_eq!(args.timeout, Some(5));
            assert!(args.strict);
        } else {
            panic!("Expected Check command");
        }
    }

    #[test]
    fn parse_verbose_after_subcommand() {
        let cli = Cli::try_parse_from(["mdschema", "check", "-v"]).unwrap();
        assert_eq!(cli.verbose, 1);
    }

    #[test]
    fn parse_invalid_format_fails() {
        assert!(Cli::try_parse_from(["mdschema", "check", "--format", "xml"]).is_err());
    }

    #[test]
    fn parse_derive() {
        let cli = Cli::try_parse_from(["mdschema", "derive", "README.md", "-o", "s.yml"]).unwrap();
        if let Command::Derive(args) = cli.command {
            assert_eq!(args.file, PathBuf::from("README.md"));
            assert_eq!(args.output, Some(PathBuf::from("s.yml")));
        } else {
            panic!("Expected Derive command");
        }
    }

    #[test]
    fn parse_derive_requires_file() {
        assert!(Cli::try_parse_from(["mdschema", "derive"]).is_err());
    }
}
