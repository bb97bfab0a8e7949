//! Implementation of the `mdschema check` command.
//!
//! # Steps
//!
//! 1. Resolve the schema (`--schema` or discovery from the current directory)
//! 2. Apply link overrides from the command line, then re-validate the schema
//! 3. Discover Markdown files
//! 4. Validate each document independently and collect findings
//! 5. Print the report; fail with exit code 2 per the severity policy

use crate::cli::CheckArgs;
use crate::discovery::find_markdown_files;
use crate::document::Document;
use crate::error::{MdschemaError, Result};
use crate::report::Report;
use crate::schema::Schema;
use crate::validate::{HttpProbe, UrlProbe, validate_document};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

/// Execute the `mdschema check` command.
pub fn cmd_check(args: CheckArgs) -> Result<()> {
    let schema = load_schema(&args)?;
    let probe = HttpProbe::new(Duration::from_secs(schema.links.external_timeout));
    let report = run_check(&args, &schema, &probe)?;

    print!("{}", report.render(args.format)?);

    if report.is_failure(args.strict) {
        let summary = report.summary();
        return Err(MdschemaError::ValidationError(format!(
            "{} error(s), {} warning(s)",
            summary.errors, summary.warnings
        )));
    }
    Ok(())
}

/// Check every file selected by `args` against `schema`.
pub fn run_check(args: &CheckArgs, schema: &Schema, probe: &dyn UrlProbe) -> Result<Report> {
    let files = find_markdown_files(&args.paths, &args.exclude)?;
    if files.is_empty() {
        return Err(MdschemaError::UserError(
            "no Markdown files found".to_string(),
        ));
    }

    let mut report = Report::new();
    for file in &files {
        let document = Document::load(file)?;
        let violations = validate_document(&document, schema, probe);
        info!(path = %file.display(), violations = violations.len(), "checked file");
        report.add(file, violations);
    }
    Ok(report)
}

fn load_schema(args: &CheckArgs) -> Result<Schema> {
    let path = match &args.schema {
        Some(path) => path.clone(),
        None => discover_schema()?,
    };
    debug!(schema = %path.display(), "loading schema");

    let mut schema = Schema::load(&path)?;
    if args.check_external {
        schema.links.validate_external = true;
    }
    if let Some(timeout) = args.timeout {
        schema.links.external_timeout = timeout;
    }
    schema.validate()?;
    Ok(schema)
}

fn discover_schema() -> Result<PathBuf> {
    let cwd = std::env::current_dir().map_err(|e| {
        MdschemaError::IoError(format!("failed to read current directory: {}", e))
    })?;
    Schema::discover(&cwd).ok_or_else(|| no_schema_error(&cwd))
}

fn no_schema_error(cwd: &Path) -> MdschemaError {
    MdschemaError::UserError(format!(
        "no schema file found in '{}' or its parents; create .mdschema.yml or pass --schema",
        cwd.display()
    ))
}
