//! Heading pattern matching.
//!
//! Decides whether one document section satisfies one [`HeadingSpec`]:
//!
//! - `Literal`: the reconstructed heading (`"## Usage"`) equals the trimmed text
//! - `Regex`: the reconstructed heading fully matches the pattern (`^...$`)
//! - `Expr`: the boolean expression holds for `filename` and `heading`
//!
//! Compiled regexes and parsed expressions are cached per matcher instance.
//! Create one matcher per validation run and pass it to the builder and the
//! validators. A regex that fails to compile degrades to literal comparison.

pub mod expr;


use crate::document::Section;
use crate::schema::HeadingSpec;
use expr::{Env, Expr};
use regex::Regex;
use std::cell::RefCell;
use std::collections::HashMap;
use tracing::warn;

/// Compiled regular expressions keyed by pattern text.
///
/// Failed compilations are cached too, so each bad pattern is reported once.
#[derive(Debug, Default)]
pub struct RegexCache {
    compiled: RefCell<HashMap<String, Option<Regex>>>,
    full: RefCell<HashMap<String, Option<Regex>>>,
}

impl RegexCache {
    /// Compiled regex for `pattern`, or `None` if it does not compile.
    pub fn get(&self, pattern: &str) -> Option<Regex> {
        lookup(&self.compiled, pattern, || Regex::new(pattern))
    }

    /// `pattern` anchored at both ends, or `None` if `pattern` itself does
    /// not compile.
    pub fn full_match(&self, pattern: &str) -> Option<Regex> {
        lookup(&self.full, pattern, || {
            Regex::new(pattern)?;
            Regex::new(&format!("^(?:{})$", pattern))
        })
    }

    /// Number of distinct patterns seen, including ones that failed to compile.
    pub fn pattern_count(&self) -> usize {
        self.compiled.borrow().len() + self.full.borrow().len()
    }
}

fn lookup(
    cache: &RefCell<HashMap<String, Option<Regex>>>,
    pattern: &str,
    build: impl FnOnce() -> Result<Regex, regex::Error>,
) -> Option<Regex> {
    if let Some(cached) = cache.borrow().get(pattern) {
        return cached.clone();
    }

    let compiled = match build() {
        Ok(re) => Some(re),
        Err(e) => {
            warn!(pattern, error = %e, "invalid regex, falling back to literal comparison");
            None
        }
    };
    cache
        .borrow_mut()
        .insert(pattern.to_string(), compiled.clone());
    compiled
}

/// Matches document sections against heading specifications.
#[derive(Debug, Default)]
pub struct PatternMatcher {
    regexes: RegexCache,
    exprs: RefCell<HashMap<String, Option<Expr>>>,
}

impl PatternMatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shared regex cache, also used by the content validators.
    pub fn regexes(&self) -> &RegexCache {
        &self.regexes
    }

    /// Whether `section` satisfies `spec`. The synthetic root never matches.
    ///
    /// `base_name` is the document file name without directory or extension.
    pub fn matches(&self, section: &Section, spec: &HeadingSpec, base_name: &str) -> bool {
        let Some(heading) = &section.heading else {
            return false;
        };

        match spec {
            HeadingSpec::Literal(text) => heading.reconstructed() == text.trim(),
            HeadingSpec::Regex(pattern) => {
                let reconstructed = heading.reconstructed();
                match self.regexes.full_match(pattern) {
                    Some(re) => re.is_match(&reconstructed),
                    None => reconstructed == pattern.trim(),
                }
            }
            HeadingSpec::Expr(source) => {
                let env = Env {
                    filename: base_name,
                    heading: &heading.text,
                };
                self.eval_expr(source, &env)
            }
        }
    }

    fn eval_expr(&self, source: &str, env: &Env<'_>) -> bool {
        if !self.exprs.borrow().contains_key(source) {
            let parsed = match Expr::parse(source) {
                Ok(expr) => Some(expr),
                Err(e) => {
                    warn!(expression = source, error = %e, "invalid heading expression never matches");
                    None
                }
            };
            self.exprs.borrow_mut().insert(source.to_string(), parsed);
        }

        match self.exprs.borrow().get(source) {
            Some(Some(expr)) => expr.matches(env, &self.regexes),
            _ => false,
        }
    }
}
