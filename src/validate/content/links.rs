//! Link checking.
//!
//! - `#anchor` links must name a heading slug in the same document
//! - Relative links must resolve to an existing file next to the document
//! - `http(s)` links are checked against the domain lists, and optionally
//!   fetched once each through a [`UrlProbe`]
//!
//! Other schemes (`mailto:`, `tel:`, ...) are not checked.

use crate::document::{Document, Link, SlugIndex};
use crate::schema::LinkRules;
use crate::validate::{Context, Validator, Violation, rules};
use percent_encoding::percent_decode_str;
use std::sync::OnceLock;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Resolves an external URL to an HTTP status code.
pub trait UrlProbe {
    fn probe(&self, url: &str) -> Result<u16, String>;
}

/// [`UrlProbe`] backed by a blocking HTTP client.
///
/// The client is built on first use, so constructing a probe for a run that
/// never checks external links costs nothing.
#[derive(Debug)]
pub struct HttpProbe {
    timeout: Duration,
    client: OnceLock<Result<reqwest::blocking::Client, String>>,
}

impl HttpProbe {
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            client: OnceLock::new(),
        }
    }

    fn client(&self) -> Result<&reqwest::blocking::Client, String> {
        self.client
            .get_or_init(|| {
                reqwest::blocking::Client::builder()
                    .timeout(self.timeout)
                    .user_agent(concat!("mdschema/", env!("CARGO_PKG_VERSION")))
                    .build()
                    .map_err(|e| format!("failed to build HTTP client: {}", e))
            })
            .as_ref()
            .map_err(Clone::clone)
    }
}

impl UrlProbe for HttpProbe {
    fn probe(&self, url: &str) -> Result<u16, String> {
        let response = self.client()?.get(url).send().map_err(|e| e.to_string())?;
        Ok(response.status().as_u16())
    }
}

/// Internal, file and external link checks.
#[derive(Debug, Default, Clone, Copy)]
pub struct LinkValidator;

impl Validator for LinkValidator {
    fn name(&self) -> &'static str {
        rules::LINKS
    }

    fn validate(&self, ctx: &Context<'_, '_>) -> Vec<Violation> {
        let settings = &ctx.schema.links;
        let slugs = ctx.document.slug_index();

        ctx.document
            .sections()
            .iter()
            .flat_map(|section| section.links.iter())
            .filter_map(|link| check_link(ctx, settings, &slugs, link))
            .collect()
    }
}

fn check_link(
    ctx: &Context<'_, '_>,
    settings: &LinkRules,
    slugs: &SlugIndex,
    link: &Link,
) -> Option<Violation> {
    let target = link.url.trim();
    if target.is_empty() {
        return None;
    }

    let problem = if let Some(anchor) = target.strip_prefix('#') {
        check_anchor(settings, slugs, anchor)
    } else if let Ok(url) = Url::parse(target) {
        match url.scheme() {
            "http" | "https" => check_external(ctx, settings, &url),
            _ => None,
        }
    } else {
        check_file(ctx.document, settings, target)
    };

    problem.map(|problem| Violation::error(rules::LINKS, problem, link.line, link.column))
}

fn check_anchor(settings: &LinkRules, slugs: &SlugIndex, anchor: &str) -> Option<String> {
    if !settings.validate_internal || slugs.contains(anchor) {
        return None;
    }
    Some(format!("link to missing anchor '#{}'", anchor))
}

fn check_file(document: &Document, settings: &LinkRules, target: &str) -> Option<String> {
    if !settings.validate_files {
        return None;
    }

    let path = target.split(['#', '?']).next().unwrap_or(target);
    // Site-absolute paths depend on the publishing root.
    if path.is_empty() || path.starts_with('/') {
        return None;
    }

    let decoded = percent_decode_str(path).decode_utf8_lossy();
    let resolved = document.directory().join(decoded.as_ref());
    if resolved.exists() {
        return None;
    }
    Some(format!("link target '{}' does not exist", path))
}

fn check_external(ctx: &Context<'_, '_>, settings: &LinkRules, url: &Url) -> Option<String> {
    let host = url.host_str().unwrap_or_default().to_ascii_lowercase();

    if settings
        .blocked_domains
        .iter()
        .any(|d| domain_matches(&host, d))
    {
        return Some(format!("link to blocked domain '{}'", host));
    }

    if !settings.allowed_domains.is_empty()
        && !settings
            .allowed_domains
            .iter()
            .any(|d| domain_matches(&host, d))
    {
        return Some(format!("link to domain '{}' is not allowed", host));
    }

    if !settings.validate_external {
        return None;
    }

    debug!(url = %url, "checking external link");
    match ctx.probe.probe(url.as_str()) {
        Ok(status) if (200..400).contains(&status) => None,
        Ok(status) => Some(format!("external link '{}' returned HTTP {}", url, status)),
        Err(error) => Some(format!("external link '{}' failed: {}", url, error)),
    }
}

/// `host` equals `domain` or is one of its subdomains.
fn domain_matches(host: &str, domain: &str) -> bool {
    let domain = domain.trim().trim_start_matches('.').to_ascii_lowercase();
    if domain.is_empty() {
        return false;
    }
    host == domain
        || host
            .strip_suffix(&domain)
            .is_some_and(|prefix| prefix.ends_with('.'))
}

#[cfg(test)]
mod tests {
    use super::domain_matches;

    #[test]
    fn test_domain_matches() {
        assert!(domain_matches("example.com", "example.com"));
        assert!(domain_matches("docs.example.com", "example.com"));
        assert!(domain_matches("docs.example.com", ".Example.com"));
        assert!(!domain_matches("badexample.com", "example.com"));
        assert!(!domain_matches("example.com", ""));
    }
}
