//! Request validation

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{DnsDumpsterError, Result};

const MAX_DOMAIN_LEN: usize = 253;

/// One hostname label: 1-63 chars, alphanumerics and inner hyphens.
static LABEL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?$").expect("Invalid regex")
});

/// Check that `domain` is a syntactically valid hostname.
///
/// A single trailing dot is accepted. Schemes, paths, ports, underscores and
/// whitespace are all rejected.
pub fn validate_domain(domain: &str) -> Result<()> {
    if is_valid_hostname(domain) {
        Ok(())
    } else {
        Err(DnsDumpsterError::InvalidDomain(domain.to_string()))
    }
}

fn is_valid_hostname(domain: &str) -> bool {
    let name = domain.strip_suffix('.').unwrap_or(domain);
    if name.is_empty() || name.len() > MAX_DOMAIN_LEN {
        return false;
    }
    name.split('.').all(|label| LABEL_RE.is_match(label))
}

/// Check that `page` is a positive page number
pub fn validate_page(page: u32) -> Result<()> {
    if page == 0 {
        return Err(DnsDumpsterError::InvalidArgument(format!(
            "page must be a positive integer, got {}",
            page
        )));
    }
    Ok(())
}

/// A validated lookup of one page of results for one domain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    domain: String,
    page: u32,
}

impl FetchRequest {
    pub fn new(domain: &str, page: u32) -> Result<Self> {
        validate_domain(domain)?;
        validate_page(page)?;
        Ok(Self {
            domain: domain.to_string(),
            page,
        })
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    /// `{base_host}/domain/{domain}?page={page}`
    pub fn url(&self, base_host: &str) -> String {
        format!("{}/domain/{}?page={}", base_host, self.domain, self.page)
    }
}
