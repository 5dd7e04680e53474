//! Remote package index
//!
//! The index is a single JSON document with `plugins` and `themes` sections,
//! each mapping a slug to its package record. Lookup happens against an
//! in-memory copy for the duration of one invocation; there is no on-disk
//! caching.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::Deserialize;

use crate::domain::{InstallBatch, Package, PackageKind};
use crate::error::{GpmError, Result};

/// Public package index queried when no override is given
pub const DEFAULT_REPOSITORY: &str = "https://getgrav.org/downloads/packages.json";

#[derive(Debug, Deserialize)]
struct IndexDocument {
    #[serde(default)]
    plugins: BTreeMap<String, Package>,
    #[serde(default)]
    themes: BTreeMap<String, Package>,
}

/// In-memory view of the remote package index for one invocation
#[derive(Debug)]
pub struct Registry {
    plugins: BTreeMap<String, Package>,
    themes: BTreeMap<String, Package>,
}

impl Registry {
    /// Fetch and parse the index at `repository_url`. `force` asks any
    /// intermediary caches to revalidate; the registry itself never caches.
    pub fn fetch(repository_url: &str, force: bool) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .connect_timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| GpmError::RegistryFetchFailed {
                url: repository_url.to_string(),
                reason: format!("failed to initialize HTTP client: {e}"),
            })?;

        let mut request = client.get(repository_url);
        if force {
            request = request.header(reqwest::header::CACHE_CONTROL, "no-cache");
        }

        let response = request.send().map_err(|e| GpmError::RegistryFetchFailed {
            url: repository_url.to_string(),
            reason: e.to_string(),
        })?;

        if !response.status().is_success() {
            return Err(GpmError::RegistryFetchFailed {
                url: repository_url.to_string(),
                reason: format!("HTTP {}", response.status()),
            });
        }

        let body = response.text().map_err(|e| GpmError::RegistryFetchFailed {
            url: repository_url.to_string(),
            reason: e.to_string(),
        })?;

        Self::parse(&body)
    }

    /// Parse an index document from its JSON text
    pub fn parse(body: &str) -> Result<Self> {
        let document: IndexDocument =
            serde_json::from_str(body).map_err(|e| GpmError::RegistryParseFailed {
                reason: e.to_string(),
            })?;

        Ok(Self {
            plugins: tag(document.plugins, PackageKind::Plugin),
            themes: tag(document.themes, PackageKind::Theme),
        })
    }

    /// Resolve the requested identifiers into an install batch. Identifiers
    /// are case-normalized to lowercase before lookup; unknown ones are
    /// collected in `not_found`. Plugins come before themes in batch order.
    pub fn find_packages(&self, requested: &[String]) -> InstallBatch {
        let mut batch = InstallBatch::default();

        // Lowercase and deduplicate while keeping first-seen order, so a
        // repeated identifier is fetched and installed once
        let mut wanted: Vec<String> = Vec::new();
        for slug in requested {
            let slug = slug.to_lowercase();
            if !wanted.contains(&slug) {
                wanted.push(slug);
            }
        }

        for section in [&self.plugins, &self.themes] {
            for slug in &wanted {
                if let Some(package) = section.get(slug) {
                    batch.packages.push(package.clone());
                }
            }
        }

        for slug in wanted {
            let known =
                self.plugins.contains_key(&slug) || self.themes.contains_key(&slug);
            if !known {
                batch.not_found.push(slug);
            }
        }

        batch
    }
}

fn tag(
    section: BTreeMap<String, Package>,
    kind: PackageKind,
) -> BTreeMap<String, Package> {
    section
        .into_iter()
        .map(|(slug, mut package)| {
            package.kind = Some(kind);
            (slug, package)
        })
        .collect()
}
