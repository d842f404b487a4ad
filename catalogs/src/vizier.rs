//! Catalogue retrieval from the VizieR service.
//!
//! Downloads a cone around a sky position from any VizieR catalogue. For
//! the catalogues in the descriptor registry the result is augmented with
//! derived photometry (see the `photometry` crate); anything else is
//! returned as served.

use log::{debug, error, warn};
use skytable::Table;
use url::Url;

use crate::cache::ResponseCache;
use crate::descriptors::{resolve, ResolvedCatalog};
use crate::error::Result;
use crate::http;
use crate::parse::parse_vizier_tsv;

/// Endpoint returning tab-separated catalogue extracts.
pub const VIZIER_URL: &str = "https://vizier.cds.unistra.fr/viz-bin/asu-tsv";

/// Default columns requested on top of the per-catalogue extras:
/// everything VizieR serves by default plus the J2000 position and its
/// errors.
const DEFAULT_COLUMNS: [&str; 5] = ["*", "RAJ2000", "DEJ2000", "e_RAJ2000", "e_DEJ2000"];

/// Optional query knobs for a catalogue download.
#[derive(Debug, Clone, Default)]
pub struct QueryOptions {
    /// Server-side row limit; `None` means unlimited.
    pub limit: Option<usize>,
    /// Server-side column filters: column name to VizieR filter expression.
    pub filters: Vec<(String, String)>,
    /// Extra column names to request beyond the defaults.
    pub extra: Vec<String>,
}

/// Blocking VizieR client with an on-disk response cache.
pub struct VizierClient {
    http: reqwest::blocking::Client,
    cache: ResponseCache,
    endpoint: Url,
}

impl VizierClient {
    /// Client with the default cache location.
    pub fn new() -> Result<Self> {
        Ok(Self::with_cache(ResponseCache::new()?)?)
    }

    /// Client writing responses into the given cache.
    pub fn with_cache(cache: ResponseCache) -> Result<Self> {
        Self::with_endpoint(cache, Url::parse(VIZIER_URL)?)
    }

    /// Client talking to a specific endpoint. Tests point this at a local
    /// or unroutable address instead of the public service.
    pub fn with_endpoint(cache: ResponseCache, endpoint: Url) -> Result<Self> {
        Ok(Self {
            http: http::client()?,
            cache,
            endpoint,
        })
    }

    /// Download a catalogue cone around `(ra0, dec0)` with radius `sr0`,
    /// all in degrees.
    ///
    /// `selector` is a registry short name or any VizieR identifier. The
    /// first attempt may be served from the response cache; if it does not
    /// yield exactly one result table the query is retried bypassing the
    /// cache. Repeated failure is reported and gives `Ok(None)`.
    pub fn query_region(
        &self,
        ra0: f64,
        dec0: f64,
        sr0: f64,
        selector: &str,
        options: &QueryOptions,
    ) -> Result<Option<Table>> {
        let resolved = resolve(selector);
        let columns = column_list(&resolved, options);

        debug!(
            "Requesting from VizieR: {} columns: {:?}",
            resolved.vizier_id, columns
        );
        debug!("Center: {ra0} {dec0} radius: {sr0}");
        debug!("Filters: {:?}", options.filters);

        let url = self.build_url(ra0, dec0, sr0, &resolved, &columns, options);

        let mut tables = self.attempt(&url, true);
        if tables.len() != 1 {
            tables = self.attempt(&url, false);
            if tables.len() != 1 {
                error!("Error requesting catalogue {selector}");
                return Ok(None);
            }
        }

        let mut cat = tables.swap_remove(0);
        cat.set_meta("vizier_id", &resolved.vizier_id);
        cat.set_meta("name", &resolved.name);
        debug!("Got {} entries with {} columns", cat.len(), cat.n_columns());

        finalize(&resolved, &mut cat)?;
        Ok(Some(cat))
    }

    /// One fetch-and-parse attempt; failures are logged and yield no tables.
    fn attempt(&self, url: &Url, use_cache: bool) -> Vec<Table> {
        let body = if use_cache {
            match self.cache.get(url.as_str()) {
                Some(body) => Ok(body),
                None => self.download(url),
            }
        } else {
            self.download(url)
        };

        match body.and_then(|b| parse_vizier_tsv(&b)) {
            Ok(tables) => tables,
            Err(err) => {
                warn!("VizieR query failed: {err}");
                Vec::new()
            }
        }
    }

    fn download(&self, url: &Url) -> Result<String> {
        let body = self
            .http
            .get(url.clone())
            .send()?
            .error_for_status()?
            .text()?;
        if let Err(err) = self.cache.put(url.as_str(), &body) {
            warn!("Failed to cache VizieR response: {err}");
        }
        Ok(body)
    }

    fn build_url(
        &self,
        ra0: f64,
        dec0: f64,
        sr0: f64,
        resolved: &ResolvedCatalog,
        columns: &[String],
        options: &QueryOptions,
    ) -> Url {
        let mut url = self.endpoint.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("-source", &resolved.vizier_id);
            pairs.append_pair("-c", &format!("{ra0:.6} {dec0:+.6}"));
            pairs.append_pair("-c.rd", &format!("{sr0}"));
            let limit = options
                .limit
                .map(|n| n.to_string())
                .unwrap_or_else(|| "unlimited".to_string());
            pairs.append_pair("-out.max", &limit);
            for column in columns {
                pairs.append_pair("-out", column);
            }
            for (name, expression) in &options.filters {
                pairs.append_pair(name, expression);
            }
        }
        url
    }
}

/// Assemble the requested column list: defaults, caller extras, then the
/// registry extras for the catalogue.
fn column_list(resolved: &ResolvedCatalog, options: &QueryOptions) -> Vec<String> {
    let mut columns: Vec<String> = DEFAULT_COLUMNS.iter().map(|s| s.to_string()).collect();
    columns.extend(options.extra.iter().cloned());
    columns.extend(resolved.extra.iter().map(|s| s.to_string()));
    columns
}

/// Post-process a downloaded table: canonical coordinate names, then the
/// catalogue-specific photometric augmentation.
fn finalize(resolved: &ResolvedCatalog, cat: &mut Table) -> Result<()> {
    if cat.has_column("_RAJ2000") && cat.has_column("_DEJ2000") && !cat.has_column("RAJ2000") {
        cat.rename_column("_RAJ2000", "RAJ2000")?;
        cat.rename_column("_DEJ2000", "DEJ2000")?;
    }

    photometry::augment(&resolved.short_name, cat)?;
    Ok(())
}
