// Query facade for the `tour_images` table: thin wrappers over
// `ApiClient` with the resource path fixed.

use crate::api::{ApiClient, ApiResult};
use crate::record::{NewImage, StoredImage};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

pub const TOUR_IMAGES: &str = "tour_images";

/// Ordered filter parameters forwarded verbatim as query pairs. Keys may
/// carry the service's operator suffix (`total_usage[gt]`); it is not
/// interpreted here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filters(Vec<(String, String)>);

impl Filters {
    pub fn new() -> Self {
        Filters::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.0.push((key.into(), value.to_string()));
        self
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Filters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
        write!(f, "{{{}}}", parts.join(", "))
    }
}

/// One `KEY=VALUE` argument, split at the first `=`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterPair(pub String, pub String);

impl FromStr for FilterPair {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('=') {
            Some((key, value)) if !key.trim().is_empty() => {
                Ok(FilterPair(key.trim().to_string(), value.to_string()))
            }
            _ => Err(format!("expected KEY=VALUE, got {:?}", s)),
        }
    }
}

impl FromIterator<FilterPair> for Filters {
    fn from_iter<I: IntoIterator<Item = FilterPair>>(iter: I) -> Self {
        Filters(iter.into_iter().map(|FilterPair(k, v)| (k, v)).collect())
    }
}

/// Client for the tour images table.
#[derive(Clone)]
pub struct TourImages {
    api: ApiClient,
}

impl TourImages {
    pub fn new(api: ApiClient) -> Self {
        TourImages { api }
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// Fetch up to `limit` records.
    pub fn list_all(&self, limit: u32) -> ApiResult {
        self.api
            .list(TOUR_IMAGES, &[("limit".to_string(), limit.to_string())])
    }

    pub fn get_by_id(&self, id: &str) -> ApiResult {
        self.api.get_by_id(TOUR_IMAGES, id)
    }

    /// Fetch records matching `filters`, passed through unchanged.
    pub fn search(&self, filters: &Filters) -> ApiResult {
        debug!(%filters, "searching tour images");
        self.api.list(TOUR_IMAGES, filters.pairs())
    }

    pub fn create(&self, image: &NewImage) -> ApiResult {
        self.api.create(TOUR_IMAGES, image)
    }
}

/// Keep records with a related program whose wholesaler name contains
/// `wholesaler` and/or whose code contains `code` (case-insensitive).
/// The service cannot filter inside `related_programs_log`, so this runs
/// on fetched records. Records that fail to decode are dropped.
pub fn filter_by_program(
    records: &[Value],
    wholesaler: Option<&str>,
    code: Option<&str>,
) -> Vec<StoredImage> {
    let wholesaler = wholesaler.map(str::to_lowercase);
    let code = code.map(str::to_lowercase);

    records
        .iter()
        .filter_map(|v| match StoredImage::from_value(v) {
            Ok(img) => Some(img),
            Err(e) => {
                debug!(error = %e, "skipping undecodable record");
                None
            }
        })
        .filter(|img| {
            let programs = &img.related_programs_log;
            if programs.is_empty() {
                return false;
            }
            let wholesaler_ok = wholesaler.as_deref().map_or(true, |w| {
                programs.iter().any(|p| p.name.to_lowercase().contains(w))
            });
            let code_ok = code.as_deref().map_or(true, |c| {
                programs.iter().any(|p| p.code.to_lowercase().contains(c))
            });
            wholesaler_ok && code_ok
        })
        .collect()
}
