//! ESGF facet search source.
//!
//! One blocking `GET` per project:
//!
//! ```text
//! <base_url>?project=CMIP6&limit=0&facets=source_id,variable_id
//! ```
//!
//! `limit=0` asks for no datasets, only the facet counts. The response body
//! carries `facet_counts.facet_fields`, a map from facet name to a flat array
//! of alternating values and counts:
//!
//! ```json
//! {"facet_counts": {"facet_fields": {"source_id": ["CESM2", 120, "MIROC6", 98]}}}
//! ```

use crate::retry::RetryPolicy;
use crate::{HarvestError, TermSource};
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::time::Duration;
use wut_core::config::RemoteConfig;
use wut_core::Triple;

#[derive(Debug, Deserialize)]
struct FacetResponse {
    facet_counts: FacetCounts,
}

#[derive(Debug, Deserialize)]
struct FacetCounts {
    facet_fields: BTreeMap<String, Vec<Value>>,
}

/// HTTP client for a faceted search endpoint.
#[derive(Debug, Clone)]
pub struct FacetSearch {
    client: reqwest::blocking::Client,
    base_url: String,
    retry: RetryPolicy,
}

impl FacetSearch {
    /// A client with the given per-request timeout and no retries.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("wut/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
            retry: RetryPolicy::none(),
        })
    }

    pub fn from_config(remote: &RemoteConfig) -> Result<Self, reqwest::Error> {
        Ok(Self::new(&remote.base_url, remote.timeout())?
            .with_retry(RetryPolicy::new(remote.max_retries, remote.backoff())))
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn fetch(&self, project: &str, facets: &[String]) -> Result<Value, HarvestError> {
        let transport = |source| HarvestError::Transport {
            project: project.to_string(),
            source,
        };
        let resp = self
            .client
            .get(&self.base_url)
            .query(&[
                ("project", project),
                ("limit", "0"),
                ("facets", facets.join(",").as_str()),
            ])
            .send()
            .map_err(transport)?;

        let status = resp.status();
        if !status.is_success() {
            return Err(HarvestError::Status {
                project: project.to_string(),
                status,
            });
        }
        resp.json::<Value>().map_err(|e| {
            if e.is_decode() {
                HarvestError::Payload {
                    project: project.to_string(),
                    reason: format!("response body is not JSON: {e}"),
                }
            } else {
                transport(e)
            }
        })
    }
}

impl TermSource for FacetSearch {
    fn harvest_project(
        &self,
        project: &str,
        facets: &[String],
    ) -> Result<Vec<Triple>, HarvestError> {
        tracing::debug!(project, ?facets, url = %self.base_url, "querying facets");
        let body = self.retry.run(|| self.fetch(project, facets))?;
        flatten_facet_fields(project, body)
    }
}

/// Turn a facet search response into triples, keeping the value at every
/// even index of each facet array and dropping the counts.
pub fn flatten_facet_fields(project: &str, body: Value) -> Result<Vec<Triple>, HarvestError> {
    let payload_error = |reason: String| HarvestError::Payload {
        project: project.to_string(),
        reason,
    };
    let response: FacetResponse =
        serde_json::from_value(body).map_err(|e| payload_error(e.to_string()))?;

    let mut triples = Vec::new();
    for (facet, values) in response.facet_counts.facet_fields {
        for (i, value) in values.into_iter().enumerate().step_by(2) {
            match value {
                Value::String(term) => triples.push(Triple::new(term, facet.as_str(), project)),
                other => {
                    return Err(payload_error(format!(
                        "facet {facet:?} has non-string term {other} at index {i}"
                    )))
                }
            }
        }
    }
    Ok(triples)
}
