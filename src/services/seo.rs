//! DataForSEO call sites

use super::types::{
    BacklinkSummary, CompetitorRow, KeywordVolume, RankedKeyword, SearchOptions, SerpRow,
};
use crate::core::client::ApiClient;
use crate::utils::error::{GatewayError, Result};
use serde_json::{Value, json};
use tracing::debug;

/// Endpoint paths relative to the DataForSEO v3 base URL
pub mod endpoints {
    pub const KEYWORD_VOLUME: &str = "keywords_data/google_ads/search_volume/live";
    pub const SERP_ORGANIC: &str = "serp/google/organic/live/advanced";
    pub const COMPETITORS: &str = "dataforseo_labs/google/competitors_domain/live";
    pub const BACKLINK_SUMMARY: &str = "backlinks/summary/live";
    pub const RANKED_KEYWORDS: &str = "dataforseo_labs/google/ranked_keywords/live";
}

/// SEO queries backed by DataForSEO
#[derive(Debug, Clone)]
pub struct SeoService {
    client: ApiClient,
    options: SearchOptions,
}

impl SeoService {
    pub fn new(client: ApiClient) -> Self {
        Self::with_options(client, SearchOptions::default())
    }

    pub fn with_options(client: ApiClient, options: SearchOptions) -> Self {
        Self { client, options }
    }

    pub fn options(&self) -> &SearchOptions {
        &self.options
    }

    /// Search volume for each keyword
    pub async fn keyword_volume(&self, keywords: &[String]) -> Result<Vec<KeywordVolume>> {
        if keywords.is_empty() {
            return Ok(Vec::new());
        }

        let payload = json!([{
            "keywords": keywords,
            "location_code": self.options.location_code,
            "language_code": self.options.language_code,
        }]);
        let body = self
            .client
            .call_service(endpoints::KEYWORD_VOLUME, &payload)
            .await?;
        parse_keyword_volumes(&body)
    }

    /// Organic results for a keyword, in rank order
    pub async fn serp_results(&self, keyword: &str) -> Result<Vec<SerpRow>> {
        let payload = json!([{
            "keyword": keyword,
            "location_code": self.options.location_code,
            "language_code": self.options.language_code,
            "depth": self.options.limit,
        }]);
        let body = self
            .client
            .call_service(endpoints::SERP_ORGANIC, &payload)
            .await?;
        parse_serp_rows(&body)
    }

    /// Domains competing with `target` in organic search
    pub async fn competitors(&self, target: &str) -> Result<Vec<CompetitorRow>> {
        let payload = json!([{
            "target": target,
            "location_code": self.options.location_code,
            "language_code": self.options.language_code,
            "limit": self.options.limit,
        }]);
        let body = self
            .client
            .call_service(endpoints::COMPETITORS, &payload)
            .await?;
        parse_competitors(&body, target)
    }

    /// Backlink summary, zeroed when the target has no backlink profile
    pub async fn backlink_summary(&self, target: &str) -> Result<BacklinkSummary> {
        let payload = json!([{
            "target": target,
            "internal_list_limit": 10,
            "include_subdomains": true,
        }]);
        let body = self
            .client
            .call_service(endpoints::BACKLINK_SUMMARY, &payload)
            .await?;
        parse_backlink_summary(&body, target)
    }

    /// Keywords `target` ranks for
    pub async fn ranked_keywords(&self, target: &str) -> Result<Vec<RankedKeyword>> {
        let payload = json!([{
            "target": target,
            "location_code": self.options.location_code,
            "language_code": self.options.language_code,
            "limit": self.options.limit,
        }]);
        let body = self
            .client
            .call_service(endpoints::RANKED_KEYWORDS, &payload)
            .await?;
        parse_ranked_keywords(&body)
    }
}

/// `tasks[0].result`, empty when the vendor returned no result
fn task_results(body: &Value) -> &[Value] {
    body.pointer("/tasks/0/result")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

/// `tasks[0].result[0].items`
fn result_items(body: &Value) -> &[Value] {
    task_results(body)
        .first()
        .and_then(|result| result.get("items"))
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

fn from_row<T: serde::de::DeserializeOwned>(row: &Value) -> Result<T> {
    Ok(serde_json::from_value(row.clone())?)
}

pub(crate) fn parse_keyword_volumes(body: &Value) -> Result<Vec<KeywordVolume>> {
    task_results(body).iter().map(from_row).collect()
}

pub(crate) fn parse_serp_rows(body: &Value) -> Result<Vec<SerpRow>> {
    let rows = result_items(body)
        .iter()
        .filter(|item| item.get("type").and_then(Value::as_str) == Some("organic"))
        .map(from_row)
        .collect::<Result<Vec<SerpRow>>>()?;
    debug!("Parsed {} organic rows", rows.len());
    Ok(rows)
}

pub(crate) fn parse_competitors(body: &Value, target: &str) -> Result<Vec<CompetitorRow>> {
    let rows = result_items(body)
        .iter()
        .filter_map(|item| {
            let domain = item.get("domain").and_then(Value::as_str)?;
            // The target itself is listed among its competitors
            if domain.eq_ignore_ascii_case(target) {
                return None;
            }
            let organic = item.pointer("/full_domain_metrics/organic");
            Some(CompetitorRow {
                domain: domain.to_string(),
                avg_position: item
                    .get("avg_position")
                    .and_then(Value::as_f64)
                    .unwrap_or_default(),
                intersections: item
                    .get("intersections")
                    .and_then(Value::as_u64)
                    .unwrap_or_default(),
                organic_keywords: organic
                    .and_then(|o| o.get("count"))
                    .and_then(Value::as_u64)
                    .unwrap_or_default(),
                organic_traffic: organic
                    .and_then(|o| o.get("etv"))
                    .and_then(Value::as_f64)
                    .unwrap_or_default(),
            })
        })
        .collect();
    Ok(rows)
}

pub(crate) fn parse_backlink_summary(body: &Value, target: &str) -> Result<BacklinkSummary> {
    let row = task_results(body).first().ok_or_else(|| {
        GatewayError::vendor(
            crate::core::rate_limiter::services::DATAFORSEO,
            None,
            format!("No backlink summary returned for {}", target),
        )
    })?;

    let mut summary: BacklinkSummary = from_row(row)?;
    if summary.target.is_empty() {
        summary.target = target.to_string();
    }
    Ok(summary)
}

pub(crate) fn parse_ranked_keywords(body: &Value) -> Result<Vec<RankedKeyword>> {
    let rows = result_items(body)
        .iter()
        .filter_map(|item| {
            let keyword = item
                .pointer("/keyword_data/keyword")
                .and_then(Value::as_str)?;
            let serp_item = item.pointer("/ranked_serp_element/serp_item");
            Some(RankedKeyword {
                keyword: keyword.to_string(),
                position: serp_item
                    .and_then(|s| s.get("rank_group"))
                    .and_then(Value::as_u64)
                    .unwrap_or_default() as u32,
                search_volume: item
                    .pointer("/keyword_data/keyword_info/search_volume")
                    .and_then(Value::as_u64),
                url: serp_item
                    .and_then(|s| s.get("url"))
                    .and_then(Value::as_str)
                    .map(str::to_string),
                etv: serp_item.and_then(|s| s.get("etv")).and_then(Value::as_f64),
            })
        })
        .collect();
    Ok(rows)
}
