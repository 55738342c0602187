//! Domain records

use serde::{Deserialize, Serialize};

/// Location and language shared by DataForSEO queries
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchOptions {
    /// DataForSEO location code, 2840 is the United States
    pub location_code: u32,
    pub language_code: String,
    /// Maximum rows requested from list endpoints
    pub limit: u32,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            location_code: 2840,
            language_code: "en".to_string(),
            limit: 100,
        }
    }
}

/// Monthly search volume for one keyword
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct KeywordVolume {
    pub keyword: String,
    pub search_volume: Option<u64>,
    pub cpc: Option<f64>,
    /// `LOW`, `MEDIUM` or `HIGH`
    pub competition: Option<String>,
    pub competition_index: Option<u32>,
}

/// One organic result on a search results page
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SerpRow {
    pub rank_group: u32,
    pub rank_absolute: u32,
    pub domain: String,
    pub title: String,
    pub url: String,
    pub description: Option<String>,
}

/// A domain competing for the same organic keywords
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CompetitorRow {
    pub domain: String,
    pub avg_position: f64,
    /// Keywords both domains rank for
    pub intersections: u64,
    pub organic_keywords: u64,
    /// Estimated monthly organic traffic
    pub organic_traffic: f64,
}

/// Backlink profile of a target
///
/// Accepts both the vendor's field names and the zeroed names used when a
/// target has no profile.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BacklinkSummary {
    pub target: String,
    pub rank: u64,
    #[serde(alias = "backlinks")]
    pub backlinks_count: u64,
    #[serde(alias = "referring_domains")]
    pub referring_domains_count: u64,
    pub referring_main_domains: u64,
    pub referring_ips: u64,
    pub broken_backlinks: u64,
    pub dofollow: u64,
    pub nofollow: u64,
}

/// A keyword a domain currently ranks for
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RankedKeyword {
    pub keyword: String,
    pub position: u32,
    pub search_volume: Option<u64>,
    pub url: Option<String>,
    /// Estimated traffic from this keyword
    pub etv: Option<f64>,
}

/// Generated text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Completion {
    pub service: String,
    pub model: String,
    pub text: String,
}
