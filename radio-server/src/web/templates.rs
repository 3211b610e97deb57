//! Askama templates for the web frontend.

use askama::Template;
use reqwest::Url;

use crate::domain::{StationDetail, StationSummary, UNKNOWN};

// ============================================================================
// Page Templates (extend base.html)
// ============================================================================

/// Home page with search form.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate;

/// Single station view with player.
#[derive(Template)]
#[template(path = "station.html")]
pub struct StationTemplate {
    pub station: StationView,
    pub attributes: Vec<(String, String)>,
}

impl StationTemplate {
    pub fn from_detail(detail: StationDetail) -> Self {
        Self {
            station: StationView::from_detail(&detail),
            attributes: detail.attributes,
        }
    }
}

/// Stations near the caller.
#[derive(Template)]
#[template(path = "local.html")]
pub struct LocalTemplate {
    pub stations: Vec<StationListItem>,
}

/// Random sample of stations.
#[derive(Template)]
#[template(path = "explore.html")]
pub struct ExploreTemplate {
    pub stations: Vec<StationListItem>,
}

/// Search results.
#[derive(Template)]
#[template(path = "search.html")]
pub struct SearchTemplate {
    pub query: String,
    pub stations: Vec<StationListItem>,
}

// ============================================================================
// View Models (for templates)
// ============================================================================

/// Station view model for the player page.
#[derive(Debug, Clone)]
pub struct StationView {
    pub name: String,
    /// Stream URL fed to the audio element
    pub link: String,
    pub country: String,
    pub homepage: Option<String>,
}

impl StationView {
    pub fn from_detail(detail: &StationDetail) -> Self {
        let record = &detail.record;
        Self {
            name: record.name.clone(),
            link: record.url.clone(),
            country: record.country.clone(),
            homepage: web_link(&record.homepage),
        }
    }
}

/// One row of a station list.
#[derive(Debug, Clone)]
pub struct StationListItem {
    pub name: String,
    pub homepage: Option<String>,
    /// Link to the station page; absent when the directory gave no id.
    pub href: Option<String>,
}

impl StationListItem {
    pub fn from_summary(summary: &StationSummary) -> Self {
        Self {
            name: summary.name.clone(),
            homepage: web_link(&summary.homepage),
            href: (!summary.uuid.is_empty()).then(|| format!("/station/{}/", summary.uuid)),
        }
    }

    pub fn from_summaries(summaries: &[StationSummary]) -> Vec<Self> {
        summaries.iter().map(Self::from_summary).collect()
    }
}

fn known(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty() && value != UNKNOWN).then(|| value.to_string())
}

/// A directory-supplied link, kept only if it is an absolute http(s) URL.
fn web_link(value: &str) -> Option<String> {
    known(value).filter(|link| {
        Url::parse(link).is_ok_and(|url| matches!(url.scheme(), "http" | "https"))
    })
}
