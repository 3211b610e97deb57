//! Station resolution.
//!
//! One entry point, [`Resolver::resolve`], turns a [`StationQuery`] into
//! presentable stations. Each request makes at most three sequential
//! outbound calls and keeps no state afterwards.

use std::sync::Arc;

use async_trait::async_trait;

use crate::directory::{DirectoryError, DirectoryLookup};
use crate::domain::{
    Presentability, RandomLimit, ResolveError, SearchText, StationDetail, StationId,
    StationQuery, StationRecord, StationSummary,
};
use crate::geo::GeoError;
use crate::policy::ContentPolicy;

use super::filter::presentable_summaries;

/// Source of station records.
///
/// This abstraction allows the resolver to be tested with in-memory data.
#[async_trait]
pub trait StationDirectory: Send + Sync {
    /// Run a lookup, returning stations in upstream order.
    async fn stations(&self, lookup: DirectoryLookup) -> Result<Vec<StationRecord>, DirectoryError>;
}

/// Maps a network address to a city.
#[async_trait]
pub trait Geolocator: Send + Sync {
    async fn city(&self, address: &str) -> Result<String, GeoError>;
}

/// Outcome of a successful resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolved {
    /// A single station, with its raw attributes.
    Station(StationDetail),
    /// A list of at most [`crate::domain::MAX_RESULTS`] stations.
    List(Vec<StationSummary>),
}

/// The station resolution and filtering pipeline.
#[derive(Clone)]
pub struct Resolver {
    directory: Arc<dyn StationDirectory>,
    geolocator: Arc<dyn Geolocator>,
    policy: ContentPolicy,
    presentability: Presentability,
}

impl Resolver {
    pub fn new(
        directory: Arc<dyn StationDirectory>,
        geolocator: Arc<dyn Geolocator>,
        policy: ContentPolicy,
        presentability: Presentability,
    ) -> Self {
        Self {
            directory,
            geolocator,
            policy,
            presentability,
        }
    }

    /// Resolve a query.
    pub async fn resolve(&self, query: &StationQuery) -> Result<Resolved, ResolveError> {
        match query {
            StationQuery::ByUuid(id) => self.by_uuid(id).await.map(Resolved::Station),
            StationQuery::ByName(text) => self.by_name(text).await.map(Resolved::List),
            StationQuery::ByLocation(address) => {
                self.by_location(address).await.map(Resolved::List)
            }
            StationQuery::Random(limit) => self.random(*limit).await.map(Resolved::List),
        }
    }

    /// A single station, checked for content, codec and transport.
    pub async fn by_uuid(&self, id: &StationId) -> Result<StationDetail, ResolveError> {
        let records = self
            .directory
            .stations(DirectoryLookup::ByUuid(*id))
            .await?;

        let record = records.into_iter().next().ok_or(ResolveError::NoResults)?;

        self.policy.check(&record.name).await?;

        self.presentability
            .check(&record)
            .map_err(|e| ResolveError::UnsupportedFormat(format!("station {id}: {e}")))?;

        tracing::debug!(station = %id, name = %record.name, "resolved station");
        Ok(StationDetail::new(record))
    }

    /// Stations matching a name, after the query passes the content policy.
    pub async fn by_name(&self, text: &SearchText) -> Result<Vec<StationSummary>, ResolveError> {
        self.policy.check(text.as_str()).await?;
        self.list(DirectoryLookup::ByName(text.clone())).await
    }

    /// Stations in the caller's city.
    pub async fn by_location(&self, address: &str) -> Result<Vec<StationSummary>, ResolveError> {
        let city = self.geolocator.city(address).await?;
        tracing::debug!(%address, %city, "geolocated caller");
        self.list(DirectoryLookup::ByState(city)).await
    }

    /// A random sample of the directory.
    pub async fn random(&self, limit: RandomLimit) -> Result<Vec<StationSummary>, ResolveError> {
        self.list(DirectoryLookup::Random(limit)).await
    }

    async fn list(&self, lookup: DirectoryLookup) -> Result<Vec<StationSummary>, ResolveError> {
        let records = self.directory.stations(lookup).await?;

        if records.is_empty() {
            return Err(ResolveError::NoResults);
        }

        let summaries = presentable_summaries(&records, &self.presentability);
        tracing::debug!(
            upstream = records.len(),
            presentable = summaries.len(),
            "filtered station list"
        );
        Ok(summaries)
    }
}

#[cfg(test)]
#[path = "resolver_tests.rs"]
mod tests;
