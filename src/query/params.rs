//! Query parameter model
//!
//! [`QueryParameters`] is the mutable configuration of one logical
//! extraction. Setters enforce only local exclusivity (an id list replaces a
//! filter id and vice versa, a new range replaces the previous one); every
//! cross-field rule is left to [`crate::query::validate`] so a half-built query
//! can still be composed and reused.

use crate::domain::{
    ExtractionRange, FillerPolicy, FilterId, Granularity, MarketDataId, QueryKind, TimeZoneId,
    TransformId, VersionSelection,
};
use chrono::NaiveDate;

/// Which curves a query reads
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentifierSelector {
    /// Explicit ordered list of curve ids
    Ids(Vec<MarketDataId>),
    /// A server-side filter expanding to curves
    Filter(FilterId),
}

/// Complete description of one extraction request
#[derive(Debug, Clone, PartialEq)]
pub struct QueryParameters {
    kind: QueryKind,
    pub identifiers: Option<IdentifierSelector>,
    pub range: Option<ExtractionRange>,
    pub granularity: Option<Granularity>,
    pub version: Option<VersionSelection>,
    pub filler: FillerPolicy,
    pub time_zone: Option<TimeZoneId>,
    pub transform: Option<TransformId>,
    pub products: Option<Vec<String>>,
    pub analysis_date: Option<NaiveDate>,
}

impl QueryParameters {
    /// Empty parameters for a query kind
    pub fn new(kind: QueryKind) -> Self {
        Self {
            kind,
            identifiers: None,
            range: None,
            granularity: None,
            version: None,
            filler: FillerPolicy::Unset,
            time_zone: None,
            transform: None,
            products: None,
            analysis_date: None,
        }
    }

    /// Kind of the query, fixed at construction
    pub fn kind(&self) -> QueryKind {
        self.kind
    }

    /// Select curves by id, clearing any filter id
    pub fn set_ids(&mut self, ids: impl IntoIterator<Item = MarketDataId>) {
        self.identifiers = Some(IdentifierSelector::Ids(ids.into_iter().collect()));
    }

    /// Select curves by filter, clearing any id list
    pub fn set_filter(&mut self, filter: FilterId) {
        self.identifiers = Some(IdentifierSelector::Filter(filter));
    }

    /// Replace the extraction range
    pub fn set_range(&mut self, range: ExtractionRange) {
        self.range = Some(range);
    }

    /// Replace the version selection
    pub fn set_version(&mut self, version: VersionSelection) {
        self.version = Some(version);
    }

    /// The id list, if curves are selected by id
    pub fn ids(&self) -> Option<&[MarketDataId]> {
        match &self.identifiers {
            Some(IdentifierSelector::Ids(ids)) => Some(ids),
            _ => None,
        }
    }

    /// Copy of these parameters restricted to a slice of ids
    pub fn with_ids(&self, ids: &[MarketDataId]) -> Self {
        let mut copy = self.clone();
        copy.identifiers = Some(IdentifierSelector::Ids(ids.to_vec()));
        copy
    }
}
