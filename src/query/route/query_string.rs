//! Query-string parameters of a compiled request
//!
//! Appended independently of the path segments, in a fixed order so that
//! the same configuration always renders to the same bytes.

use super::version::version_limit;
use crate::domain::range::DATE_FORMAT;
use crate::query::params::{IdentifierSelector, QueryParameters};

/// Build the ordered `(name, value)` pairs of a query
///
/// Order: `id`/`filterId`, `p`, `tz`, `tr`, `versionLimit`, `fillerK`,
/// filler value fields, `ad`.
pub fn query_pairs(params: &QueryParameters) -> Vec<(String, String)> {
    let mut pairs = Vec::new();

    match &params.identifiers {
        Some(IdentifierSelector::Ids(ids)) => {
            pairs.extend(ids.iter().map(|id| ("id".to_string(), id.to_string())));
        }
        Some(IdentifierSelector::Filter(filter)) => {
            pairs.push(("filterId".to_string(), filter.to_string()));
        }
        None => {}
    }

    if let Some(products) = &params.products {
        pairs.extend(products.iter().map(|p| ("p".to_string(), p.clone())));
    }

    if let Some(tz) = &params.time_zone {
        pairs.push(("tz".to_string(), tz.to_string()));
    }

    if let Some(transform) = &params.transform {
        pairs.push(("tr".to_string(), transform.to_string()));
    }

    if let Some(limit) = params.version.as_ref().and_then(version_limit) {
        pairs.push(("versionLimit".to_string(), limit));
    }

    if let Some(token) = params.filler.kind_token() {
        pairs.push(("fillerK".to_string(), token.to_string()));
    }
    pairs.extend(filler_fields(params));

    if let Some(date) = &params.analysis_date {
        if params.range.as_ref().map_or(false, |r| r.is_relative()) {
            pairs.push(("ad".to_string(), date.format(DATE_FORMAT).to_string()));
        }
    }

    pairs
}

fn filler_fields(params: &QueryParameters) -> Vec<(String, String)> {
    use crate::domain::FillerPolicy;

    match &params.filler {
        FillerPolicy::LatestValidValue(period) => {
            vec![("fillerP".to_string(), period.to_string())]
        }
        FillerPolicy::CustomValue(value) => value
            .fields()
            .into_iter()
            .map(|(name, v)| (name.to_string(), v.to_string()))
            .collect(),
        _ => Vec::new(),
    }
}

/// Percent-encode pairs into a query string
pub fn encode(pairs: &[(String, String)]) -> String {
    url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs)
        .finish()
}
