//! Structural validation of query parameters
//!
//! Runs before any partition is built or any request is dispatched. A query
//! that fails here never reaches the transport.

use super::params::{IdentifierSelector, QueryParameters};
use crate::domain::{
    DateRange, ExtractionRange, FillerPolicy, FillerValue, QueryError, QueryKind,
    VersionSelection,
};

/// Check every invariant of a query
///
/// # Errors
///
/// Returns the first violated rule, checked in this order: identifiers,
/// extraction range, granularity, version selection, products, filler,
/// analysis date.
pub fn validate(params: &QueryParameters) -> Result<(), QueryError> {
    let kind = params.kind();

    validate_identifiers(params)?;
    validate_range(params)?;

    if kind.uses_granularity() {
        if params.granularity.is_none() {
            return Err(QueryError::MissingGranularity {
                kind: kind.to_string(),
            });
        }
    } else if params.granularity.is_some() {
        return Err(unsupported("Granularity", kind));
    }

    validate_version(params)?;
    validate_products(params)?;
    validate_filler(params)?;
    validate_analysis_date(params)?;

    Ok(())
}

fn unsupported(option: &str, kind: QueryKind) -> QueryError {
    QueryError::UnsupportedOption {
        option: option.to_string(),
        kind: kind.to_string(),
    }
}

fn check_date_range(range: &DateRange) -> Result<(), QueryError> {
    if range.is_ordered() {
        Ok(())
    } else {
        Err(QueryError::InvalidDateRange {
            start: range.start.to_string(),
            end: range.end.to_string(),
        })
    }
}

fn validate_identifiers(params: &QueryParameters) -> Result<(), QueryError> {
    match &params.identifiers {
        None => Err(QueryError::MissingIdentifiers),
        Some(IdentifierSelector::Ids(ids)) if ids.is_empty() => {
            Err(QueryError::EmptyIdentifierList)
        }
        Some(_) => Ok(()),
    }
}

fn validate_range(params: &QueryParameters) -> Result<(), QueryError> {
    match &params.range {
        None => Err(QueryError::MissingExtractionRange),
        Some(ExtractionRange::DateRange(range)) => check_date_range(range),
        Some(_) => Ok(()),
    }
}

fn validate_version(params: &QueryParameters) -> Result<(), QueryError> {
    let kind = params.kind();

    if !kind.uses_version() {
        return match params.version {
            Some(_) => Err(unsupported("Version selection", kind)),
            None => Ok(()),
        };
    }

    let version = params
        .version
        .as_ref()
        .ok_or_else(|| QueryError::MissingVersionSelection {
            kind: kind.to_string(),
        })?;

    match version {
        VersionSelection::LastN(0) => Err(QueryError::InvalidLastN),
        VersionSelection::LastOfDays(window) | VersionSelection::LastOfMonths(window)
            if window.is_empty() =>
        {
            Err(QueryError::MissingVersionWindow {
                selector: version.selector().to_string(),
            })
        }
        _ => match version.window().and_then(|w| w.date_range.as_ref()) {
            Some(range) => check_date_range(range),
            None => Ok(()),
        },
    }
}

fn validate_products(params: &QueryParameters) -> Result<(), QueryError> {
    let kind = params.kind();

    if !kind.requires_products() {
        return match params.products {
            Some(_) => Err(unsupported("Products", kind)),
            None => Ok(()),
        };
    }

    match &params.products {
        Some(products) if !products.is_empty() => {
            if products.iter().any(|p| p.trim().is_empty()) {
                return Err(QueryError::InvalidValue {
                    field: "product".to_string(),
                    message: "product names cannot be empty".to_string(),
                });
            }
            Ok(())
        }
        _ => Err(QueryError::MissingProducts {
            kind: kind.to_string(),
        }),
    }
}

fn validate_filler(params: &QueryParameters) -> Result<(), QueryError> {
    let kind = params.kind();

    if !kind.supports_filler() {
        return match params.filler {
            FillerPolicy::Unset => Ok(()),
            _ => Err(unsupported("Filler", kind)),
        };
    }

    match &params.filler {
        FillerPolicy::LatestValidValue(period) if period.is_negative() => {
            Err(QueryError::NegativeFillerPeriod(period.to_string()))
        }
        FillerPolicy::CustomValue(value) => {
            if value.is_empty() {
                return Err(QueryError::EmptyCustomFillerValue);
            }
            let shape_matches = match value {
                FillerValue::Scalar(_) => kind.uses_granularity(),
                FillerValue::BidAsk(_) => kind == QueryKind::BidAsk,
                FillerValue::MarketAssessment(_) => kind == QueryKind::MarketAssessment,
            };
            if shape_matches {
                Ok(())
            } else {
                Err(QueryError::FillerShapeMismatch {
                    kind: kind.to_string(),
                })
            }
        }
        _ => Ok(()),
    }
}

fn validate_analysis_date(params: &QueryParameters) -> Result<(), QueryError> {
    let kind = params.kind();

    if params.analysis_date.is_none() {
        return Ok(());
    }
    if !kind.supports_analysis_date() {
        return Err(unsupported("Analysis date", kind));
    }
    match &params.range {
        Some(range) if !range.is_relative() => Err(QueryError::AnalysisDateWithAbsoluteRange),
        _ => Ok(()),
    }
}
