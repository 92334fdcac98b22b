//! Filler policy for missing data points

use super::period::Period;
use serde::{Deserialize, Serialize};

/// Custom filler values for bid/ask series
///
/// Only the fields that are set are sent to the service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BidAskFillerValue {
    pub best_bid_price: Option<f64>,
    pub best_ask_price: Option<f64>,
    pub best_bid_quantity: Option<f64>,
    pub best_ask_quantity: Option<f64>,
    pub last_price: Option<f64>,
    pub last_quantity: Option<f64>,
}

impl BidAskFillerValue {
    /// Query-string field name paired with each set value
    pub fn fields(&self) -> Vec<(&'static str, f64)> {
        [
            ("fillerDVbbp", self.best_bid_price),
            ("fillerDVbap", self.best_ask_price),
            ("fillerDVbbq", self.best_bid_quantity),
            ("fillerDVbaq", self.best_ask_quantity),
            ("fillerDVlp", self.last_price),
            ("fillerDVlq", self.last_quantity),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.map(|v| (name, v)))
        .collect()
    }
}

/// Custom filler values for market assessment series
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MarketAssessmentFillerValue {
    pub settlement: Option<f64>,
    pub open: Option<f64>,
    pub close: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub volume_paid: Option<f64>,
    pub volume_given: Option<f64>,
    pub volume: Option<f64>,
}

impl MarketAssessmentFillerValue {
    /// Query-string field name paired with each set value
    pub fn fields(&self) -> Vec<(&'static str, f64)> {
        [
            ("fillerDVs", self.settlement),
            ("fillerDVo", self.open),
            ("fillerDVc", self.close),
            ("fillerDVh", self.high),
            ("fillerDVl", self.low),
            ("fillerDVvp", self.volume_paid),
            ("fillerDVvg", self.volume_given),
            ("fillerDVvt", self.volume),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.map(|v| (name, v)))
        .collect()
    }
}

/// Payload of a custom-value filler, shaped by the query kind
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FillerValue {
    /// Actual, versioned and derived series
    Scalar(f64),
    /// Bid/ask series
    BidAsk(BidAskFillerValue),
    /// Market assessment series
    MarketAssessment(MarketAssessmentFillerValue),
}

impl FillerValue {
    /// Whether the payload carries nothing usable
    pub fn is_empty(&self) -> bool {
        match self {
            FillerValue::Scalar(v) => !v.is_finite(),
            FillerValue::BidAsk(v) => v.fields().is_empty(),
            FillerValue::MarketAssessment(v) => v.fields().is_empty(),
        }
    }

    /// Query-string fields carrying the payload
    pub fn fields(&self) -> Vec<(&'static str, f64)> {
        match self {
            FillerValue::Scalar(v) => vec![("fillerDV", *v)],
            FillerValue::BidAsk(v) => v.fields(),
            FillerValue::MarketAssessment(v) => v.fields(),
        }
    }
}

/// Strategy for substituting missing data points
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FillerPolicy {
    /// Server default, nothing is sent
    #[default]
    Unset,
    /// Missing points are returned as null
    Null,
    /// Missing points are omitted
    NoFill,
    /// Missing points take the latest valid value within the period
    LatestValidValue(Period),
    /// Missing points take a fixed value
    CustomValue(FillerValue),
}

impl FillerPolicy {
    /// The `fillerK` token, `None` for the server default
    pub fn kind_token(&self) -> Option<&'static str> {
        match self {
            FillerPolicy::Unset => None,
            FillerPolicy::Null => Some("Null"),
            FillerPolicy::NoFill => Some("NoFill"),
            FillerPolicy::LatestValidValue(_) => Some("LatestValidValue"),
            FillerPolicy::CustomValue(_) => Some("CustomValue"),
        }
    }
}
