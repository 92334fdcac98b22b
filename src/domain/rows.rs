//! Typed result rows
//!
//! The transport hands back one JSON object per data point; each query kind
//! decodes them into its own row type.

use super::ids::MarketDataId;
use chrono::{DateTime, FixedOffset, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// One point of an actual (unversioned) series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActualRow {
    pub provider_name: String,
    pub curve_name: String,
    pub id: MarketDataId,
    pub time: DateTime<FixedOffset>,
    pub value: Option<f64>,
    #[serde(default)]
    pub competence_start: Option<DateTime<FixedOffset>>,
    #[serde(default)]
    pub competence_end: Option<DateTime<FixedOffset>>,
}

/// One point of a versioned or derived series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionedRow {
    pub provider_name: String,
    pub curve_name: String,
    pub id: MarketDataId,
    #[serde(default)]
    pub version: Option<NaiveDateTime>,
    pub time: DateTime<FixedOffset>,
    pub value: Option<f64>,
    #[serde(default)]
    pub competence_start: Option<DateTime<FixedOffset>>,
    #[serde(default)]
    pub competence_end: Option<DateTime<FixedOffset>>,
}

/// One product quote of a bid/ask series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BidAskRow {
    pub provider_name: String,
    pub curve_name: String,
    pub id: MarketDataId,
    pub product: String,
    pub time: DateTime<FixedOffset>,
    pub best_bid_price: Option<f64>,
    pub best_ask_price: Option<f64>,
    pub best_bid_quantity: Option<f64>,
    pub best_ask_quantity: Option<f64>,
    pub last_price: Option<f64>,
    pub last_quantity: Option<f64>,
}

/// One product assessment of a market assessment series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketAssessmentRow {
    pub provider_name: String,
    pub curve_name: String,
    pub id: MarketDataId,
    pub product: String,
    pub time: DateTime<FixedOffset>,
    pub settlement: Option<f64>,
    pub open: Option<f64>,
    pub close: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub volume_paid: Option<f64>,
    pub volume_given: Option<f64>,
    pub volume: Option<f64>,
}

/// Side of an auction bid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuctionSide {
    Bid,
    Offer,
}

/// One price/quantity step of an auction curve
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuctionRow {
    pub provider_name: String,
    pub curve_name: String,
    pub id: MarketDataId,
    pub bid_timestamp: NaiveDateTime,
    pub side: AuctionSide,
    pub price: f64,
    pub quantity: f64,
}
