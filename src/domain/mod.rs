//! Domain models and types for curvequery.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Strongly-typed identifiers** ([`MarketDataId`], [`FilterId`], [`TimeZoneId`])
//! - **Selection sum types** ([`ExtractionRange`], [`VersionSelection`], [`FillerPolicy`])
//! - **Result rows** ([`ActualRow`], [`VersionedRow`], [`BidAskRow`], ...)
//! - **Error types** ([`CurveQueryError`], [`QueryError`], [`TransportError`])
//! - **Result type alias** ([`Result`])
//!
//! # Sum types
//!
//! Every "exactly one of" choice in a query is an enum with payload, so only
//! the data of the active variant can be observed:
//!
//! ```rust
//! use curvequery::domain::{ExtractionRange, Period, RelativeInterval};
//!
//! let mut range = ExtractionRange::Period(Period::new("P5D").unwrap());
//! range = ExtractionRange::RelativeInterval(RelativeInterval::RollingMonth);
//! assert!(range.is_relative());
//! ```

pub mod errors;
pub mod filler;
pub mod ids;
pub mod kind;
pub mod period;
pub mod range;
pub mod result;
pub mod rows;
pub mod version;

// Re-export commonly used types for convenience
pub use errors::{CurveQueryError, QueryError, TransportError};
pub use filler::{BidAskFillerValue, FillerPolicy, FillerValue, MarketAssessmentFillerValue};
pub use ids::{FilterId, MarketDataId, TimeZoneId, TransformId};
pub use kind::{Granularity, QueryKind};
pub use period::Period;
pub use range::{DateRange, ExtractionRange, PeriodRange, RelativeInterval};
pub use result::Result;
pub use rows::{ActualRow, AuctionRow, AuctionSide, BidAskRow, MarketAssessmentRow, VersionedRow};
pub use version::{ResolvedWindow, VersionSelection, VersionWindow};
