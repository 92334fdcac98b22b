//! Extraction range route segment

use crate::domain::range::DATE_FORMAT;
use crate::domain::{DateRange, ExtractionRange, PeriodRange};

/// Render the canonical path segment of an extraction range
///
/// | Variant | Rendering |
/// |---|---|
/// | `DateRange` | `{start}/{end}` |
/// | `Period` | `{duration}` |
/// | `PeriodRange` | `{from}/{to}` |
/// | `RelativeInterval` | `{name}` |
pub fn range_route(range: &ExtractionRange) -> String {
    match range {
        ExtractionRange::DateRange(range) => date_range_route(range),
        ExtractionRange::Period(period) => period.to_string(),
        ExtractionRange::PeriodRange(range) => period_range_route(range),
        ExtractionRange::RelativeInterval(interval) => interval.to_string(),
    }
}

pub(crate) fn date_range_route(range: &DateRange) -> String {
    format!(
        "{}/{}",
        range.start.format(DATE_FORMAT),
        range.end.format(DATE_FORMAT)
    )
}

pub(crate) fn period_range_route(range: &PeriodRange) -> String {
    format!("{}/{}", range.from, range.to)
}
