//! Version selection route segment
//!
//! Never looks at the extraction range; the two segments are rendered
//! independently and concatenated by the caller.

use super::range::{date_range_route, period_range_route};
use crate::domain::version::VERSION_FORMAT;
use crate::domain::{QueryError, ResolvedWindow, VersionSelection, VersionWindow};

/// Render the version path segment
///
/// `MostRecent` falls back to the bare selector when no inner window is set;
/// `LastOfDays`/`LastOfMonths` have no bare form and fail instead.
///
/// # Errors
///
/// Returns [`QueryError::MissingVersionWindow`] for a `LastOf*` selection
/// without an inner window.
pub fn version_route(selection: &VersionSelection) -> Result<String, QueryError> {
    match selection {
        VersionSelection::LastN(n) => Ok(format!("Last{n}")),
        VersionSelection::MostRecent(window) => Ok(windowed("MostRecent", window)
            .unwrap_or_else(|| "MostRecent".to_string())),
        VersionSelection::LastOfDays(window) | VersionSelection::LastOfMonths(window) => {
            windowed(selection.selector(), window).ok_or_else(|| {
                QueryError::MissingVersionWindow {
                    selector: selection.selector().to_string(),
                }
            })
        }
        VersionSelection::Muv { .. } => Ok("MUV".to_string()),
        VersionSelection::Version(version) => {
            Ok(format!("Version/{}", version.format(VERSION_FORMAT)))
        }
    }
}

/// The `versionLimit` query value of a capped MUV selection
pub fn version_limit(selection: &VersionSelection) -> Option<String> {
    match selection {
        VersionSelection::Muv { limit: Some(limit) } => {
            Some(limit.format(VERSION_FORMAT).to_string())
        }
        _ => None,
    }
}

fn windowed(selector: &str, window: &VersionWindow) -> Option<String> {
    match window.resolve() {
        ResolvedWindow::DateRange(range) => {
            Some(format!("{selector}/{}", date_range_route(range)))
        }
        ResolvedWindow::Period(period) => Some(format!("{selector}/{period}")),
        ResolvedWindow::PeriodRange(range) => {
            Some(format!("{selector}/{}", period_range_route(range)))
        }
        ResolvedWindow::Bare => None,
    }
}
