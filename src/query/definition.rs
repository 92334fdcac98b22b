//! Declarative query definitions
//!
//! A query can be described in a TOML file instead of builder calls. The CLI
//! reads these files to compile or run a query.
//!
//! ```toml
//! kind = "versioned"
//! ids = [100000001]
//! granularity = "Day"
//! range = { relative_interval = "RollingMonth" }
//! version = { last_of_months = { period = "P-4M" } }
//! ```

use super::params::QueryParameters;
use crate::domain::{
    CurveQueryError, ExtractionRange, FillerPolicy, FilterId, Granularity, MarketDataId,
    QueryError, QueryKind, Result, TimeZoneId, TransformId, VersionSelection,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One query, as read from a definition file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QueryDefinition {
    pub kind: QueryKind,

    #[serde(default)]
    pub ids: Option<Vec<MarketDataId>>,

    #[serde(default)]
    pub filter_id: Option<FilterId>,

    #[serde(default)]
    pub granularity: Option<Granularity>,

    #[serde(default)]
    pub range: Option<ExtractionRange>,

    #[serde(default)]
    pub version: Option<VersionSelection>,

    #[serde(default)]
    pub filler: FillerPolicy,

    #[serde(default)]
    pub time_zone: Option<TimeZoneId>,

    #[serde(default)]
    pub transform: Option<TransformId>,

    #[serde(default)]
    pub products: Option<Vec<String>>,

    #[serde(default)]
    pub analysis_date: Option<NaiveDate>,
}

impl QueryDefinition {
    /// Parse a definition from TOML text
    ///
    /// # Errors
    ///
    /// Returns [`CurveQueryError::Configuration`] for malformed TOML or
    /// unknown fields.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| {
            CurveQueryError::Configuration(format!("Failed to parse query definition: {e}"))
        })
    }

    /// Read a definition file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            CurveQueryError::Io(format!(
                "Failed to read query definition {}: {e}",
                path.display()
            ))
        })?;
        Self::from_toml_str(&content)
    }

    /// Convert into builder state
    ///
    /// Only the identifier conflict is checked here; every other rule is
    /// left to validation at execution time.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::ConflictingIdentifiers`] when both `ids` and
    /// `filter_id` are present.
    pub fn into_parameters(self) -> std::result::Result<QueryParameters, QueryError> {
        let mut params = QueryParameters::new(self.kind);

        match (self.ids, self.filter_id) {
            (Some(_), Some(_)) => return Err(QueryError::ConflictingIdentifiers),
            (Some(ids), None) => params.set_ids(ids),
            (None, Some(filter)) => params.set_filter(filter),
            (None, None) => {}
        }

        params.range = self.range;
        params.granularity = self.granularity;
        params.version = self.version;
        params.filler = self.filler;
        params.time_zone = self.time_zone;
        params.transform = self.transform;
        params.products = self.products;
        params.analysis_date = self.analysis_date;

        Ok(params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FillerValue, Period, PeriodRange, RelativeInterval, VersionWindow};
    use crate::query::route::compile;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_versioned_definition() {
        let definition = QueryDefinition::from_toml_str(
            r#"
kind = "versioned"
ids = [100000001]
granularity = "Day"
range = { relative_interval = "RollingMonth" }
version = { last_of_months = { period_range = { from = "P-4M", to = "P20D" } } }
"#,
        )
        .unwrap();

        assert_eq!(definition.kind, QueryKind::Versioned);
        assert_eq!(
            definition.version,
            Some(VersionSelection::LastOfMonths(VersionWindow::period_range(
                PeriodRange::new(Period::new("P-4M").unwrap(), Period::new("P20D").unwrap())
            )))
        );

        let params = definition.into_parameters().unwrap();
        assert_eq!(
            compile(&params).unwrap().path,
            "vts/LastOfMonths/P-4M/P20D/Day/RollingMonth"
        );
    }

    #[test]
    fn test_parse_filler_variants() {
        let null = QueryDefinition::from_toml_str(
            "kind = \"actual\"\nfilter_id = 4\nfiller = \"null\"\n",
        )
        .unwrap();
        assert_eq!(null.filler, FillerPolicy::Null);

        let custom = QueryDefinition::from_toml_str(
            "kind = \"actual\"\nfilter_id = 4\nfiller = { custom_value = 1.5 }\n",
        )
        .unwrap();
        assert_eq!(
            custom.filler,
            FillerPolicy::CustomValue(FillerValue::Scalar(1.5))
        );
    }

    #[test]
    fn test_date_range_definition() {
        let definition = QueryDefinition::from_toml_str(
            r#"
kind = "actual"
ids = [100000001]
granularity = "Day"
time_zone = "UTC"
range = { date_range = { start = "2018-01-01", end = "2018-01-10" } }
"#,
        )
        .unwrap();

        let request = compile(&definition.into_parameters().unwrap()).unwrap();
        assert_eq!(
            request.path_and_query(),
            "ts/Day/2018-01-01/2018-01-10?id=100000001&tz=UTC"
        );
    }

    #[test]
    fn test_conflicting_identifiers() {
        let definition = QueryDefinition::from_toml_str(
            "kind = \"actual\"\nids = [1]\nfilter_id = 2\n",
        )
        .unwrap();

        assert_eq!(
            definition.into_parameters(),
            Err(QueryError::ConflictingIdentifiers)
        );
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result = QueryDefinition::from_toml_str("kind = \"actual\"\nmarket = 1\n");
        assert!(matches!(result, Err(CurveQueryError::Configuration(_))));
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "kind = \"auction\"\nids = [1, 2]\nrange = {{ relative_interval = \"RollingWeek\" }}"
        )
        .unwrap();

        let definition = QueryDefinition::from_file(file.path()).unwrap();
        assert_eq!(definition.kind, QueryKind::Auction);
        assert_eq!(
            definition.range,
            Some(ExtractionRange::RelativeInterval(
                RelativeInterval::RollingWeek
            ))
        );
    }

    #[test]
    fn test_missing_file() {
        let result = QueryDefinition::from_file(Path::new("/nonexistent/query.toml"));
        assert!(matches!(result, Err(CurveQueryError::Io(_))));
    }
}
