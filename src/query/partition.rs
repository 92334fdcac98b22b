//! Request partitioning
//!
//! The service caps how many curve ids a single request may carry (a limit on
//! query-string length), so one logical query over many ids becomes several
//! physical requests. Filter-based queries are expanded server-side and are
//! never split.

use super::params::{IdentifierSelector, QueryParameters};

/// Default maximum number of ids per outbound request
pub const DEFAULT_PARTITION_SIZE: usize = 25;

/// Splits one logical query into independently dispatchable partitions
pub trait PartitionStrategy: Send + Sync {
    /// Produce the partitions of `params`; every partition is a value copy
    fn partition(&self, params: &QueryParameters) -> Vec<QueryParameters>;
}

/// Contiguous, order-preserving split of the id list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartitionByIds {
    max_ids: usize,
}

impl PartitionByIds {
    /// Create a strategy with at most `max_ids` ids per partition
    ///
    /// A zero maximum is treated as one.
    pub fn new(max_ids: usize) -> Self {
        Self {
            max_ids: max_ids.max(1),
        }
    }

    /// Maximum ids per partition
    pub fn max_ids(&self) -> usize {
        self.max_ids
    }
}

impl Default for PartitionByIds {
    fn default() -> Self {
        Self::new(DEFAULT_PARTITION_SIZE)
    }
}

impl PartitionStrategy for PartitionByIds {
    fn partition(&self, params: &QueryParameters) -> Vec<QueryParameters> {
        match &params.identifiers {
            Some(IdentifierSelector::Ids(ids)) if ids.len() > self.max_ids => ids
                .chunks(self.max_ids)
                .map(|chunk| params.with_ids(chunk))
                .collect(),
            _ => vec![params.clone()],
        }
    }
}
