//! Query construction, compilation and execution
//!
//! A query goes through the same stages on every `execute` call:
//!
//! 1. [`validate`] checks the builder's current [`QueryParameters`]
//! 2. a [`PartitionStrategy`] splits long id lists
//! 3. [`route::compile`] renders each partition into an [`OutboundRequest`]
//! 4. [`QueryExecutor`] dispatches every request concurrently and
//!    concatenates the rows
//!
//! The typed builders ([`ActualQuery`], [`VersionedQuery`], [`BidAskQuery`],
//! [`MarketAssessmentQuery`], [`AuctionQuery`]) are created by
//! [`QueryService`].

pub mod actual;
pub mod auction;
pub mod bid_ask;
pub mod builder;
pub mod definition;
pub mod execute;
pub mod market_assessment;
pub mod params;
pub mod partition;
pub mod route;
pub mod service;
pub mod validate;
pub mod versioned;

pub use actual::ActualQuery;
pub use auction::AuctionQuery;
pub use bid_ask::BidAskQuery;
pub use builder::{FillerBuilder, QueryBuilder};
pub use definition::QueryDefinition;
pub use execute::{plan, QueryExecutor};
pub use market_assessment::MarketAssessmentQuery;
pub use params::{IdentifierSelector, QueryParameters};
pub use partition::{PartitionByIds, PartitionStrategy, DEFAULT_PARTITION_SIZE};
pub use route::{compile, Method, OutboundRequest};
pub use service::QueryService;
pub use validate::validate;
pub use versioned::VersionedQuery;
