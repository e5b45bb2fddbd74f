//! External service interactions
//!
//! - GraphQL operations and response normalization
//! - The live HTTP client and the in-memory mock source
//! - Background fetch dispatch

pub mod fetcher;
pub mod graphql;
pub mod mock;
pub mod query;

pub use fetcher::ThreadDispatcher;
pub use graphql::GraphqlClient;
pub use mock::MockDataSource;
