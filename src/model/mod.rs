//! Model layer - member data and query state
//!
//! - `Member` and its connection envelopes
//! - `FilterCriteria` / `SearchSpec` - what the user asked for
//! - `PaginationState` - where the user is in the result set
//! - `MemberSort` - client-side row order
//! - `ModalStack` - modal overlay management

pub mod connection;
pub mod filter;
pub mod member;
pub mod modal;
pub mod options;
pub mod pagination;
pub mod sort;

// Re-export commonly used types
pub use connection::{Connection, MemberPage, MemberStats, PageInfo};
pub use filter::{
    DateRange, EmptyStateKind, FilterCriteria, FilterPatch, SearchMode, SearchSpec,
};
pub use member::{Member, MemberStatus, VerificationStatus};
pub use options::FilterOptions;
pub use pagination::PaginationState;
pub use sort::{MemberSort, SortField};
