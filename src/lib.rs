pub mod cli;
pub mod config;
pub mod entity;
pub mod error;
pub mod form;
pub mod reminder;
pub mod snapshot;
pub mod storage;
pub mod warnings;

pub use error::{ResolveError, Result, StoreError};
pub use storage::DecisionLogStore;
