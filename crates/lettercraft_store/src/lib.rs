//! # lettercraft_store
//!
//! Client-local state for LetterCraft:
//!
//! - Saved sender defaults and the signature payload
//! - Syncing form values to and from URL query strings

pub mod defaults;
pub mod error;
pub mod query;

pub use defaults::{Defaults, DefaultsStore};
pub use error::{StoreError, StoreResult};
pub use query::{build_url, parse_query, shareable_url, TEMPLATE_PARAM};
