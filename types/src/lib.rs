//! Core domain types for CleverDict.
//!
//! Identifiers, key coercion, alias normalisation, errors and resolved
//! options. No IO, no async; every other crate in the workspace builds on
//! these.

// Pedantic lint configuration - these are intentional design choices
#![allow(clippy::missing_errors_doc)] // Result-returning functions are self-explanatory

mod alias;
mod error;
mod ident;
mod key;
mod options;

pub use alias::{AliasPolicy, normalise};
pub use error::{DictError, ErrorKind};
pub use ident::{Identifier, IdentifierError, IdentifierPolicy, is_keyword};
pub use key::{IntoKey, KeyTypeError, json_type_name};
pub use options::DictOptions;
