//! CleverDict: an ordered map whose entries are also attributes.
//!
//! [`CleverDict`] keeps one insertion-ordered entry store and exposes it two
//! ways: as a mapping (`get`/`set`/`delete` by key) and through attribute
//! facades ([`Attrs`], [`AttrsMut`]) addressed by identifier. Both views
//! observe and mutate the same entries.
//!
//! ```
//! use cleverdict_core::CleverDict;
//!
//! let mut dict = CleverDict::from_pairs([("x", 1), ("y", 2)]).unwrap();
//! dict.attrs_mut().set("y", 3).unwrap();
//! assert_eq!(dict.get("y"), Ok(&3));
//! assert_eq!(dict.iter().collect::<Vec<_>>(), [("x", &1), ("y", &3)]);
//! ```

mod attrs;
mod codec;
mod dict;
pub mod hook;
pub mod iter;

pub use attrs::{Attrs, AttrsMut};
pub use dict::CleverDict;
pub use hook::{Change, ChangeHook};

pub use cleverdict_types::{
    AliasPolicy, DictError, DictOptions, ErrorKind, Identifier, IdentifierError,
    IdentifierPolicy, IntoKey, KeyTypeError,
};
