//! Common types for Hearthdump.
//!
//! This crate provides the identifier types shared by every Hearthdump crate:
//!
//! - [`AssetGuid`] - Catalog identifier used to enter a bundle's container table
//! - [`PathId`] - Numeric identifier of an object inside one bundle
//! - [`Locale`] - One of the client's supported locale codes
//! - [`OrderedMap`] - Insertion-ordered map for serialized output

mod error;
mod guid;
mod locale;
mod ordered_map;
mod path_id;

pub use error::{Error, Result};
pub use guid::AssetGuid;
pub use locale::Locale;
pub use ordered_map::OrderedMap;
pub use path_id::PathId;
