//! Card object graph traversal for Hearthdump.
//!
//! A card is a small graph of serialized objects spread over several
//! bundles. [`GraphResolver`] walks it from the card's root GUID down to
//! `Texture2D` and `AudioClip` leaves, applying locale redirection at the
//! last hop. The [`records`] module holds the descriptive output built from
//! those walks.

mod error;
mod options;
mod resolver;

pub mod nodes;
pub mod records;

#[cfg(test)]
mod fixtures;

pub use error::{Error, Result};
pub use options::{AudioOption, EffectArity, ImageOption};
pub use resolver::{GraphResolver, ImageResolution, SoundSpellGraph, SpecificVoice};
