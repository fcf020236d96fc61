//! Card extraction for Hearthdump.
//!
//! [`ExtractionPipeline`] runs each requested card through the graph
//! resolver, writes the portraits and sound clips it reaches, and returns a
//! [`CardRecord`](hearthdump_graph::records::CardRecord) describing every
//! option and locale. Routine gaps end up as `null` in the record; only a
//! bundle that cannot be loaded fails a card, and a failed card never stops
//! the batch.

mod context;
mod error;
mod pipeline;
mod settings;

pub mod audio;
pub mod json;
pub mod portrait;

#[cfg(test)]
mod fixtures;

pub use context::CardContext;
pub use error::{Error, Result};
pub use pipeline::{BatchReport, ExtractionPipeline};
pub use settings::ExtractSettings;
