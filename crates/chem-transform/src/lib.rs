//! Row-level transformation of chemical inventory exports.
//!
//! Every component returns its result together with the diagnostics it
//! raised; only the batch pipeline forwards diagnostics to the log.

pub mod category;
pub mod coerce;
pub mod composite;
pub mod hazard;
pub mod identity;
pub mod numeric;
pub mod pipeline;
pub mod row;
pub mod staged;

pub use category::CodeExtractor;
pub use coerce::{coerce, coerce_cell};
pub use composite::{build_composite, build_notes};
pub use hazard::aggregate_hazard;
pub use identity::{resolve_username, transliterate, username_from_parts};
pub use numeric::{CleanedNumber, clean_field, clean_in_range, clean_number};
pub use pipeline::{BatchPipeline, BatchReport, FileReport, FileStatus, emit};
pub use row::{RowOutcome, RowStage, RowTransformer, pad_identifier};
pub use staged::Staged;
