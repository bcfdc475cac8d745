//! `billaudit-extract` — collaborator-facing input layer.
//!
//! The OCR and LLM collaborators are opaque; this crate parses what they
//! emit (a JSON extraction document, candidate CSVs, raw OCR text) into
//! the engine's input types. Upstream amount validation lives here: the
//! engine only ever sees finite, positive centavos.

pub mod candidates;
pub mod document;
pub mod error;
pub mod line_items;

pub use candidates::load_candidates_csv;
pub use document::{parse_document, ParsedDocument};
pub use error::ExtractError;
pub use line_items::{parse_line_items, LineItemExtraction};
