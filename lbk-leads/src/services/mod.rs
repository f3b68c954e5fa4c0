//! Import pipeline and lead services
//!
//! Leaf-first:
//! - `row_reader`: uploaded file → untyped rows (csv / calamine)
//! - `row_normalizer`: row → canonical lead
//! - `fingerprinter`: file content → change-detection token
//! - `lead_deduplicator`: drop candidates colliding on email
//! - `progress_reconciler`: reapply saved progress from a file's snapshot
//! - `import_orchestrator`: drives the above per file and merges into the corpus
//! - `lead_view`, `exporter`: read-side projections of the corpus

pub mod exporter;
pub mod fingerprinter;
pub mod import_orchestrator;
pub mod lead_deduplicator;
pub mod lead_view;
pub mod progress_reconciler;
pub mod row_normalizer;
pub mod row_reader;

pub use exporter::{export_leads, read_export, ExportError, ExportFile, ExportRow};
pub use fingerprinter::{fingerprint, fingerprint_bytes, Fingerprint};
pub use import_orchestrator::{DuplicatePolicy, ImportOrchestrator};
pub use lead_deduplicator::{dedupe, DedupOutcome};
pub use lead_view::{filter_leads, LeadFilter, LeadStats};
pub use progress_reconciler::reconcile;
pub use row_normalizer::{normalize, resolve};
pub use row_reader::{parse_rows, read_rows, FileFormat, ParseError, RawFile, Row};
