//! # doxograph
//!
//! Integrity validator and analytics engine for the doxograph encyclopedia
//! datasets: JSON collections of historical figures, entities (ideologies,
//! religions, events, texts), and the typed relationships between them.
//!
//! ## Architecture
//!
//! - **Dataset layer** (`dataset`): manifest, permissive record parsing,
//!   missing-file tolerance
//! - **Validation** (`validate`): schema checks, identity registry,
//!   relationship integrity; every defect accumulated as a finding, never
//!   an early exit
//! - **Analytics** (`graph`): degree counts, orphan sets, connectivity
//!   ranking, component statistics over the immutable graph snapshot
//! - **Reporting** (`report`): severity-classified findings with a three-way
//!   outcome (fail / pass-with-warnings / clean-pass)
//!
//! ## Library usage
//!
//! ```no_run
//! use std::path::Path;
//! use doxograph::dataset::DatasetManifest;
//!
//! let manifest = DatasetManifest::conventional(Path::new("data"));
//! let report = doxograph::pipeline::run(&manifest);
//! if report.outcome.is_failure() {
//!     eprintln!("{} errors", report.errors);
//! }
//! ```

pub mod dataset;
pub mod error;
pub mod graph;
pub mod pipeline;
pub mod report;
pub mod validate;
