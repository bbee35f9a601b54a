//! Rich diagnostic error types for doxograph.
//!
//! Each subsystem defines its own error type with miette `#[diagnostic]` derives,
//! providing error codes and help text. Note that *validation findings* are not
//! errors: defects in the dataset are accumulated as [`crate::validate::Finding`]
//! values so a single run surfaces the complete defect list. The types here cover
//! infrastructure failures only (unreadable manifest, report serialization).

use miette::Diagnostic;
use thiserror::Error;

/// Top-level error type for doxograph.
///
/// Each variant wraps a subsystem-specific error, preserving the full diagnostic
/// chain (error codes, help text, source chains) through to the user.
#[derive(Debug, Error, Diagnostic)]
pub enum DoxaError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Manifest(#[from] ManifestError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Report(#[from] ReportError),
}

// ---------------------------------------------------------------------------
// Manifest errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum ManifestError {
    #[error("manifest not found: {path}")]
    #[diagnostic(
        code(doxa::manifest::not_found),
        help(
            "No dataset manifest exists at this path. Create a `doxograph.toml` \
             listing your collections, or omit --manifest to use the conventional \
             layout under the data directory."
        )
    )]
    NotFound { path: String },

    #[error("failed to read manifest {path}: {source}")]
    #[diagnostic(
        code(doxa::manifest::io),
        help("Check that the file exists and has read permissions.")
    )]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse manifest {path}: {message}")]
    #[diagnostic(
        code(doxa::manifest::parse),
        help(
            "The manifest must be valid TOML with one or more [[collection]] \
             tables, each carrying `name`, `kind`, and `path` keys."
        )
    )]
    Parse { path: String, message: String },

    #[error("manifest declares no collections")]
    #[diagnostic(
        code(doxa::manifest::empty),
        help("Add at least one [[collection]] table to the manifest.")
    )]
    Empty,

    #[error("duplicate collection name in manifest: \"{name}\"")]
    #[diagnostic(
        code(doxa::manifest::duplicate_collection),
        help("Collection names identify findings in the report and must be unique.")
    )]
    DuplicateCollection { name: String },
}

// ---------------------------------------------------------------------------
// Report errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum ReportError {
    #[error("failed to serialize report: {message}")]
    #[diagnostic(
        code(doxa::report::serialize),
        help("This is a bug in doxograph; please file a report with the dataset that triggered it.")
    )]
    Serialize { message: String },
}

/// Convenience alias for functions returning doxograph results.
pub type DoxaResult<T> = std::result::Result<T, DoxaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manifest_error_converts_to_doxa_error() {
        let err = ManifestError::NotFound {
            path: "doxograph.toml".into(),
        };
        let doxa: DoxaError = err.into();
        assert!(matches!(doxa, DoxaError::Manifest(ManifestError::NotFound { .. })));
    }

    #[test]
    fn error_display_messages_are_descriptive() {
        let err = ManifestError::DuplicateCollection {
            name: "persons".into(),
        };
        let msg = format!("{err}");
        assert!(msg.contains("persons"));
    }
}
