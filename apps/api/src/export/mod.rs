//! Export driver — the boundary between a user-triggered download and the pagination
//! engine. It picks the element and filename for a document kind and turns every
//! pipeline failure into a user-facing notice.

pub mod sink;

use thiserror::Error;
use tracing::{error, info};

use crate::host::HostDocument;
use crate::pagination::{ExportedPdf, PaginationEngine, PaginationError};
use crate::render::{COVER_LETTER_ELEMENT_ID, RESUME_ELEMENT_ID};
use crate::theme::Theme;

use sink::{DirectorySink, DownloadSink, MirrorSink};

const DEFAULT_NAME_TOKEN: &str = "document";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Resume,
    CoverLetter,
}

impl DocumentKind {
    pub fn element_id(self) -> &'static str {
        match self {
            DocumentKind::Resume => RESUME_ELEMENT_ID,
            DocumentKind::CoverLetter => COVER_LETTER_ELEMENT_ID,
        }
    }

    pub fn file_prefix(self) -> &'static str {
        match self {
            DocumentKind::Resume => "Resume",
            DocumentKind::CoverLetter => "CoverLetter",
        }
    }
}

/// Filesystem-safe token for a person's name. Every character outside `[A-Za-z0-9]`
/// becomes `_` and the rest is lowercased. Surrounding whitespace is dropped first,
/// so padding never turns into leading or trailing underscores. Blank input yields
/// `document`.
pub fn sanitize_filename(raw: &str) -> String {
    let token: String = raw
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect();
    if token.is_empty() {
        DEFAULT_NAME_TOKEN.to_string()
    } else {
        token
    }
}

pub fn output_filename(kind: DocumentKind, name: &str) -> String {
    format!("{}-{}.pdf", kind.file_prefix(), sanitize_filename(name))
}

/// A failed export: what to show the user, and why it failed.
#[derive(Debug, Error)]
#[error("{notice}")]
pub struct ExportError {
    pub notice: String,
    #[source]
    pub source: PaginationError,
}

impl ExportError {
    fn from_pagination(source: PaginationError) -> Self {
        let notice = match &source {
            PaginationError::TargetNotFound(_) => {
                "The document preview is not ready yet. Please try again."
            }
            PaginationError::Save { .. } => "The PDF was generated but could not be saved.",
            _ => "Failed to generate PDF. Please try again.",
        };
        ExportError {
            notice: notice.to_string(),
            source,
        }
    }
}

#[derive(Debug)]
pub enum ExportOutcome {
    Saved(ExportedPdf),
    Failed(ExportError),
}

impl ExportOutcome {
    pub fn into_result(self) -> Result<ExportedPdf, ExportError> {
        match self {
            ExportOutcome::Saved(pdf) => Ok(pdf),
            ExportOutcome::Failed(err) => Err(err),
        }
    }
}

pub struct ExportDriver {
    engine: PaginationEngine,
    archive: Option<DirectorySink>,
}

impl ExportDriver {
    pub fn new(engine: PaginationEngine) -> Self {
        ExportDriver {
            engine,
            archive: None,
        }
    }

    /// Also writes every export into `archive`.
    pub fn with_archive(mut self, archive: DirectorySink) -> Self {
        self.archive = Some(archive);
        self
    }

    /// Exports the `kind` document mounted in `host` for the person called `name`.
    /// Never returns an error; failures come back as `ExportOutcome::Failed`.
    pub async fn export(
        &self,
        host: &HostDocument,
        kind: DocumentKind,
        name: &str,
        theme: &Theme,
        sink: &dyn DownloadSink,
    ) -> ExportOutcome {
        let filename = output_filename(kind, name);
        info!(filename = %filename, theme = theme.id, "export requested");

        let result = match &self.archive {
            Some(archive) => {
                let mirrored = MirrorSink {
                    primary: sink,
                    mirror: archive,
                };
                self.engine
                    .export(host, kind.element_id(), theme, &filename, &mirrored)
                    .await
            }
            None => {
                self.engine
                    .export(host, kind.element_id(), theme, &filename, sink)
                    .await
            }
        };

        match result {
            Ok(exported) => ExportOutcome::Saved(exported),
            Err(e) => {
                error!(filename = %filename, error = %e, "export failed");
                ExportOutcome::Failed(ExportError::from_pagination(e))
            }
        }
    }
}
