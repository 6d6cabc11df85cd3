use anyhow::anyhow;
use axum::{
    extract::State,
    http::{header, HeaderName, HeaderValue},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use tracing::debug;

use crate::errors::AppError;
use crate::export::sink::MemorySink;
use crate::export::DocumentKind;
use crate::host::HostDocument;
use crate::models::{CoverLetterData, ResumeData};
use crate::render::tree::VisualNode;
use crate::render::{render_cover_letter, render_resume, FormattingOptions, TemplateKind};
use crate::state::AppState;
use crate::theme::{self, ColorMode, DEFAULT_THEME_ID};

/// Body shared by both export endpoints. Every field is optional; blank document
/// fields are filled with sample content.
#[derive(Debug, Deserialize)]
#[serde(
    rename_all = "camelCase",
    bound(deserialize = "T: Deserialize<'de> + Default")
)]
pub struct ExportRequest<T> {
    #[serde(default)]
    pub data: T,
    #[serde(default)]
    pub theme: Option<String>,
    #[serde(default)]
    pub template: TemplateKind,
    #[serde(default)]
    pub formatting: FormattingOptions,
    /// Colour mode the editor is showing; restored after capture.
    #[serde(default)]
    pub dark_mode: bool,
    /// Preview scroll offset at the time of the click.
    #[serde(default)]
    pub scroll_top: f32,
}

/// POST /api/v1/export/resume
pub async fn handle_export_resume(
    State(state): State<AppState>,
    Json(req): Json<ExportRequest<ResumeData>>,
) -> Result<Response, AppError> {
    let document = render_resume(req.template, &req.data, &req.formatting);
    let name = req.data.personal_info.full_name.clone();
    export_document(&state, DocumentKind::Resume, document, &name, &req).await
}

/// POST /api/v1/export/cover-letter
pub async fn handle_export_cover_letter(
    State(state): State<AppState>,
    Json(req): Json<ExportRequest<CoverLetterData>>,
) -> Result<Response, AppError> {
    let document = render_cover_letter(req.template, &req.data, &req.formatting);
    let name = req.data.sender.full_name.clone();
    export_document(&state, DocumentKind::CoverLetter, document, &name, &req).await
}

async fn export_document<T>(
    state: &AppState,
    kind: DocumentKind,
    document: VisualNode,
    name: &str,
    req: &ExportRequest<T>,
) -> Result<Response, AppError> {
    let theme_id = req.theme.as_deref().unwrap_or(DEFAULT_THEME_ID);
    let theme = theme::lookup(theme_id);
    if theme.id != theme_id {
        debug!(requested = theme_id, "unknown theme, using default");
    }

    // Each request mounts its own document, so colour-mode overrides never cross requests.
    let host = HostDocument::with_preview(document, req.scroll_top);
    host.set_color_mode(if req.dark_mode {
        ColorMode::Dark
    } else {
        ColorMode::Light
    });

    let sink = MemorySink::new();
    let exported = state
        .exporter
        .export(&host, kind, name, theme, &sink)
        .await
        .into_result()?;

    let filename = exported.saved.filename;
    let bytes = sink
        .take(&filename)
        .ok_or_else(|| AppError::Internal(anyhow!("exported file '{filename}' missing from sink")))?;
    let disposition = HeaderValue::from_str(&format!("attachment; filename=\"{filename}\""))
        .map_err(|e| AppError::Internal(e.into()))?;

    Ok((
        [
            (header::CONTENT_TYPE, HeaderValue::from_static("application/pdf")),
            (header::CONTENT_DISPOSITION, disposition),
            (
                HeaderName::from_static("x-page-count"),
                HeaderValue::from(exported.page_count),
            ),
        ],
        bytes,
    )
        .into_response())
}
