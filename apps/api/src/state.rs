use std::sync::Arc;

use crate::config::Config;
use crate::export::sink::DirectorySink;
use crate::export::ExportDriver;
use crate::llm_client::LlmClient;
use crate::pagination::PaginationEngine;
use crate::raster::Rasterizer;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub exporter: Arc<ExportDriver>,
    /// `None` when no AI key is configured; suggestion requests then answer 503.
    pub llm: Option<LlmClient>,
}

impl AppState {
    pub fn new(config: &Config, rasterizer: Arc<dyn Rasterizer>, llm: Option<LlmClient>) -> Self {
        let engine = PaginationEngine::new(rasterizer, config.pagination_settings());
        let mut exporter = ExportDriver::new(engine);
        if let Some(dir) = &config.export_archive_dir {
            exporter = exporter.with_archive(DirectorySink::new(dir));
        }
        AppState {
            exporter: Arc::new(exporter),
            llm,
        }
    }
}
