use std::sync::Arc;

use crate::domain::{AnalysisResult, Language};
use crate::error::VisionError;

/// One analysis to run off the UI thread
#[derive(Debug, Clone)]
pub struct JobRequest {
    /// Matches the engine's pending phase; a result with an older token is stale.
    pub token: u64,
    pub file_name: String,
    pub image: Arc<[u8]>,
    pub language: Language,
    /// `YYYY-MM-DD HH:mm` at the moment the analysis was triggered
    pub local_time: String,
}

/// What the worker sends back
#[derive(Debug, Clone)]
pub struct JobResult {
    pub token: u64,
    pub duration_ms: u128,
    pub outcome: Result<AnalysisResult, VisionError>,
}
