mod core;
mod messages;
mod reconcile;
mod worker;

pub use core::{
    ActiveView, AnalysisBlocked, AnalysisPhase, PlanError, Screen, SelectedFile, VisionEngine,
};
pub use messages::{JobRequest, JobResult};
pub use reconcile::{ActiveAnalysis, record_outcome};
pub use worker::{process_request, spawn_analysis};
