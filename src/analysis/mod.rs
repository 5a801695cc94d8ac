//! Turning a chart screenshot into a validated [`AnalysisResult`](crate::domain::AnalysisResult).

mod extract;
mod normalize;
mod pipeline;
mod prompt;

pub use {
    extract::{extract_json_object, parse_analysis},
    normalize::{NormalizedImage, normalize_image},
    pipeline::AnalysisPipeline,
    prompt::compose_instruction,
};
