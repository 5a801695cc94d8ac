mod analytics;
mod dashboard;
mod header;
mod preview;
mod pricing;
mod upload;

pub(crate) use analytics::render_analytics;
pub(crate) use dashboard::render_dashboard;
pub(crate) use header::{render_error_banner, render_header};
pub(crate) use preview::render_preview;
pub(crate) use pricing::{PricingState, render_pricing};
pub(crate) use upload::render_upload;
