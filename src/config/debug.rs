//! Debugging feature flags.

#[allow(dead_code)]
pub struct LogFlags {
    /// Prompt sizes, payload sizes and model timings
    pub log_pipeline: bool,

    /// Appends, evictions and outcome updates
    pub log_history: bool,

    pub log_subscription: bool,

    /// Anything about which analysis is active
    pub log_selection: bool,

    /// Dump the whole model reply on success, not only on failure
    pub log_raw_response: bool,
}

pub const DF: LogFlags = LogFlags {
    log_selection: true,

    log_pipeline: true,
    log_history: false,
    log_subscription: false,
    log_raw_response: false,
};
