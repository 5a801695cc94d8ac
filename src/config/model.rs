//! External vision model endpoint configuration

pub struct GeminiEndpoint {
    pub base_url: &'static str,
    pub model: &'static str,
    /// Environment variable read when no key is passed on the command line
    pub api_key_env: &'static str,
}

pub struct GenerationDefaults {
    pub temperature: f32,
    /// Ask the service for `application/json` output
    pub structured_output: bool,
    /// Reasoning tokens allowed before answering. 0 disables it for latency.
    pub reasoning_budget: i32,
}

pub struct GeminiConfig {
    pub endpoint: GeminiEndpoint,
    pub generation: GenerationDefaults,
}

pub const GEMINI: GeminiConfig = GeminiConfig {
    endpoint: GeminiEndpoint {
        base_url: "https://generativelanguage.googleapis.com/v1beta",
        model: "gemini-3-flash-preview",
        api_key_env: "GEMINI_API_KEY",
    },
    generation: GenerationDefaults {
        temperature: 0.1,
        structured_output: true,
        reasoning_budget: 0,
    },
};
