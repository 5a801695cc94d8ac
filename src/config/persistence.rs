//! Local persistence keys and locations

/// Keys under which whole JSON values are stored
pub struct StoreKeys {
    pub subscription: &'static str,
    pub history: &'static str,
    pub burned_codes: &'static str,
}

/// Configuration for Application State Persistence
pub struct AppPersistenceConfig {
    /// Path for saving/loading eframe UI state (window, active view)
    pub state_path: &'static str,
}

/// The Master Persistence Configuration
pub struct PersistenceConfig {
    /// Default directory for the native file store
    pub directory: &'static str,
    /// Extension appended to every key by the file store
    pub file_extension: &'static str,
    pub keys: StoreKeys,
    pub app: AppPersistenceConfig,
}

pub const PERSISTENCE: PersistenceConfig = PersistenceConfig {
    directory: "vision_data",
    file_extension: "json",
    keys: StoreKeys {
        subscription: "subscription_status",
        history: "trade_history",
        burned_codes: "burned_codes",
    },
    app: AppPersistenceConfig {
        state_path: ".states.json",
    },
};
