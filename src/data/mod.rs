mod gemini;
mod storage;

pub use {
    gemini::{
        GeminiClient, GenerationOptions, ImageData, ModelRequest, ModelResponse, VisionModel,
    },
    storage::{KeyValueStore, MemoryStore, PersistentStore},
};

#[cfg(not(target_arch = "wasm32"))]
pub use storage::FileStore;

#[cfg(target_arch = "wasm32")]
pub use storage::LocalStorageStore;
