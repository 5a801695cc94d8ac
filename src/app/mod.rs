mod root;
mod state;

pub(crate) use state::UiPrefs;

pub use root::App;
