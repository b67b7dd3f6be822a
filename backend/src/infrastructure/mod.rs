pub mod config;
pub mod files;
pub mod logging;
pub mod runtime_assets;
pub mod settings_loader;
