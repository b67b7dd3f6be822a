pub mod bootstrap;

pub use bootstrap::{build_configurator, run_bootstrap};
