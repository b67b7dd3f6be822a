pub mod configurator;

pub use configurator::Configurator;
