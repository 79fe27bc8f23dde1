pub mod command_runner;
pub mod logger;
pub mod relay;
pub mod settings;
pub mod validation;
pub mod version;
