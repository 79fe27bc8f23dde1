pub mod app;
pub mod constants;
pub mod errors;
pub mod managers;
pub mod models;
pub mod protocol;
pub mod services;
pub mod utils;
