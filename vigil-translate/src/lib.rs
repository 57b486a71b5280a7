pub mod client;
pub mod docflow;
pub mod languages;
