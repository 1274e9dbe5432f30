pub mod traits;

// Scanning service implementations
pub mod turtle_api;
