pub mod badge;
pub mod de;
pub mod display;
pub mod entry;
pub mod filter;
pub mod scan;
pub mod settings;
pub mod signal;
