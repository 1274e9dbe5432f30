pub mod badge_service;
pub mod export_service;
pub mod filter_service;
pub mod ranking_service;
pub mod report_service;
pub mod scan_service;
pub mod signal_service;
pub mod transform_service;
