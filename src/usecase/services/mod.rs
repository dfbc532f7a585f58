pub mod import_service;
pub mod record_composer;
pub mod region_detector;
