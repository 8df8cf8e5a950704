pub mod analyze_handler;
pub mod upload_handler;
pub mod utils;
