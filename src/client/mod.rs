pub mod analysis;
pub mod client_manager;
pub mod mux;
