// src/lib.rs
// DOCUMENTATION: Library root shared by the server and the command line tools
// PURPOSE: Expose configuration, models, services and handlers to every binary

pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod services;

pub use config::Config;
pub use errors::PlacesError;
