// src/config/mod.rs
// DOCUMENTATION: Configuration module organization
// PURPOSE: Re-export configuration components

pub mod env;
pub mod settings;

pub use env::Config;
pub use settings::{GridSettings, SearchSettings};
