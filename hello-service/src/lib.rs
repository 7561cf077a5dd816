pub mod config;
pub mod error;
pub mod observability;
pub mod services;
pub mod startup;
