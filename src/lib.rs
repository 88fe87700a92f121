//! Pulls the links shared in a Tchap room export and appends the new ones
//! to a Grist veille table.

pub mod config;
pub mod error;
pub mod extract;
pub mod grist;
pub mod logging;
pub mod sync;
pub mod utils;
