//! CLI command implementations

pub mod chunk;
pub mod index;
pub mod run;
pub mod status;
