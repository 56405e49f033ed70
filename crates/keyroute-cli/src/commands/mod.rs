//! CLI command implementations.

pub mod common;
pub mod controls;
pub mod export;
pub mod play;
pub mod replay;
