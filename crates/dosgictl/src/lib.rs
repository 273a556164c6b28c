//! Command implementations for the dosgictl binary.

pub mod cmd_dump;
pub mod cmd_scan;
pub mod common;
