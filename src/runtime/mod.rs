//! # Runtime Module
//!
//! Start-up sequence shared by the web API and the function host.

pub mod initialization;

pub use initialization::*;
