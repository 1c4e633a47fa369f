//! # Configuration
//!
//! Configuration for both hosts, loaded from environment variables.
//!
//! Secret settings are read on every request through a [`ConfigSource`], so an
//! app-setting change is picked up without a restart. Server settings are read
//! once at start-up.

mod secret;
mod server;
mod source;

pub use secret::{MissingSettings, SecretSettings};
pub use server::ServerConfig;
pub use source::{ConfigSource, EnvConfigSource, StaticConfigSource};
