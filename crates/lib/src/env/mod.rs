//! Target environments.
//!
//! An [`Environment`] describes one toolchain configuration: the identity
//! fields that say what is being built for, and the tool fields that say how.
//!
//! # Submodules
//!
//! - [`registry`] - The fixed catalog of named environments
//! - [`transform`] - Pure variants of an environment (compiler cache, sanitizers)
//! - [`hash`] - Fingerprinting of identity fields
//! - [`finalize`] - Derived flags and build paths for one run

pub mod finalize;
pub mod hash;
pub mod registry;
pub mod transform;
mod types;

pub use finalize::{FinalEnv, finalize};
pub use hash::{EnvHash, env_id, fingerprint};
pub use registry::{EnvError, EnvRegistry};
pub use transform::{enable_cache, enable_sanitizer};
pub use types::*;
