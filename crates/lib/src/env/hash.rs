//! Environment fingerprinting.
//!
//! The fingerprint is a SHA-256 over the identity fields only. It names the
//! build directory, so environments that differ only in flags or tool paths
//! share one directory and its object layout.

use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::consts::ENV_HASH_PREFIX_LEN;

use super::types::{Environment, FieldValue, IdentityField};

/// Full 64-character lowercase hex fingerprint of an environment.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EnvHash(pub String);

impl EnvHash {
  /// Prefix used as the build directory name.
  pub fn short(&self) -> &str {
    &self.0[..ENV_HASH_PREFIX_LEN.min(self.0.len())]
  }
}

impl fmt::Display for EnvHash {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

/// Canonical `name=value;` string the fingerprint is computed over.
///
/// Flags render as `True`/`False` so existing build directories keep their names.
pub fn canonical_identity(env: &Environment) -> String {
  let mut result = String::new();
  for field in IdentityField::ALL {
    let value = match env.identity(field) {
      FieldValue::Text(text) => text.to_string(),
      FieldValue::Flag(true) => "True".to_string(),
      FieldValue::Flag(false) => "False".to_string(),
    };
    result.push_str(&format!("{}={};", field.as_str(), value));
  }
  result
}

/// Fingerprint an environment.
pub fn fingerprint(env: &Environment) -> EnvHash {
  let mut hasher = Sha256::new();
  hasher.update(canonical_identity(env).as_bytes());
  EnvHash(hex::encode(hasher.finalize()))
}

/// Human-readable slug: `toolchain-arch-sub-vendor-sys-abi`.
pub fn env_id(env: &Environment) -> String {
  format!(
    "{}-{}-{}-{}-{}-{}",
    env.toolchain, env.arch, env.sub, env.vendor, env.sys, env.abi
  )
}
