//! The fixed catalog of named environments.
//!
//! The catalog is built once and never mutated. Variants for a single run
//! come from [`super::transform`], which returns new values.

use std::collections::BTreeMap;

use thiserror::Error;

use super::types::Environment;

#[derive(Debug, Error)]
pub enum EnvError {
  #[error("unknown environment '{name}' (available: {available})")]
  UnknownEnvironment { name: String, available: String },
}

/// Immutable, ordered catalog of environments.
#[derive(Debug, Clone)]
pub struct EnvRegistry {
  envs: Vec<(String, Environment)>,
}

/// Host system name as used in `sys` (`linux`, `darwin`, ...).
fn host_sys() -> &'static str {
  match std::env::consts::OS {
    "macos" => "darwin",
    other => other,
  }
}

fn clang(arch: &str, sub: &str, sys: &str, abi: &str, freestanding: bool) -> Environment {
  Environment {
    toolchain: "clang".to_string(),
    arch: arch.to_string(),
    sub: sub.to_string(),
    vendor: "unknown".to_string(),
    sys: sys.to_string(),
    abi: abi.to_string(),
    freestanding,
    cc: "clang".to_string(),
    cflags: String::new(),
    cxx: "clang++".to_string(),
    cxxflags: String::new(),
    ld: "clang++".to_string(),
    ldflags: String::new(),
    ar: "llvm-ar".to_string(),
    arflags: "rcs".to_string(),
    asm: "nasm".to_string(),
    asflags: String::new(),
    extra: BTreeMap::new(),
  }
}

fn host() -> Environment {
  clang("x86", "64", host_sys(), "unknown", false)
}

fn efi_x86_64() -> Environment {
  let cflags = "-target x86_64-unknown-windows -ffreestanding -fno-stack-protector -fshort-wchar -mno-red-zone";
  Environment {
    cflags: cflags.to_string(),
    cxxflags: cflags.to_string(),
    ldflags: "-target x86_64-unknown-windows -nostdlib -Wl,-entry:efi_main -Wl,-subsystem:efi_application \
              -fuse-ld=lld-link"
      .to_string(),
    ..clang("x86", "64", "efi", "ms", true)
  }
}

fn hjert_x86_32() -> Environment {
  let cflags = "-target i386-none-elf -ffreestanding -fno-stack-protector";
  Environment {
    cflags: cflags.to_string(),
    cxxflags: cflags.to_string(),
    ldflags: "-target i386-none-elf -nostdlib".to_string(),
    asflags: "-f elf32".to_string(),
    ..clang("x86", "32", "hjert", "sysv", true)
  }
}

impl EnvRegistry {
  /// The builtin catalog: the host plus the freestanding cross targets.
  pub fn builtin() -> Self {
    Self {
      envs: vec![
        ("host".to_string(), host()),
        ("efi-x86_64".to_string(), efi_x86_64()),
        ("hjert-x86_32".to_string(), hjert_x86_32()),
      ],
    }
  }

  /// Look an environment up by name.
  pub fn get(&self, name: &str) -> Result<&Environment, EnvError> {
    self
      .envs
      .iter()
      .find(|(n, _)| n == name)
      .map(|(_, env)| env)
      .ok_or_else(|| EnvError::UnknownEnvironment {
        name: name.to_string(),
        available: self.names().join(", "),
      })
  }

  pub fn names(&self) -> Vec<&str> {
    self.envs.iter().map(|(name, _)| name.as_str()).collect()
  }

  pub fn iter(&self) -> impl Iterator<Item = (&str, &Environment)> {
    self.envs.iter().map(|(name, env)| (name.as_str(), env))
  }
}

impl Default for EnvRegistry {
  fn default() -> Self {
    Self::builtin()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn builtin_catalog_order() {
    let registry = EnvRegistry::builtin();
    assert_eq!(registry.names(), vec!["host", "efi-x86_64", "hjert-x86_32"]);
  }

  #[test]
  fn host_is_hosted() {
    let registry = EnvRegistry::builtin();
    let host = registry.get("host").unwrap();

    assert!(!host.freestanding);
    assert_eq!(host.sys, host_sys());
    assert!(host.cflags.is_empty());
  }

  #[test]
  fn cross_targets_are_freestanding() {
    let registry = EnvRegistry::builtin();

    let efi = registry.get("efi-x86_64").unwrap();
    assert!(efi.freestanding);
    assert_eq!(efi.sys, "efi");
    assert_eq!(efi.abi, "ms");
    assert!(efi.ldflags.contains("-fuse-ld=lld-link"));
    assert!(efi.ldflags.contains("-Wl,-entry:efi_main"));

    let hjert = registry.get("hjert-x86_32").unwrap();
    assert!(hjert.freestanding);
    assert_eq!(hjert.sub, "32");
    assert_eq!(hjert.asflags, "-f elf32");
  }

  #[test]
  fn unknown_name_lists_available() {
    let registry = EnvRegistry::builtin();
    let err = registry.get("riscv").unwrap_err();

    assert_eq!(
      err.to_string(),
      "unknown environment 'riscv' (available: host, efi-x86_64, hjert-x86_32)"
    );
  }

  #[test]
  fn macos_reports_darwin() {
    if std::env::consts::OS == "macos" {
      assert_eq!(host_sys(), "darwin");
    } else {
      assert_eq!(host_sys(), std::env::consts::OS);
    }
  }
}
