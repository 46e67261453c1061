use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One target environment.
///
/// Only the identity fields (see [`IdentityField`]) feed the fingerprint;
/// tool fields and `extra` change what gets written into the build graph but
/// never which build directory is used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Environment {
  pub toolchain: String,
  pub arch: String,
  pub sub: String,
  pub vendor: String,
  pub sys: String,
  pub abi: String,
  pub freestanding: bool,

  pub cc: String,
  pub cflags: String,
  pub cxx: String,
  pub cxxflags: String,
  pub ld: String,
  pub ldflags: String,
  pub ar: String,
  pub arflags: String,
  #[serde(rename = "as")]
  pub asm: String,
  pub asflags: String,

  /// Additional variables passed through to the build graph untouched.
  #[serde(flatten, default)]
  pub extra: BTreeMap<String, String>,
}

/// Fields that determine an environment's identity, in fingerprint order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdentityField {
  Toolchain,
  Arch,
  Sub,
  Vendor,
  Sys,
  Abi,
  Freestanding,
}

impl IdentityField {
  pub const ALL: [IdentityField; 7] = [
    IdentityField::Toolchain,
    IdentityField::Arch,
    IdentityField::Sub,
    IdentityField::Vendor,
    IdentityField::Sys,
    IdentityField::Abi,
    IdentityField::Freestanding,
  ];

  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Toolchain => "toolchain",
      Self::Arch => "arch",
      Self::Sub => "sub",
      Self::Vendor => "vendor",
      Self::Sys => "sys",
      Self::Abi => "abi",
      Self::Freestanding => "freestanding",
    }
  }
}

impl fmt::Display for IdentityField {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

/// A borrowed environment field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue<'a> {
  Text(&'a str),
  Flag(bool),
}

impl FieldValue<'_> {
  /// Whether a manifest's allowed value designates this value.
  ///
  /// Comparison is by JSON type and value: `false` does not match `"false"`.
  pub fn matches(&self, allowed: &Value) -> bool {
    match (self, allowed) {
      (Self::Text(text), Value::String(s)) => text == s,
      (Self::Flag(flag), Value::Bool(b)) => flag == b,
      _ => false,
    }
  }
}

impl fmt::Display for FieldValue<'_> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Text(text) => write!(f, "{}", text),
      Self::Flag(flag) => write!(f, "{}", flag),
    }
  }
}

impl Environment {
  /// Value of an identity field.
  pub fn identity(&self, field: IdentityField) -> FieldValue<'_> {
    match field {
      IdentityField::Toolchain => FieldValue::Text(&self.toolchain),
      IdentityField::Arch => FieldValue::Text(&self.arch),
      IdentityField::Sub => FieldValue::Text(&self.sub),
      IdentityField::Vendor => FieldValue::Text(&self.vendor),
      IdentityField::Sys => FieldValue::Text(&self.sys),
      IdentityField::Abi => FieldValue::Text(&self.abi),
      IdentityField::Freestanding => FieldValue::Flag(self.freestanding),
    }
  }

  /// Look a field up by its manifest-facing name.
  ///
  /// Returns `None` for names that are neither identity, tool nor extra fields.
  pub fn field(&self, name: &str) -> Option<FieldValue<'_>> {
    if let Some(field) = IdentityField::ALL.iter().find(|f| f.as_str() == name) {
      return Some(self.identity(*field));
    }

    let text = match name {
      "cc" => &self.cc,
      "cflags" => &self.cflags,
      "cxx" => &self.cxx,
      "cxxflags" => &self.cxxflags,
      "ld" => &self.ld,
      "ldflags" => &self.ldflags,
      "ar" => &self.ar,
      "arflags" => &self.arflags,
      "as" => &self.asm,
      "asflags" => &self.asflags,
      other => return self.extra.get(other).map(|v| FieldValue::Text(v)),
    };

    Some(FieldValue::Text(text))
  }
}
