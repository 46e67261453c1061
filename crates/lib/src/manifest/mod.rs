//! Component manifests.
//!
//! Every directory holding a `manifest.json` is a component. Manifests are
//! discovered by walking the project tree, parsed, and tagged with the
//! directory they came from before any resolution happens.

mod load;
mod types;

pub use load::*;
pub use types::*;
