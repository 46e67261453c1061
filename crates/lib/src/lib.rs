//! sk-lib: configuration generator for multi-component C/C++ projects
//!
//! The pipeline, in the order [`configure::configure`] runs it:
//! - [`manifest`]: discover and load `manifest.json` component descriptors
//! - [`resolve`]: filter by environment, inject implicit edges, expand dependency closures
//! - [`env`]: the environment catalog, its transforms, fingerprint and finalization
//! - [`files`]: map components to sources, objects and artifacts
//! - [`ninja`]: emit the build graph
//!
//! [`runner`] hands the graph to the executor and runs artifacts; [`clean`]
//! removes generated output.

pub mod clean;
pub mod configure;
pub mod consts;
pub mod env;
pub mod files;
pub mod manifest;
pub mod ninja;
pub mod paths;
pub mod resolve;
pub mod runner;

#[cfg(test)]
mod testutil;
