//! Build graph emission.
//!
//! [`NinjaWriter`] knows the file syntax; [`write_build_graph`] lays out the
//! variables, rules and edges for one resolved component set.

mod generate;
mod writer;

pub use generate::write_build_graph;
pub use writer::{NinjaWriter, escape_path, escape_value};
