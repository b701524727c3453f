//! Element registry.
//!
//! Elements register once with a kind and capability flags; hover
//! classification and hit testing are pure lookups over this registry.

mod node;
mod tree;

pub use node::{ElementFlags, ElementId, ElementKind, ElementState};
pub use tree::ElementTree;
