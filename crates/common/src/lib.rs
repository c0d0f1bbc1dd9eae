//! Shared types for the vitrine viewport workspace.
//!
//! # Invariants
//! - `ObjectId` is globally unique and totally ordered, so BTreeMap-keyed
//!   tables iterate deterministically.
//! - `Color` channels are linear RGB in [0, 1].

mod color;
mod types;

pub use color::{Color, ColorParseError};
pub use types::{ObjectId, Transform};

pub fn crate_info() -> &'static str {
    "vitrine-common v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("common"));
    }
}
