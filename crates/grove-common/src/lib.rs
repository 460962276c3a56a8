//! # Grove Common
//!
//! Common types shared by the Grove crates:
//! - ID types (EntityId)
//! - Common error types
//! - Prelude for convenient imports

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod error;
pub mod ids;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::*;
    pub use crate::ids::*;
}

pub use prelude::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_id_generation() {
        let id1 = EntityId::new();
        let id2 = EntityId::new();
        assert_ne!(id1, id2);
        assert!(id2 > id1);
    }

    #[test]
    fn test_entity_id_display() {
        assert_eq!(EntityId::from_raw(42), EntityId::from_raw(42));
        assert_eq!(EntityId::from_raw(7).to_string(), "#7");
    }

    #[test]
    fn test_error_display() {
        let err = GroveError::UnsupportedFormat("yaml".to_string());
        assert_eq!(err.to_string(), "Unsupported config format: yaml");
    }
}
