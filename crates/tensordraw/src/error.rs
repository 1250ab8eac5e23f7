//! Error types for tensordraw operations.
//!
//! [`LayoutError`] covers every way a layout call can reject its input.
//! [`TensorDrawError`] is the top-level error returned by [`crate::DiagramBuilder`].

use thiserror::Error;

use tensordraw_core::leg::LegCountError;

use crate::{export, layout::MAX_CHAIN_LENGTH};

/// Errors raised while laying out nodes and chains or querying anchors.
///
/// Every variant is detected before anything is published, so a failed call
/// leaves the anchor registry exactly as it was.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    #[error("name `{name}` is already defined in this diagram")]
    NameCollision { name: String },

    #[error(
        "bond `{left}` -> `{right}` does not match: {east} east leg(s) vs {west} west leg(s)"
    )]
    BondMismatch {
        left: String,
        right: String,
        east: usize,
        west: usize,
    },

    #[error("tensor `{owner}`: {source}")]
    InvalidLegCount {
        owner: String,
        #[source]
        source: LegCountError,
    },

    #[error("invalid tensor name `{name}`: {reason}")]
    InvalidName { name: String, reason: &'static str },

    #[error("anchor `{key}` not found")]
    NotFound { key: String },

    #[error(
        "chain `{name}` needs between 1 and {} nodes, got length {length}",
        MAX_CHAIN_LENGTH
    )]
    InvalidChainLength { name: String, length: i64 },

    #[error("chain `{name}` has {length} node(s), site override {index} is out of range")]
    SiteOutOfRange {
        name: String,
        index: i64,
        length: usize,
    },

    #[error("invalid {what} for `{owner}`: {value}")]
    InvalidDimension {
        owner: String,
        what: &'static str,
        value: f32,
    },
}

impl LayoutError {
    pub(crate) fn invalid_dimension(owner: &str, what: &'static str, value: f32) -> Self {
        Self::InvalidDimension {
            owner: owner.to_string(),
            what,
            value,
        }
    }

    pub(crate) fn invalid_leg_count(owner: impl ToString, source: LegCountError) -> Self {
        Self::InvalidLegCount {
            owner: owner.to_string(),
            source,
        }
    }
}

/// The main error type for tensordraw operations.
#[derive(Debug, Error)]
pub enum TensorDrawError {
    #[error("Layout error: {0}")]
    Layout(#[from] LayoutError),

    #[error("Export error: {0}")]
    Export(#[from] export::Error),
}

#[cfg(test)]
mod tests {
    use tensordraw_core::leg::LegCounts;

    use super::*;

    #[test]
    fn test_bond_mismatch_message_names_both_nodes() {
        let err = LayoutError::BondMismatch {
            left: "A_1".to_string(),
            right: "A_2".to_string(),
            east: 2,
            west: 1,
        };
        let message = err.to_string();
        assert!(message.contains("A_1"));
        assert!(message.contains("A_2"));
        assert!(message.contains("2 east"));
        assert!(message.contains("1 west"));
    }

    #[test]
    fn test_invalid_leg_count_keeps_source() {
        let source = LegCounts::try_from_signed(-1, 0, 0, 0).unwrap_err();
        let err = LayoutError::invalid_leg_count("rho", source);
        assert!(err.to_string().starts_with("tensor `rho`"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_layout_error_converts() {
        let err: TensorDrawError = LayoutError::NotFound {
            key: "rho.n1.outer".to_string(),
        }
        .into();
        assert!(matches!(err, TensorDrawError::Layout(_)));
        assert!(err.to_string().contains("rho.n1.outer"));
    }

    #[test]
    fn test_chain_length_message_names_limit() {
        let err = LayoutError::InvalidChainLength {
            name: "A".to_string(),
            length: i64::MAX,
        };
        assert!(err.to_string().contains(&MAX_CHAIN_LENGTH.to_string()));
    }
}
