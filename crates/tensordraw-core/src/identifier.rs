//! Identifier management using string interning
//!
//! Tensor names are compared and hashed constantly while anchors are
//! registered and resolved, so they are stored as interned symbols.

use std::{
    fmt,
    sync::{Mutex, OnceLock, PoisonError},
};

use string_interner::{DefaultStringInterner, DefaultSymbol, Symbol};

/// Global string interner for identifier storage.
///
/// Only names live here. Anchors and their coordinates are owned by a build
/// session and never outlive it.
static INTERNER: OnceLock<Mutex<DefaultStringInterner>> = OnceLock::new();

fn with_interner<R>(f: impl FnOnce(&mut DefaultStringInterner) -> R) -> R {
    let mut interner = INTERNER
        .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
        .lock()
        .unwrap_or_else(PoisonError::into_inner);
    f(&mut interner)
}

/// Interned tensor identifier.
///
/// # Examples
///
/// ```
/// use tensordraw_core::identifier::Id;
///
/// let rho = Id::new("rho");
/// assert_eq!(rho, "rho");
///
/// // Chain members are named after their base and 1-based site index
/// let site = Id::new("A").indexed(2);
/// assert_eq!(site, "A_2");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Id(DefaultSymbol);

impl Id {
    /// Creates an `Id` from &str.
    pub fn new(name: &str) -> Self {
        Self(with_interner(|interner| interner.get_or_intern(name)))
    }

    /// Creates the identifier `{self}_{index}`.
    pub fn indexed(&self, index: usize) -> Self {
        let name = format!("{self}_{index}");
        Self::new(&name)
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let resolved = with_interner(|interner| interner.resolve(self.0).map(str::to_owned));
        match resolved {
            Some(name) => f.write_str(&name),
            None => write!(f, "#{}", self.0.to_usize()),
        }
    }
}

impl From<&str> for Id {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl PartialEq<str> for Id {
    fn eq(&self, other: &str) -> bool {
        with_interner(|interner| interner.resolve(self.0) == Some(other))
    }
}

impl PartialEq<&str> for Id {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_name_same_id() {
        assert_eq!(Id::new("psi"), Id::new("psi"));
        assert_ne!(Id::new("psi"), Id::new("phi"));
    }

    #[test]
    fn test_display_round_trips_name() {
        let id = Id::new("rho");
        assert_eq!(id.to_string(), "rho");
    }

    #[test]
    fn test_indexed() {
        let base = Id::new("mps");
        assert_eq!(base.indexed(1), "mps_1");
        assert_eq!(base.indexed(10), Id::new("mps_10"));
        assert_ne!(base.indexed(1), base.indexed(2));
    }

    #[test]
    fn test_str_comparison() {
        let id: Id = "sigma".into();
        assert!(id == "sigma");
        assert!(id != "tau");
    }
}
