//! Anchor registry: named coordinates published by layout.
//!
//! Every laid-out tensor publishes its center and the inner and outer end of
//! each leg. Downstream consumers, such as label placement, look anchors up
//! by [`AnchorKey`] instead of recomputing geometry.
//!
//! The registry is owned by one build session. Keys are write-once: a second
//! registration of the same key is a [`LayoutError::NameCollision`].
//!
//! Owner names must pass [`check_name`]. A `.` in an owner would let a
//! center anchor display exactly like another owner's leg anchor.

use std::fmt;

use indexmap::{IndexMap, IndexSet};
use log::trace;

use tensordraw_core::{geometry::Point, identifier::Id, leg::Side};

use crate::error::LayoutError;

/// Which point of a tensor an anchor refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointKind {
    /// Center of the tensor box
    Center,
    /// Leg endpoint on the box boundary
    Inner,
    /// Free leg endpoint
    Outer,
}

impl PointKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::Center => "center",
            Self::Inner => "inner",
            Self::Outer => "outer",
        }
    }
}

/// Key of a registry entry: `(owner, side, ordinal, point kind)`.
///
/// Center keys carry no side and no ordinal. Keys display as the owner name
/// for centers and as `owner.{side letter}{ordinal}.{kind}` for legs.
///
/// # Examples
///
/// ```
/// # use tensordraw::registry::AnchorKey;
/// # use tensordraw::identifier::Id;
/// # use tensordraw::leg::Side;
/// let rho = Id::new("rho");
/// assert_eq!(AnchorKey::center(rho).to_string(), "rho");
/// assert_eq!(AnchorKey::outer(rho, Side::North, 2).to_string(), "rho.n2.outer");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AnchorKey {
    owner: Id,
    side: Option<Side>,
    ordinal: usize,
    kind: PointKind,
}

impl AnchorKey {
    pub fn center(owner: Id) -> Self {
        Self {
            owner,
            side: None,
            ordinal: 0,
            kind: PointKind::Center,
        }
    }

    pub fn inner(owner: Id, side: Side, ordinal: usize) -> Self {
        Self {
            owner,
            side: Some(side),
            ordinal,
            kind: PointKind::Inner,
        }
    }

    pub fn outer(owner: Id, side: Side, ordinal: usize) -> Self {
        Self {
            owner,
            side: Some(side),
            ordinal,
            kind: PointKind::Outer,
        }
    }

    pub fn owner(&self) -> Id {
        self.owner
    }

    pub fn side(&self) -> Option<Side> {
        self.side
    }

    pub fn ordinal(&self) -> usize {
        self.ordinal
    }

    pub fn kind(&self) -> PointKind {
        self.kind
    }
}

impl fmt::Display for AnchorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.side {
            None => write!(f, "{}", self.owner),
            Some(side) => write!(
                f,
                "{}.{}{}.{}",
                self.owner,
                side.letter(),
                self.ordinal,
                self.kind.name()
            ),
        }
    }
}

/// Checks that `name` can own anchors.
///
/// # Errors
///
/// Returns [`LayoutError::InvalidName`] if `name` is empty or contains `.`.
pub fn check_name(name: &str) -> Result<(), LayoutError> {
    let reason = if name.is_empty() {
        "name is empty"
    } else if name.contains('.') {
        "`.` separates anchor name parts"
    } else {
        return Ok(());
    };
    Err(LayoutError::InvalidName {
        name: name.to_string(),
        reason,
    })
}

/// Session-scoped map from [`AnchorKey`] to resolved coordinates.
///
/// Iteration follows registration order.
#[derive(Debug, Clone, Default)]
pub struct AnchorRegistry {
    entries: IndexMap<AnchorKey, Point>,
    owners: IndexSet<Id>,
}

impl AnchorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publishes a single anchor.
    ///
    /// # Errors
    ///
    /// - [`LayoutError::InvalidName`] if the owner name fails [`check_name`].
    /// - [`LayoutError::NameCollision`] if `key` is already registered.
    pub fn register(&mut self, key: AnchorKey, point: Point) -> Result<(), LayoutError> {
        self.check_owner(key.owner())?;
        if self.entries.contains_key(&key) {
            return Err(LayoutError::NameCollision {
                name: key.to_string(),
            });
        }
        self.insert(key, point);
        Ok(())
    }

    /// Publishes a batch of anchors atomically.
    ///
    /// Every key is checked against the registry and against the rest of the
    /// batch before the first one is inserted, so on error nothing changes.
    ///
    /// # Errors
    ///
    /// - [`LayoutError::InvalidName`] for the first owner failing [`check_name`].
    /// - [`LayoutError::NameCollision`] for the first duplicate key.
    pub fn register_all(
        &mut self,
        anchors: impl IntoIterator<Item = (AnchorKey, Point)>,
    ) -> Result<usize, LayoutError> {
        let anchors: Vec<(AnchorKey, Point)> = anchors.into_iter().collect();

        let mut seen = IndexSet::with_capacity(anchors.len());
        for (key, _) in &anchors {
            self.check_owner(key.owner())?;
            if self.entries.contains_key(key) || !seen.insert(*key) {
                return Err(LayoutError::NameCollision {
                    name: key.to_string(),
                });
            }
        }

        let count = anchors.len();
        for (key, point) in anchors {
            self.insert(key, point);
        }
        Ok(count)
    }

    fn check_owner(&self, owner: Id) -> Result<(), LayoutError> {
        if self.owners.contains(&owner) {
            return Ok(());
        }
        check_name(&owner.to_string())
    }

    fn insert(&mut self, key: AnchorKey, point: Point) {
        trace!(anchor:% = key, x = point.x(), y = point.y(); "Registered anchor");
        self.owners.insert(key.owner());
        self.entries.insert(key, point);
    }

    /// Looks up an anchor.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::NotFound`] if nothing was published under `key`.
    pub fn resolve(&self, key: &AnchorKey) -> Result<Point, LayoutError> {
        self.get(key).ok_or_else(|| LayoutError::NotFound {
            key: key.to_string(),
        })
    }

    pub fn get(&self, key: &AnchorKey) -> Option<Point> {
        self.entries.get(key).copied()
    }

    /// Looks up an anchor by its display name, e.g. `"rho.n1.outer"`.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::NotFound`] if no published key has that name.
    pub fn resolve_name(&self, name: &str) -> Result<Point, LayoutError> {
        self.entries
            .iter()
            .find(|(key, _)| key.to_string() == name)
            .map(|(_, point)| *point)
            .ok_or_else(|| LayoutError::NotFound {
                key: name.to_string(),
            })
    }

    /// Returns `true` if any anchor is owned by `owner`.
    pub fn contains_owner(&self, owner: Id) -> bool {
        self.owners.contains(&owner)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&AnchorKey, &Point)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops every anchor, ready for an independent build.
    pub fn reset(&mut self) {
        self.entries.clear();
        self.owners.clear();
    }
}
