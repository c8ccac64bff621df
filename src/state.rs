//! # Inventory state
//!
//! A [`State`] is a snapshot of how many of every declared item the crafter
//! holds. The set of declared items lives in an [`Items`] catalog which is
//! built once per domain and shared by every state of that domain.
//!
//! The catalog keeps its identifiers sorted, so every state lays out its
//! quantities in the same fixed order no matter how it was built. Equality,
//! hashing and ordering all work on that sequence, which makes two states
//! reached through different recipe orders compare equal whenever they hold
//! the same goods.
//!
//! ```
//! use craft_planner::{Items, State};
//!
//! let items = Items::new(["wood", "plank", "stick"]).unwrap();
//!
//! let a = State::from_quantities(&items, [("wood", 2), ("plank", 1)]).unwrap();
//! let b = State::from_quantities(&items, [("plank", 1), ("wood", 2)]).unwrap();
//! assert_eq!(a, b);
//! assert_eq!(a.get("stick").unwrap(), 0);
//! assert!(a.get("diamond").is_err());
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::{CraftError, Result};

/// Index of an item inside an [`Items`] catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(usize);

impl ItemId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// The declared item domain, sorted by identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Items {
    names: Vec<String>,
}

impl Items {
    /// Builds a catalog from the declared identifiers.
    ///
    /// Identifiers are sorted, so the resulting layout does not depend on
    /// declaration order.
    ///
    /// # Errors
    ///
    /// Returns [`CraftError::InvalidDomain`] if an identifier is empty or
    /// declared twice.
    pub fn new<I, S>(names: I) -> Result<Arc<Self>>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut names: Vec<String> = names.into_iter().map(Into::into).collect();
        if names.iter().any(|n| n.is_empty()) {
            return Err(CraftError::InvalidDomain(
                "item identifiers must not be empty".to_string(),
            ));
        }
        names.sort();
        if let Some(pair) = names.windows(2).find(|w| w[0] == w[1]) {
            return Err(CraftError::InvalidDomain(format!(
                "item '{}' declared more than once",
                pair[0]
            )));
        }
        Ok(Arc::new(Self { names }))
    }

    /// Looks up an item identifier.
    pub fn id(&self, name: &str) -> Result<ItemId> {
        self.names
            .binary_search_by(|n| n.as_str().cmp(name))
            .map(ItemId)
            .map_err(|_| CraftError::UnknownItem(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.id(name).is_ok()
    }

    pub fn name(&self, id: ItemId) -> &str {
        &self.names[id.0]
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Iterates the catalog in its fixed order.
    pub fn iter(&self) -> impl Iterator<Item = (ItemId, &str)> {
        self.names
            .iter()
            .enumerate()
            .map(|(i, n)| (ItemId(i), n.as_str()))
    }
}

/// Quantities held for every item of a domain.
///
/// A state always covers the full catalog; items never mentioned hold zero.
/// `Clone` produces a fully independent snapshot: only the immutable
/// catalog is shared.
#[derive(Debug, Clone)]
pub struct State {
    items: Arc<Items>,
    quantities: Vec<u32>,
}

impl State {
    /// Creates a state holding nothing.
    pub fn new(items: &Arc<Items>) -> Self {
        Self {
            items: Arc::clone(items),
            quantities: vec![0; items.len()],
        }
    }

    /// Creates a state from an item to quantity mapping. Items not listed
    /// hold zero; a later entry for the same item overrides an earlier one.
    ///
    /// # Errors
    ///
    /// Returns [`CraftError::UnknownItem`] if the mapping names an item
    /// outside the catalog.
    pub fn from_quantities<I, S>(items: &Arc<Items>, quantities: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, u32)>,
        S: AsRef<str>,
    {
        let mut state = Self::new(items);
        for (name, amount) in quantities {
            state.set(name.as_ref(), amount)?;
        }
        Ok(state)
    }

    /// Quantity of the named item.
    pub fn get(&self, name: &str) -> Result<u32> {
        let id = self.items.id(name)?;
        Ok(self.quantities[id.0])
    }

    /// Overwrites the quantity of the named item.
    pub fn set(&mut self, name: &str, amount: u32) -> Result<()> {
        let id = self.items.id(name)?;
        self.quantities[id.0] = amount;
        Ok(())
    }

    pub fn quantity(&self, id: ItemId) -> u32 {
        self.quantities[id.0]
    }

    /// Callers check headroom first, see `Recipe::check`.
    pub(crate) fn add(&mut self, id: ItemId, amount: u32) {
        let slot = &mut self.quantities[id.0];
        debug_assert!(slot.checked_add(amount).is_some(), "quantity overflow");
        *slot = slot.saturating_add(amount);
    }

    /// Callers check availability first; quantities are unsigned.
    pub(crate) fn remove(&mut self, id: ItemId, amount: u32) {
        let slot = &mut self.quantities[id.0];
        debug_assert!(*slot >= amount, "removing more than held");
        *slot = slot.saturating_sub(amount);
    }

    pub fn items(&self) -> &Arc<Items> {
        &self.items
    }

    /// Iterates `(item, quantity)` pairs in the catalog's fixed order,
    /// including items held at zero.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.items
            .iter()
            .map(move |(id, name)| (name, self.quantities[id.0]))
    }

    fn same_domain(&self, other: &State) -> bool {
        Arc::ptr_eq(&self.items, &other.items) || self.items == other.items
    }
}

impl PartialEq for State {
    fn eq(&self, other: &Self) -> bool {
        self.same_domain(other) && self.quantities == other.quantities
    }
}

impl Eq for State {}

impl Hash for State {
    // Equal states share a catalog, so the quantities alone are enough.
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.quantities.hash(state);
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        if !self.same_domain(other) {
            return self.items.names.cmp(&other.items.names);
        }
        self.quantities.cmp(&other.quantities)
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        let mut first = true;
        for (name, amount) in self.iter().filter(|(_, amount)| *amount > 0) {
            if !first {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", name, amount)?;
            first = false;
        }
        write!(f, "}}")
    }
}
