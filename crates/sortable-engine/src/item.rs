#![forbid(unsafe_code)]

//! Reorderable items and the authoritative item list.
//!
//! [`ItemList`] owns the display order: insertion order is display order
//! is authoritative order. Ids are unique within the list at all times,
//! including mid-drag; the list rejects duplicate insertions rather than
//! silently shadowing an existing item.

use std::fmt;

/// One reorderable unit.
///
/// `content` is an opaque caller-owned payload; the engine never
/// interprets it.
#[derive(Debug, Clone, PartialEq)]
pub struct Item<T = ()> {
    /// Unique, stable identifier.
    pub id: String,
    /// Disabled items never initiate a drag. They remain reachable as
    /// drop positions.
    pub disabled: bool,
    /// Advisory tie-break hint. Not used for core ordering.
    pub weight: Option<f64>,
    /// Logical partition for cross-container comparisons. The core
    /// engine operates within one container and carries this through.
    pub group: Option<String>,
    /// Opaque caller payload.
    pub content: T,
}

impl<T> Item<T> {
    /// Create an item with the given id and content.
    #[must_use]
    pub fn new(id: impl Into<String>, content: T) -> Self {
        Self {
            id: id.into(),
            disabled: false,
            weight: None,
            group: None,
            content,
        }
    }

    /// Mark the item as not draggable.
    #[must_use]
    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    /// Set the advisory weight hint.
    #[must_use]
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = Some(weight);
        self
    }

    /// Set the logical group.
    #[must_use]
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }
}

impl Item<()> {
    /// Create a content-less item, useful when the caller keys its own
    /// data by id.
    #[must_use]
    pub fn bare(id: impl Into<String>) -> Self {
        Self::new(id, ())
    }
}

/// Error raised when an item list invariant would be violated.
#[derive(Debug)]
pub enum ItemError {
    /// An item with this id is already present.
    DuplicateId(String),
}

impl fmt::Display for ItemError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemError::DuplicateId(id) => write!(f, "duplicate item id: {id:?}"),
        }
    }
}

impl std::error::Error for ItemError {}

/// The authoritative ordered item sequence of one container.
#[derive(Debug, Clone, Default)]
pub struct ItemList<T = ()> {
    items: Vec<Item<T>>,
    /// Counter for generated ids; never reused within a list.
    next_generated: u64,
}

impl<T> ItemList<T> {
    /// Create an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            next_generated: 0,
        }
    }

    /// Build a list from caller-supplied items, enforcing id uniqueness.
    pub fn from_items(items: impl IntoIterator<Item = Item<T>>) -> Result<Self, ItemError> {
        let mut list = Self::new();
        for item in items {
            list.push(item)?;
        }
        Ok(list)
    }

    /// Build a list from raw contents, generating an id for each.
    #[must_use]
    pub fn from_contents(contents: impl IntoIterator<Item = T>) -> Self {
        let mut list = Self::new();
        for content in contents {
            let id = list.generate_id();
            // Generated ids are fresh by construction.
            let _ = list.push(Item::new(id, content));
        }
        list
    }

    fn generate_id(&mut self) -> String {
        loop {
            let id = format!("item-{}", self.next_generated);
            self.next_generated += 1;
            if !self.contains_id(&id) {
                return id;
            }
        }
    }

    /// Append an item. Fails if its id is already present.
    pub fn push(&mut self, item: Item<T>) -> Result<(), ItemError> {
        if self.contains_id(&item.id) {
            return Err(ItemError::DuplicateId(item.id.clone()));
        }
        self.items.push(item);
        Ok(())
    }

    /// Remove an item by id, returning it if present.
    pub fn remove(&mut self, id: &str) -> Option<Item<T>> {
        let idx = self.position_of(id)?;
        Some(self.items.remove(idx))
    }

    /// Number of items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the list is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Item at the given index.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Item<T>> {
        self.items.get(index)
    }

    /// Items in display order.
    #[must_use]
    pub fn as_slice(&self) -> &[Item<T>] {
        &self.items
    }

    /// Mutable access to the backing vector, for the order mutator.
    pub(crate) fn items_mut(&mut self) -> &mut Vec<Item<T>> {
        &mut self.items
    }

    /// Current index of the item with the given id.
    #[must_use]
    pub fn position_of(&self, id: &str) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }

    /// Whether an item with this id is present.
    #[must_use]
    pub fn contains_id(&self, id: &str) -> bool {
        self.position_of(id).is_some()
    }

    /// Ids in display order.
    #[must_use]
    pub fn order(&self) -> Vec<String> {
        self.items.iter().map(|item| item.id.clone()).collect()
    }

    /// Reorder to match a previously saved id order.
    ///
    /// Items named by `order` move to the front in that order; items not
    /// named keep their current relative order and follow. Saved ids
    /// with no matching item are ignored, so a stale saved order can
    /// only rearrange, never drop or invent items.
    pub fn apply_saved_order(&mut self, order: &[String]) {
        let mut reordered = Vec::with_capacity(self.items.len());
        for id in order {
            if let Some(idx) = self.items.iter().position(|item| &item.id == id) {
                reordered.push(self.items.remove(idx));
            }
        }
        reordered.append(&mut self.items);
        self.items = reordered;
    }
}
