//! Style sheets: one optional value per [`StyleKey`].

use serde::Serialize;
use strum::{EnumCount, IntoEnumIterator};

use crate::key::StyleKey;
use crate::value::StyleValue;

/// A resolved style sheet.
///
/// Every key has a slot; an empty slot means the property is unset (or the
/// cascade rejected its value) and the consumer applies the initial value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StyleSheet {
    slots: Vec<Option<StyleValue>>,
}

impl Default for StyleSheet {
    fn default() -> Self {
        Self::new()
    }
}

impl StyleSheet {
    /// An empty sheet.
    #[must_use]
    pub fn new() -> Self {
        Self {
            slots: vec![None; StyleKey::COUNT],
        }
    }

    /// Builder form of [`StyleSheet::set`].
    #[must_use]
    pub fn with(mut self, key: StyleKey, value: StyleValue) -> Self {
        self.set(key, value);
        self
    }

    /// The value in `key`'s slot, if any.
    #[must_use]
    pub fn get(&self, key: StyleKey) -> Option<&StyleValue> {
        self.slots.get(key.slot()).and_then(Option::as_ref)
    }

    /// True when `key`'s slot holds a value.
    #[must_use]
    pub fn is_set(&self, key: StyleKey) -> bool {
        self.get(key).is_some()
    }

    /// Store a value.
    pub fn set(&mut self, key: StyleKey, value: StyleValue) {
        if let Some(slot) = self.slots.get_mut(key.slot()) {
            *slot = Some(value);
        }
    }

    /// Empty a slot, returning what it held.
    pub fn unset(&mut self, key: StyleKey) -> Option<StyleValue> {
        self.slots.get_mut(key.slot()).and_then(Option::take)
    }

    /// Empty every slot.
    pub fn clear(&mut self) {
        self.slots.iter_mut().for_each(|slot| *slot = None);
    }

    /// True when no slot holds a value.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Copy every set value of `other` over this sheet.
    pub fn merge(&mut self, other: &Self) {
        for (slot, value) in self.slots.iter_mut().zip(&other.slots) {
            if value.is_some() {
                *slot = *value;
            }
        }
    }

    /// Keys whose slots differ between `self` and `other`.
    pub fn diff<'a>(&'a self, other: &'a Self) -> impl Iterator<Item = StyleKey> + 'a {
        StyleKey::iter().filter(move |key| self.get(*key) != other.get(*key))
    }

    /// Every set slot with its key.
    pub fn iter(&self) -> impl Iterator<Item = (StyleKey, &StyleValue)> {
        StyleKey::iter().filter_map(|key| self.get(key).map(|value| (key, value)))
    }
}
