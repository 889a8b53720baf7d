// Copyright 2026 the Graft Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-instance sparse property storage.
//!
//! This module provides [`PropertyStore`] for the property state of one
//! control instance, using sparse storage so instances that leave most
//! properties at their defaults stay small.
//!
//! # Implementation
//!
//! A sorted vector with binary search rather than a hash map:
//!
//! - Better cache locality (contiguous memory)
//! - Lower memory overhead (no hash buckets)
//! - O(log n) lookup, fast for typical property counts (5-20)
//! - Inline storage for small property sets via `SmallVec`
//!
//! An entry's presence is what "explicitly set" means: there is no unset
//! operation, so a property moves from unset to explicitly-set at most once
//! in an instance's lifetime.

use alloc::string::String;
use smallvec::SmallVec;

use crate::error::PropertyError;
use crate::id::{ControlKind, Property, PropertyId};
use crate::registry::ControlRegistry;
use crate::value::{ScriptType, ScriptValue};

/// Default inline capacity for property entries.
///
/// Most extender controls declare fewer than 8 non-default properties,
/// so this avoids heap allocation in the common case.
const INLINE_CAPACITY: usize = 8;

/// Per-instance sparse storage for property values.
///
/// A store is owned by exactly one control instance, created with the
/// instance and destroyed with it. It is keyed by the instance's client id
/// (the markup id the client runtime looks behaviors up by) and bound to one
/// [`ControlKind`]; binding a property of a different control type is
/// rejected.
///
/// # Example
///
/// ```rust
/// use graft_property::{ControlRegistry, PropertyDescriptorBuilder, PropertyStore};
///
/// let mut registry = ControlRegistry::new();
/// let watermark = registry
///     .register_control("TextBoxWatermark", "Sys.Extended.UI.TextBoxWatermarkBehavior")
///     .unwrap();
/// let text = registry
///     .register(
///         watermark,
///         "WatermarkText",
///         PropertyDescriptorBuilder::new("text", String::new()).build(),
///     )
///     .unwrap();
///
/// let mut store = PropertyStore::new(watermark, "TextBox1");
///
/// // No value set - the fallback is returned.
/// assert_eq!(store.get(text, String::from("fallback")), "fallback");
/// assert!(!store.has(text));
///
/// store.set(&registry, text, String::from("Enter name")).unwrap();
/// assert_eq!(store.get(text, String::new()), "Enter name");
/// assert!(store.has(text));
/// ```
#[derive(Clone, Debug)]
pub struct PropertyStore {
    control: ControlKind,
    control_id: String,
    /// Explicitly set values, sorted by slot for binary search lookup.
    entries: SmallVec<[(u16, ScriptValue); INLINE_CAPACITY]>,
    client_state: Option<String>,
}

impl PropertyStore {
    /// Creates a new property store for one instance of a control type.
    #[must_use]
    pub fn new(control: ControlKind, control_id: impl Into<String>) -> Self {
        Self {
            control,
            control_id: control_id.into(),
            entries: SmallVec::new(),
            client_state: None,
        }
    }

    /// Returns the control kind this store is bound to.
    #[must_use]
    #[inline]
    pub fn control(&self) -> ControlKind {
        self.control
    }

    /// Returns the client id of the owning instance.
    #[must_use]
    #[inline]
    pub fn control_id(&self) -> &str {
        &self.control_id
    }

    /// Returns `true` if no properties have been explicitly set.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the number of explicitly set properties.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns the IDs of explicitly set properties, in slot order.
    pub fn property_ids(&self) -> impl Iterator<Item = PropertyId> + '_ {
        self.entries
            .iter()
            .map(|(slot, _)| PropertyId::new(self.control, *slot))
    }

    /// Binary search for an entry by slot.
    #[inline]
    fn find(&self, slot: u16) -> Result<usize, usize> {
        self.entries.binary_search_by_key(&slot, |(s, _)| *s)
    }

    fn insert(&mut self, slot: u16, value: ScriptValue) {
        match self.find(slot) {
            Ok(index) => self.entries[index].1 = value,
            Err(index) => self.entries.insert(index, (slot, value)),
        }
    }

    /// Sets a property value through its typed handle.
    ///
    /// Overwrites any existing value and marks the property as explicitly
    /// set.
    ///
    /// # Errors
    ///
    /// Fails with [`PropertyError::UnknownProperty`] if the handle belongs to
    /// a different control type, or is not registered at all. Fails with
    /// [`PropertyError::TypeMismatch`] if the handle's value type disagrees
    /// with the registered descriptor (possible only for handles forged via
    /// [`Property::from_id`]).
    pub fn set<T: ScriptType>(
        &mut self,
        registry: &ControlRegistry,
        property: Property<T>,
        value: T,
    ) -> Result<(), PropertyError> {
        let id = property.id();
        let registration = if id.control() == self.control {
            registry.registration(id)
        } else {
            None
        };
        let Some(registration) = registration else {
            let control = registry
                .control_name(self.control)
                .unwrap_or("<unregistered>");
            let name = registry
                .registration(id)
                .map_or("<unregistered>", |r| r.name());
            return Err(PropertyError::UnknownProperty {
                control: control.into(),
                name: name.into(),
            });
        };
        if registration.value_kind() != T::KIND {
            return Err(PropertyError::TypeMismatch {
                name: registration.name().into(),
                expected: registration.value_kind(),
                found: T::KIND,
            });
        }

        self.insert(id.slot(), value.into_script());
        Ok(())
    }

    /// Sets a property value by server-side name.
    ///
    /// This is the dynamic binding path used when declarative attributes are
    /// bound from markup, where only the property name and a primitive value
    /// are known.
    ///
    /// # Errors
    ///
    /// Fails with [`PropertyError::UnknownProperty`] if no property with this
    /// name is registered on the store's control type, and with
    /// [`PropertyError::TypeMismatch`] if the value's primitive kind differs
    /// from the descriptor's. The store is unchanged on error.
    ///
    /// # Panics
    ///
    /// Panics if the store's control kind is not registered in `registry`.
    pub fn set_named(
        &mut self,
        registry: &ControlRegistry,
        name: &str,
        value: ScriptValue,
    ) -> Result<(), PropertyError> {
        let registration = registry.resolve(self.control, name)?;
        if registration.value_kind() != value.kind() {
            return Err(PropertyError::TypeMismatch {
                name: registration.name().into(),
                expected: registration.value_kind(),
                found: value.kind(),
            });
        }

        self.insert(registration.id().slot(), value);
        Ok(())
    }

    /// Gets a property value, falling back to `fallback` if the property was
    /// never set.
    ///
    /// Never fails: a handle of a foreign control type, or a stored value
    /// that does not decode as `T`, also yields the fallback.
    #[must_use]
    pub fn get<T: ScriptType>(&self, property: Property<T>, fallback: T) -> T {
        let id = property.id();
        if id.control() != self.control {
            return fallback;
        }
        self.find(id.slot())
            .ok()
            .and_then(|index| T::from_script(&self.entries[index].1))
            .unwrap_or(fallback)
    }

    /// Returns the stored script value for a property ID, if explicitly set.
    #[must_use]
    pub fn get_raw(&self, id: PropertyId) -> Option<&ScriptValue> {
        if id.control() != self.control {
            return None;
        }
        self.find(id.slot())
            .ok()
            .map(|index| &self.entries[index].1)
    }

    /// Returns `true` only if the property was explicitly set.
    #[must_use]
    #[inline]
    pub fn has<T: ScriptType>(&self, property: Property<T>) -> bool {
        self.has_id(property.id())
    }

    /// Returns `true` only if the property ID was explicitly set.
    #[must_use]
    #[inline]
    pub fn has_id(&self, id: PropertyId) -> bool {
        id.control() == self.control && self.find(id.slot()).is_ok()
    }

    /// Sets or clears the free-form client state string.
    ///
    /// Client state is carried to the client alongside the property payload;
    /// hosts use it for per-instance flags the property model does not cover
    /// (the watermark's `"Focused"` marker, for example).
    pub fn set_client_state(&mut self, state: Option<String>) {
        self.client_state = state;
    }

    /// Returns the client state string, if set.
    #[must_use]
    pub fn client_state(&self) -> Option<&str> {
        self.client_state.as_deref()
    }
}
