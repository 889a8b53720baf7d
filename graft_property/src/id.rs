// Copyright 2026 the Graft Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Control and property identification types.
//!
//! This module provides [`ControlKind`] for identifying a registered control
//! type, [`PropertyId`] for runtime property identification, and
//! [`Property<T>`] for type-safe compile-time property keys.

use core::fmt;
use core::hash::{Hash, Hasher};
use core::marker::PhantomData;

/// A handle for a registered control type.
///
/// Properties are registered per control type, so every [`PropertyId`] carries
/// the kind of the control type it belongs to. The u16 size allows up to
/// 65,536 control types while keeping handles compact.
///
/// # Example
///
/// ```rust
/// use graft_property::ControlKind;
///
/// let kind = ControlKind::new(3);
/// assert_eq!(kind.index(), 3);
/// ```
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ControlKind(u16);

impl ControlKind {
    /// Creates a new control kind from the given index.
    ///
    /// This is typically called by
    /// [`ControlRegistry::register_control`](crate::ControlRegistry::register_control)
    /// rather than directly.
    #[must_use]
    #[inline]
    pub const fn new(index: u16) -> Self {
        Self(index)
    }

    /// Returns the underlying index of this control kind.
    #[must_use]
    #[inline]
    pub const fn index(self) -> u16 {
        self.0
    }
}

impl fmt::Debug for ControlKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ControlKind").field(&self.0).finish()
    }
}

impl fmt::Display for ControlKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ControlKind({})", self.0)
    }
}

/// A runtime property identifier.
///
/// A property is identified by the control kind it was registered on and its
/// slot within that control type's descriptor table. Slots are assigned in
/// registration order, so ordering `PropertyId`s of one control type by slot
/// reproduces registration order.
///
/// # Example
///
/// ```rust
/// use graft_property::{ControlKind, PropertyId};
///
/// let id = PropertyId::new(ControlKind::new(0), 2);
/// assert_eq!(id.slot(), 2);
/// ```
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PropertyId {
    control: ControlKind,
    slot: u16,
}

impl PropertyId {
    /// Creates a new property ID for the given control kind and slot.
    ///
    /// This is typically called by
    /// [`ControlRegistry::register`](crate::ControlRegistry::register)
    /// rather than directly.
    #[must_use]
    #[inline]
    pub const fn new(control: ControlKind, slot: u16) -> Self {
        Self { control, slot }
    }

    /// Returns the control kind this property belongs to.
    #[must_use]
    #[inline]
    pub const fn control(self) -> ControlKind {
        self.control
    }

    /// Returns the slot of this property within its control type's table.
    #[must_use]
    #[inline]
    pub const fn slot(self) -> u16 {
        self.slot
    }
}

impl fmt::Debug for PropertyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PropertyId")
            .field(&self.control.index())
            .field(&self.slot)
            .finish()
    }
}

impl fmt::Display for PropertyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PropertyId({}, {})", self.control.index(), self.slot)
    }
}

/// A type-safe property key with a phantom type for compile-time checking.
///
/// This wraps a [`PropertyId`] with a phantom type parameter `T` naming the
/// property's value type, so getting and setting values is checked at compile
/// time rather than at bind time.
///
/// ```rust
/// use graft_property::{ControlRegistry, Property, PropertyDescriptorBuilder};
///
/// let mut registry = ControlRegistry::new();
/// let watermark = registry
///     .register_control("TextBoxWatermark", "Sys.Extended.UI.TextBoxWatermarkBehavior")
///     .unwrap();
///
/// let text: Property<String> = registry
///     .register(
///         watermark,
///         "WatermarkText",
///         PropertyDescriptorBuilder::new("text", String::new()).build(),
///     )
///     .unwrap();
///
/// // store.set(&registry, text, 5); // Would not compile: `text` holds strings.
/// ```
///
/// `Property<T>` is the same size as [`PropertyId`] (4 bytes) since
/// `PhantomData` has zero size.
pub struct Property<T> {
    id: PropertyId,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Property<T> {
    /// Creates a new typed property from a property ID.
    ///
    /// This is typically called by
    /// [`ControlRegistry::register`](crate::ControlRegistry::register)
    /// rather than directly. The caller must ensure the `PropertyId` was
    /// registered with the same value type `T`; a mismatched type is caught
    /// at bind time and reported as a type-mismatch error.
    #[must_use]
    #[inline]
    pub const fn from_id(id: PropertyId) -> Self {
        Self {
            id,
            _marker: PhantomData,
        }
    }

    /// Returns the underlying property ID.
    #[must_use]
    #[inline]
    pub const fn id(self) -> PropertyId {
        self.id
    }
}

// Manual trait implementations to avoid requiring T: Clone, etc.

impl<T> Copy for Property<T> {}

impl<T> Clone for Property<T> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> PartialEq for Property<T> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<T> Eq for Property<T> {}

impl<T> Hash for Property<T> {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl<T> fmt::Debug for Property<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Property")
            .field("id", &self.id)
            .field("type", &core::any::type_name::<T>())
            .finish()
    }
}
