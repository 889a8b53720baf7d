// Copyright 2026 the Graft Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property descriptor definitions.
//!
//! This module provides [`PropertyDescriptor`] for the static metadata of one
//! extender property and [`PropertyDescriptorBuilder`] for ergonomic
//! construction. Descriptors are immutable once built; one set exists per
//! control type, installed at registration time.

use alloc::boxed::Box;

use crate::value::ScriptType;

/// Strategy for transforming a property value before emission.
///
/// The transform is applied to the effective value (stored or default) each
/// time a client descriptor is produced. This is the customization point for
/// per-property behavior that subclassing would otherwise provide: clamping,
/// canonicalizing identifiers, mapping enumerations onto wire names, etc.
pub type TransformCallback<T> = Box<dyn Fn(T) -> T + Send + Sync>;

/// How a property value is serialized into the client descriptor.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ClientKind {
    /// Passed through as a plain value.
    Value,
    /// A reference to another element by id; an empty string means "unset"
    /// and the entry is omitted from the payload.
    ElementRef,
    /// The name of a client-side event handler; empty means "unset" and is
    /// omitted, anything else must be a valid handler-name token.
    EventHandler,
}

/// Static metadata for one extender property.
///
/// # Example
///
/// ```rust
/// use graft_property::{ClientKind, PropertyDescriptorBuilder};
///
/// let descriptor = PropertyDescriptorBuilder::new("text", String::new())
///     .required(true)
///     .build();
///
/// assert_eq!(descriptor.client_name(), "text");
/// assert!(descriptor.required());
/// assert_eq!(descriptor.kind(), ClientKind::Value);
/// ```
pub struct PropertyDescriptor<T: ScriptType> {
    default_value: T,
    required: bool,
    client_name: &'static str,
    kind: ClientKind,
    transform: Option<TransformCallback<T>>,
}

impl<T: ScriptType> PropertyDescriptor<T> {
    /// Returns a reference to the default value.
    #[must_use]
    #[inline]
    pub fn default_value(&self) -> &T {
        &self.default_value
    }

    /// Returns whether this property must be explicitly set before emission.
    #[must_use]
    #[inline]
    pub fn required(&self) -> bool {
        self.required
    }

    /// Returns the client-facing name this property is emitted under.
    #[must_use]
    #[inline]
    pub fn client_name(&self) -> &'static str {
        self.client_name
    }

    /// Returns the serialization kind of this property.
    #[must_use]
    #[inline]
    pub fn kind(&self) -> ClientKind {
        self.kind
    }

    /// Returns whether a transform strategy is set.
    #[must_use]
    #[inline]
    pub fn has_transform(&self) -> bool {
        self.transform.is_some()
    }

    /// Decomposes the descriptor for type-erased registration.
    pub(crate) fn into_parts(
        self,
    ) -> (T, bool, &'static str, ClientKind, Option<TransformCallback<T>>) {
        (
            self.default_value,
            self.required,
            self.client_name,
            self.kind,
            self.transform,
        )
    }
}

// Manual Debug impl since callbacks aren't Debug
impl<T: ScriptType + core::fmt::Debug> core::fmt::Debug for PropertyDescriptor<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PropertyDescriptor")
            .field("default_value", &self.default_value)
            .field("required", &self.required)
            .field("client_name", &self.client_name)
            .field("kind", &self.kind)
            .field("has_transform", &self.transform.is_some())
            .finish()
    }
}

/// Builder for [`PropertyDescriptor`].
///
/// # Example
///
/// ```rust
/// use graft_property::PropertyDescriptorBuilder;
///
/// let descriptor = PropertyDescriptorBuilder::new("button", String::new())
///     .element_ref()
///     .build();
/// ```
pub struct PropertyDescriptorBuilder<T: ScriptType> {
    default_value: T,
    required: bool,
    client_name: &'static str,
    kind: ClientKind,
    transform: Option<TransformCallback<T>>,
}

// Manual Debug impl since callbacks aren't Debug
impl<T: ScriptType + core::fmt::Debug> core::fmt::Debug for PropertyDescriptorBuilder<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PropertyDescriptorBuilder")
            .field("default_value", &self.default_value)
            .field("required", &self.required)
            .field("client_name", &self.client_name)
            .field("kind", &self.kind)
            .field("has_transform", &self.transform.is_some())
            .finish()
    }
}

impl<T: ScriptType> PropertyDescriptorBuilder<T> {
    /// Creates a new builder emitting under `client_name`, with the given
    /// default value.
    ///
    /// The descriptor starts out optional, serialized as a plain value, with
    /// no transform strategy.
    #[must_use]
    pub fn new(client_name: &'static str, default_value: T) -> Self {
        Self {
            default_value,
            required: false,
            client_name,
            kind: ClientKind::Value,
            transform: None,
        }
    }

    /// Sets whether this property must be explicitly set before emission.
    ///
    /// A required property left at its default fails emission even when the
    /// default would otherwise serialize fine.
    #[must_use]
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Sets a strategy to transform values before they are emitted.
    #[must_use]
    pub fn transform<F>(mut self, callback: F) -> Self
    where
        F: Fn(T) -> T + Send + Sync + 'static,
    {
        self.transform = Some(Box::new(callback));
        self
    }

    /// Builds the [`PropertyDescriptor`].
    #[must_use]
    pub fn build(self) -> PropertyDescriptor<T> {
        PropertyDescriptor {
            default_value: self.default_value,
            required: self.required,
            client_name: self.client_name,
            kind: self.kind,
            transform: self.transform,
        }
    }
}

// Element references and handler names are identifiers, so these kinds are
// only constructible for string-valued descriptors.
impl PropertyDescriptorBuilder<alloc::string::String> {
    /// Marks this property as a reference to another element by id.
    #[must_use]
    pub fn element_ref(mut self) -> Self {
        self.kind = ClientKind::ElementRef;
        self
    }

    /// Marks this property as the name of a client-side event handler.
    #[must_use]
    pub fn event_handler(mut self) -> Self {
        self.kind = ClientKind::EventHandler;
        self
    }
}
