// Copyright 2026 the Graft Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Descriptor emission.
//!
//! This module provides [`DescriptorEmitter`], which projects a control
//! instance's property store through its registered descriptors into a
//! [`ClientDescriptor`].

use alloc::vec::Vec;

use graft_property::{
    ClientKind, ControlRegistry, ExtenderControl, PropertyError, PropertyStore, ScriptValue,
    ValueKind,
};

use crate::handler::is_valid_handler_name;
use crate::payload::ClientDescriptor;

/// Emitter projecting property stores into client descriptors.
///
/// The emitter bundles the registry so emission call sites stay small. It
/// walks a control type's descriptors in registration order, so the same
/// store state always produces an identical payload; emission never mutates
/// the store, and a failed emission produces nothing.
///
/// # Example
///
/// ```rust
/// use graft_client::DescriptorEmitter;
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
///         PropertyDescriptorBuilder::new("text", String::new())
///             .required(true)
///             .build(),
///     )
///     .unwrap();
///
/// let mut store = PropertyStore::new(watermark, "TextBox1");
/// store.set(&registry, text, String::from("Enter name")).unwrap();
///
/// let emitter = DescriptorEmitter::new(&registry);
/// let descriptor = emitter.emit_store(&store).unwrap();
/// assert_eq!(
///     descriptor.to_json(),
///     r#"{"behavior":"Sys.Extended.UI.TextBoxWatermarkBehavior","id":"TextBox1","text":"Enter name"}"#
/// );
/// ```
#[derive(Copy, Clone, Debug)]
pub struct DescriptorEmitter<'a> {
    registry: &'a ControlRegistry,
}

impl<'a> DescriptorEmitter<'a> {
    /// Creates an emitter over the given registry.
    #[must_use]
    pub fn new(registry: &'a ControlRegistry) -> Self {
        Self { registry }
    }

    /// Returns the registry this emitter reads descriptors from.
    #[must_use]
    #[inline]
    pub fn registry(&self) -> &ControlRegistry {
        self.registry
    }

    /// Emits the client descriptor for a control instance.
    ///
    /// # Errors
    ///
    /// See [`DescriptorEmitter::emit_store`].
    pub fn emit(&self, control: &impl ExtenderControl) -> Result<ClientDescriptor, PropertyError> {
        self.emit_store(control.property_store())
    }

    /// Emits the client descriptor for a property store.
    ///
    /// For each registered descriptor, in registration order:
    ///
    /// 1. a required property that was never explicitly set fails emission,
    ///    regardless of its default;
    /// 2. the effective value is the stored value, else the default;
    /// 3. the descriptor's transform strategy is applied, if any;
    /// 4. element references and handler names that are empty mean "unset"
    ///    and are omitted; a malformed handler name fails emission;
    /// 5. the value is recorded under the descriptor's client name.
    ///
    /// # Errors
    ///
    /// Fails with [`PropertyError::MissingRequiredProperty`] or
    /// [`PropertyError::InvalidHandlerName`] as described above, and with
    /// [`PropertyError::TypeMismatch`] if a stored value disagrees with its
    /// descriptor's primitive kind (possible only through forged handles).
    ///
    /// # Panics
    ///
    /// Panics if the store's control kind is not registered in the registry.
    pub fn emit_store(&self, store: &PropertyStore) -> Result<ClientDescriptor, PropertyError> {
        let kind = store.control();
        let Some(control_name) = self.registry.control_name(kind) else {
            panic!("{kind} is not a registered control kind");
        };
        let Some(behavior) = self.registry.behavior(kind) else {
            panic!("{kind} is not a registered control kind");
        };

        let mut entries = Vec::with_capacity(self.registry.property_count(kind));
        for registration in self.registry.properties(kind) {
            if registration.required() && !store.has_id(registration.id()) {
                return Err(PropertyError::MissingRequiredProperty {
                    control: control_name.into(),
                    name: registration.name().into(),
                });
            }

            let value = store
                .get_raw(registration.id())
                .cloned()
                .unwrap_or_else(|| registration.default().clone());
            let value = registration.apply_transform(value);

            match registration.kind() {
                ClientKind::Value => entries.push((registration.client_name(), value)),
                ClientKind::ElementRef => {
                    let id = expect_str(registration.name(), &value)?;
                    if !id.is_empty() {
                        entries.push((registration.client_name(), value));
                    }
                }
                ClientKind::EventHandler => {
                    let handler = expect_str(registration.name(), &value)?;
                    if handler.is_empty() {
                        continue;
                    }
                    if !is_valid_handler_name(handler) {
                        return Err(PropertyError::InvalidHandlerName {
                            name: registration.name().into(),
                            value: handler.into(),
                        });
                    }
                    entries.push((registration.client_name(), value));
                }
            }
        }

        Ok(ClientDescriptor::new(
            store.control_id().into(),
            behavior,
            store.client_state().map(Into::into),
            entries,
        ))
    }
}

/// Element references and handler names are registered as string
/// descriptors, so a non-string value here means a forged handle bypassed
/// bind-time checking.
fn expect_str<'v>(name: &str, value: &'v ScriptValue) -> Result<&'v str, PropertyError> {
    value.as_str().ok_or_else(|| PropertyError::TypeMismatch {
        name: name.into(),
        expected: ValueKind::Str,
        found: value.kind(),
    })
}
