// Copyright 2026 the Graft Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The process-wide control registry.
//!
//! This module provides [`ControlRegistry`] for registering control types and
//! their property descriptors, and looking both up at bind and emission time.
//!
//! The registry is built once during a startup registration phase and is
//! read-only afterwards. Hosts that register lazily from concurrent paths
//! must guard registration with a once-only initializer; nothing here blocks
//! or performs I/O.

use alloc::boxed::Box;
use alloc::vec::Vec;
use hashbrown::HashMap;

use crate::descriptor::{ClientKind, PropertyDescriptor};
use crate::error::PropertyError;
use crate::id::{ControlKind, Property, PropertyId};
use crate::value::{ScriptType, ScriptValue, ValueKind};

/// Type-erased transform applied to a property's script value at emission.
type ErasedTransform = Box<dyn Fn(ScriptValue) -> ScriptValue + Send + Sync>;

/// A registration entry for one property.
///
/// This is the type-erased form of a [`PropertyDescriptor`], installed by
/// [`ControlRegistry::register`]. The default value is stored as its script
/// primitive so it can be compared and emitted without knowing the original
/// Rust type.
pub struct PropertyRegistration {
    id: PropertyId,
    name: &'static str,
    client_name: &'static str,
    required: bool,
    kind: ClientKind,
    value_kind: ValueKind,
    default: ScriptValue,
    transform: Option<ErasedTransform>,
}

impl PropertyRegistration {
    /// Returns the property's ID.
    #[must_use]
    #[inline]
    pub fn id(&self) -> PropertyId {
        self.id
    }

    /// Returns the property's server-side name.
    #[must_use]
    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the client-facing name the property is emitted under.
    #[must_use]
    #[inline]
    pub fn client_name(&self) -> &'static str {
        self.client_name
    }

    /// Returns whether the property must be explicitly set before emission.
    #[must_use]
    #[inline]
    pub fn required(&self) -> bool {
        self.required
    }

    /// Returns the serialization kind of the property.
    #[must_use]
    #[inline]
    pub fn kind(&self) -> ClientKind {
        self.kind
    }

    /// Returns the primitive kind of the property's values.
    #[must_use]
    #[inline]
    pub fn value_kind(&self) -> ValueKind {
        self.value_kind
    }

    /// Returns the default value as its script primitive.
    #[must_use]
    #[inline]
    pub fn default(&self) -> &ScriptValue {
        &self.default
    }

    /// Returns whether a transform strategy is installed.
    #[must_use]
    #[inline]
    pub fn has_transform(&self) -> bool {
        self.transform.is_some()
    }

    /// Applies the transform strategy, if one is installed.
    #[must_use]
    pub fn apply_transform(&self, value: ScriptValue) -> ScriptValue {
        match &self.transform {
            Some(transform) => transform(value),
            None => value,
        }
    }
}

impl core::fmt::Debug for PropertyRegistration {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PropertyRegistration")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("client_name", &self.client_name)
            .field("required", &self.required)
            .field("kind", &self.kind)
            .field("value_kind", &self.value_kind)
            .field("default", &self.default)
            .field("has_transform", &self.transform.is_some())
            .finish()
    }
}

/// A client script resource a control type depends on.
///
/// Mirrors the declarative "required script" wiring of extender controls: a
/// script name plus a load-order index the host uses to sequence includes.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ScriptReference {
    name: &'static str,
    order: u32,
}

impl ScriptReference {
    /// Returns the script resource name.
    #[must_use]
    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the load-order index.
    #[must_use]
    #[inline]
    pub fn order(&self) -> u32 {
        self.order
    }
}

struct ControlEntry {
    name: &'static str,
    behavior: &'static str,
    properties: Vec<PropertyRegistration>,
    by_name: HashMap<&'static str, u16>,
    scripts: Vec<ScriptReference>,
}

/// A registry of control types and their property descriptors.
///
/// Control types and properties are registered once at startup; afterwards
/// the registry provides lookup by name or handle, and iteration over a
/// control type's descriptors in registration order. Registration order is
/// what makes emission deterministic.
///
/// # Example
///
/// ```rust
/// use graft_property::{ControlRegistry, PropertyDescriptorBuilder};
///
/// let mut registry = ControlRegistry::new();
/// let watermark = registry
///     .register_control("TextBoxWatermark", "Sys.Extended.UI.TextBoxWatermarkBehavior")
///     .unwrap();
///
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
/// assert_eq!(registry.control_name(watermark), Some("TextBoxWatermark"));
/// assert_eq!(registry.resolve(watermark, "WatermarkText").unwrap().id(), text.id());
/// ```
#[derive(Default)]
pub struct ControlRegistry {
    controls: Vec<ControlEntry>,
    by_name: HashMap<&'static str, ControlKind>,
}

impl ControlRegistry {
    /// Creates a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a control type with its client behavior class name.
    ///
    /// Returns a [`ControlKind`] handle used for registering properties and
    /// creating stores.
    ///
    /// # Errors
    ///
    /// Fails with [`PropertyError::DuplicateControl`] if a control type with
    /// the same name is already registered.
    ///
    /// # Panics
    ///
    /// Panics if more than 65,536 control types are registered.
    pub fn register_control(
        &mut self,
        name: &'static str,
        behavior: &'static str,
    ) -> Result<ControlKind, PropertyError> {
        if self.by_name.contains_key(name) {
            return Err(PropertyError::DuplicateControl { name: name.into() });
        }
        assert!(
            self.controls.len() < u16::MAX as usize,
            "Too many control types registered (max {})",
            u16::MAX
        );

        #[expect(clippy::cast_possible_truncation, reason = "checked above")]
        let kind = ControlKind::new(self.controls.len() as u16);

        self.controls.push(ControlEntry {
            name,
            behavior,
            properties: Vec::new(),
            by_name: HashMap::new(),
            scripts: Vec::new(),
        });
        self.by_name.insert(name, kind);

        Ok(kind)
    }

    /// Registers a property descriptor on a control type.
    ///
    /// Returns a type-safe [`Property<T>`] handle for accessing the property.
    ///
    /// Registration is idempotent: registering the same `(control, name)`
    /// pair again with identical metadata returns the existing handle and
    /// leaves the registry unchanged. Descriptors carrying a transform
    /// strategy are never considered identical, since closures cannot be
    /// compared.
    ///
    /// # Errors
    ///
    /// Fails with [`PropertyError::DuplicateProperty`] if the name is already
    /// registered on this control type with conflicting metadata.
    ///
    /// # Panics
    ///
    /// Panics if `control` is not a registered control kind, or if more than
    /// 65,536 properties are registered on one control type.
    pub fn register<T: ScriptType>(
        &mut self,
        control: ControlKind,
        name: &'static str,
        descriptor: PropertyDescriptor<T>,
    ) -> Result<Property<T>, PropertyError> {
        let entry = self.entry_mut(control);
        let (default, required, client_name, kind, transform) = descriptor.into_parts();
        let default = default.into_script();

        if let Some(&slot) = entry.by_name.get(name) {
            let existing = &entry.properties[slot as usize];
            let identical = existing.value_kind == T::KIND
                && existing.client_name == client_name
                && existing.required == required
                && existing.kind == kind
                && existing.default == default
                && existing.transform.is_none()
                && transform.is_none();
            if identical {
                return Ok(Property::from_id(existing.id));
            }
            return Err(PropertyError::DuplicateProperty {
                control: entry.name.into(),
                name: name.into(),
            });
        }

        assert!(
            entry.properties.len() < u16::MAX as usize,
            "Too many properties registered on '{}' (max {})",
            entry.name,
            u16::MAX
        );

        #[expect(clippy::cast_possible_truncation, reason = "checked above")]
        let slot = entry.properties.len() as u16;
        let id = PropertyId::new(control, slot);

        let transform = transform.map(|callback| -> ErasedTransform {
            Box::new(move |raw: ScriptValue| match T::from_script(&raw) {
                Some(value) => callback(value).into_script(),
                None => raw,
            })
        });

        entry.properties.push(PropertyRegistration {
            id,
            name,
            client_name,
            required,
            kind,
            value_kind: T::KIND,
            default,
            transform,
        });
        entry.by_name.insert(name, slot);

        Ok(Property::from_id(id))
    }

    /// Records a client script resource the control type depends on.
    ///
    /// Re-requiring a script name already recorded on the control type is a
    /// no-op.
    ///
    /// # Panics
    ///
    /// Panics if `control` is not a registered control kind.
    pub fn require_script(&mut self, control: ControlKind, name: &'static str, order: u32) {
        let entry = self.entry_mut(control);
        if entry.scripts.iter().any(|script| script.name == name) {
            return;
        }
        let index = entry.scripts.partition_point(|script| script.order <= order);
        entry.scripts.insert(index, ScriptReference { name, order });
    }

    /// Returns the script resources required by a control type, sorted by
    /// load order.
    ///
    /// # Panics
    ///
    /// Panics if `control` is not a registered control kind.
    #[must_use]
    pub fn scripts(&self, control: ControlKind) -> &[ScriptReference] {
        &self.entry(control).scripts
    }

    /// Returns the number of registered control types.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.controls.len()
    }

    /// Returns `true` if no control types are registered.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.controls.is_empty()
    }

    /// Looks up a control type by name.
    #[must_use]
    pub fn control_by_name(&self, name: &str) -> Option<ControlKind> {
        self.by_name.get(name).copied()
    }

    /// Returns the name of a control type.
    #[must_use]
    pub fn control_name(&self, control: ControlKind) -> Option<&'static str> {
        self.controls
            .get(control.index() as usize)
            .map(|entry| entry.name)
    }

    /// Returns the client behavior class name of a control type.
    #[must_use]
    pub fn behavior(&self, control: ControlKind) -> Option<&'static str> {
        self.controls
            .get(control.index() as usize)
            .map(|entry| entry.behavior)
    }

    /// Returns the number of properties registered on a control type.
    ///
    /// # Panics
    ///
    /// Panics if `control` is not a registered control kind.
    #[must_use]
    pub fn property_count(&self, control: ControlKind) -> usize {
        self.entry(control).properties.len()
    }

    /// Resolves a property by name on a control type.
    ///
    /// # Errors
    ///
    /// Fails with [`PropertyError::UnknownProperty`] if no property with this
    /// name is registered on the control type.
    ///
    /// # Panics
    ///
    /// Panics if `control` is not a registered control kind.
    pub fn resolve(
        &self,
        control: ControlKind,
        name: &str,
    ) -> Result<&PropertyRegistration, PropertyError> {
        let entry = self.entry(control);
        entry
            .by_name
            .get(name)
            .map(|&slot| &entry.properties[slot as usize])
            .ok_or_else(|| PropertyError::UnknownProperty {
                control: entry.name.into(),
                name: name.into(),
            })
    }

    /// Returns the registration for a property ID, if both the control kind
    /// and slot are registered.
    #[must_use]
    pub fn registration(&self, id: PropertyId) -> Option<&PropertyRegistration> {
        self.controls
            .get(id.control().index() as usize)
            .and_then(|entry| entry.properties.get(id.slot() as usize))
    }

    /// Returns a control type's property registrations in registration order.
    ///
    /// Emission walks this sequence, so registration order is the order of
    /// entries in the client payload.
    ///
    /// # Panics
    ///
    /// Panics if `control` is not a registered control kind.
    pub fn properties(
        &self,
        control: ControlKind,
    ) -> impl Iterator<Item = &PropertyRegistration> + '_ {
        self.entry(control).properties.iter()
    }

    /// Returns an iterator over all registered control types.
    pub fn controls(&self) -> impl Iterator<Item = (ControlKind, &'static str)> + '_ {
        self.controls.iter().enumerate().map(|(index, entry)| {
            #[expect(clippy::cast_possible_truncation, reason = "index < len < u16::MAX")]
            (ControlKind::new(index as u16), entry.name)
        })
    }

    fn entry(&self, control: ControlKind) -> &ControlEntry {
        let Some(entry) = self.controls.get(control.index() as usize) else {
            panic!("{control} is not a registered control kind");
        };
        entry
    }

    fn entry_mut(&mut self, control: ControlKind) -> &mut ControlEntry {
        let Some(entry) = self.controls.get_mut(control.index() as usize) else {
            panic!("{control} is not a registered control kind");
        };
        entry
    }
}

impl core::fmt::Debug for ControlRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ControlRegistry")
            .field("count", &self.controls.len())
            .field(
                "controls",
                &self.controls.iter().map(|c| c.name).collect::<Vec<_>>(),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::PropertyDescriptorBuilder;
    use alloc::format;
    use alloc::string::String;
    use alloc::vec::Vec;

    fn watermark_registry() -> (ControlRegistry, ControlKind) {
        let mut registry = ControlRegistry::new();
        let watermark = registry
            .register_control(
                "TextBoxWatermark",
                "Sys.Extended.UI.TextBoxWatermarkBehavior",
            )
            .unwrap();
        (registry, watermark)
    }

    #[test]
    fn registry_new() {
        let registry = ControlRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
    }

    #[test]
    fn register_control() {
        let (registry, watermark) = watermark_registry();
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.control_name(watermark), Some("TextBoxWatermark"));
        assert_eq!(
            registry.behavior(watermark),
            Some("Sys.Extended.UI.TextBoxWatermarkBehavior")
        );
        assert_eq!(
            registry.control_by_name("TextBoxWatermark"),
            Some(watermark)
        );
        assert_eq!(registry.control_by_name("ColorPicker"), None);
    }

    #[test]
    fn register_control_duplicate() {
        let (mut registry, _) = watermark_registry();
        let err = registry
            .register_control("TextBoxWatermark", "Sys.Extended.UI.OtherBehavior")
            .unwrap_err();
        assert_eq!(
            err,
            PropertyError::DuplicateControl {
                name: "TextBoxWatermark".into()
            }
        );
    }

    #[test]
    fn register_property() {
        let (mut registry, watermark) = watermark_registry();
        let text = registry
            .register(
                watermark,
                "WatermarkText",
                PropertyDescriptorBuilder::new("text", String::new())
                    .required(true)
                    .build(),
            )
            .unwrap();

        assert_eq!(text.id().control(), watermark);
        assert_eq!(text.id().slot(), 0);
        assert_eq!(registry.property_count(watermark), 1);

        let registration = registry.resolve(watermark, "WatermarkText").unwrap();
        assert_eq!(registration.name(), "WatermarkText");
        assert_eq!(registration.client_name(), "text");
        assert!(registration.required());
        assert_eq!(registration.kind(), ClientKind::Value);
        assert_eq!(registration.value_kind(), ValueKind::Str);
        assert_eq!(registration.default(), &ScriptValue::Str(String::new()));
    }

    #[test]
    fn register_idempotent_when_identical() {
        let (mut registry, watermark) = watermark_registry();
        let build = || {
            PropertyDescriptorBuilder::new("text", String::new())
                .required(true)
                .build()
        };

        let first = registry
            .register(watermark, "WatermarkText", build())
            .unwrap();
        let second = registry
            .register(watermark, "WatermarkText", build())
            .unwrap();

        assert_eq!(first, second);
        assert_eq!(registry.property_count(watermark), 1);
    }

    #[test]
    fn register_conflicting_metadata_fails() {
        let (mut registry, watermark) = watermark_registry();
        registry
            .register(
                watermark,
                "WatermarkText",
                PropertyDescriptorBuilder::new("text", String::new()).build(),
            )
            .unwrap();

        // Same name, different client name.
        let err = registry
            .register(
                watermark,
                "WatermarkText",
                PropertyDescriptorBuilder::new("watermark", String::new()).build(),
            )
            .unwrap_err();
        assert_eq!(
            err,
            PropertyError::DuplicateProperty {
                control: "TextBoxWatermark".into(),
                name: "WatermarkText".into()
            }
        );
    }

    #[test]
    fn register_with_transform_is_never_identical() {
        let (mut registry, watermark) = watermark_registry();
        let build = || {
            PropertyDescriptorBuilder::new("text", String::new())
                .transform(|s: String| s)
                .build()
        };

        registry
            .register(watermark, "WatermarkText", build())
            .unwrap();
        let err = registry
            .register(watermark, "WatermarkText", build())
            .unwrap_err();
        assert!(matches!(err, PropertyError::DuplicateProperty { .. }));
    }

    #[test]
    fn resolve_unknown_property() {
        let (registry, watermark) = watermark_registry();
        let err = registry.resolve(watermark, "NoSuchProperty").unwrap_err();
        assert_eq!(
            err,
            PropertyError::UnknownProperty {
                control: "TextBoxWatermark".into(),
                name: "NoSuchProperty".into()
            }
        );
    }

    #[test]
    fn properties_preserve_registration_order() {
        let (mut registry, watermark) = watermark_registry();
        registry
            .register(
                watermark,
                "WatermarkText",
                PropertyDescriptorBuilder::new("text", String::new()).build(),
            )
            .unwrap();
        registry
            .register(
                watermark,
                "WatermarkCssClass",
                PropertyDescriptorBuilder::new("class", String::new()).build(),
            )
            .unwrap();
        registry
            .register(
                watermark,
                "EnabledOnClient",
                PropertyDescriptorBuilder::new("enabled", true).build(),
            )
            .unwrap();

        let names: Vec<_> = registry
            .properties(watermark)
            .map(PropertyRegistration::name)
            .collect();
        assert_eq!(
            names,
            ["WatermarkText", "WatermarkCssClass", "EnabledOnClient"]
        );
    }

    #[test]
    fn registration_by_id() {
        let (mut registry, watermark) = watermark_registry();
        let text = registry
            .register(
                watermark,
                "WatermarkText",
                PropertyDescriptorBuilder::new("text", String::new()).build(),
            )
            .unwrap();

        let registration = registry.registration(text.id()).unwrap();
        assert_eq!(registration.name(), "WatermarkText");

        let dangling = PropertyId::new(watermark, 99);
        assert!(registry.registration(dangling).is_none());
    }

    #[test]
    fn transform_applies_at_registration_kind() {
        let (mut registry, watermark) = watermark_registry();
        registry
            .register(
                watermark,
                "PopupPosition",
                PropertyDescriptorBuilder::new("popupPosition", 0_i64)
                    .transform(|v| v.clamp(0, 5))
                    .build(),
            )
            .unwrap();

        let registration = registry.resolve(watermark, "PopupPosition").unwrap();
        assert!(registration.has_transform());
        assert_eq!(
            registration.apply_transform(ScriptValue::Int(17)),
            ScriptValue::Int(5)
        );
        // A value of the wrong kind is passed through unchanged.
        assert_eq!(
            registration.apply_transform(ScriptValue::Bool(true)),
            ScriptValue::Bool(true)
        );
    }

    #[test]
    fn scripts_sorted_by_load_order() {
        let (mut registry, watermark) = watermark_registry();
        registry.require_script(watermark, "Threading", 2);
        registry.require_script(watermark, "Common", 0);
        registry.require_script(watermark, "Popup", 1);
        // Re-requiring an existing script is a no-op.
        registry.require_script(watermark, "Common", 4);

        let names: Vec<_> = registry
            .scripts(watermark)
            .iter()
            .map(ScriptReference::name)
            .collect();
        assert_eq!(names, ["Common", "Popup", "Threading"]);
    }

    #[test]
    fn controls_iterator() {
        let (mut registry, _) = watermark_registry();
        registry
            .register_control("ColorPicker", "Sys.Extended.UI.ColorPickerBehavior")
            .unwrap();

        let names: Vec<_> = registry.controls().map(|(_, name)| name).collect();
        assert_eq!(names, ["TextBoxWatermark", "ColorPicker"]);
    }

    #[test]
    #[should_panic(expected = "not a registered control kind")]
    fn unregistered_control_kind_panics() {
        let registry = ControlRegistry::new();
        let _ = registry.property_count(ControlKind::new(9));
    }

    #[test]
    fn registry_debug() {
        let (registry, _) = watermark_registry();
        let debug = format!("{:?}", registry);
        assert!(debug.contains("ControlRegistry"));
        assert!(debug.contains("TextBoxWatermark"));
    }
}
