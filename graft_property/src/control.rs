// Copyright 2026 the Graft Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Extender control traits.
//!
//! This module provides the [`ExtenderControl`] trait for control types that
//! carry a property store, and [`ExtenderControlExt`] for convenient property
//! access methods.

use crate::error::PropertyError;
use crate::id::Property;
use crate::registry::ControlRegistry;
use crate::store::PropertyStore;
use crate::value::{ScriptType, ScriptValue};

/// A control instance that carries extender property state.
///
/// A concrete extender control owns exactly one [`PropertyStore`]; the trait
/// exposes it so binding and emission can be written against any control.
///
/// # Example
///
/// ```rust
/// use graft_property::{ControlKind, ExtenderControl, PropertyStore};
///
/// struct WatermarkExtender {
///     store: PropertyStore,
/// }
///
/// impl WatermarkExtender {
///     fn new(kind: ControlKind, id: &str) -> Self {
///         Self {
///             store: PropertyStore::new(kind, id),
///         }
///     }
/// }
///
/// impl ExtenderControl for WatermarkExtender {
///     fn property_store(&self) -> &PropertyStore {
///         &self.store
///     }
///
///     fn property_store_mut(&mut self) -> &mut PropertyStore {
///         &mut self.store
///     }
/// }
/// ```
pub trait ExtenderControl {
    /// Returns a reference to the control's property store.
    fn property_store(&self) -> &PropertyStore;

    /// Returns a mutable reference to the control's property store.
    fn property_store_mut(&mut self) -> &mut PropertyStore;
}

/// Extension methods for [`ExtenderControl`].
///
/// These forward to the control's [`PropertyStore`], so property accessors on
/// a concrete control are one-liners.
pub trait ExtenderControlExt: ExtenderControl {
    /// Gets a property value, falling back to `fallback` if never set.
    fn get<T: ScriptType>(&self, property: Property<T>, fallback: T) -> T {
        self.property_store().get(property, fallback)
    }

    /// Sets a property value.
    ///
    /// # Errors
    ///
    /// See [`PropertyStore::set`].
    fn set<T: ScriptType>(
        &mut self,
        registry: &ControlRegistry,
        property: Property<T>,
        value: T,
    ) -> Result<(), PropertyError> {
        self.property_store_mut().set(registry, property, value)
    }

    /// Returns `true` only if the property was explicitly set.
    fn has<T: ScriptType>(&self, property: Property<T>) -> bool {
        self.property_store().has(property)
    }

    /// Gets the effective value: the stored value if explicitly set, else
    /// the registered default.
    ///
    /// # Panics
    ///
    /// Panics if the property is not registered in the registry with value
    /// type `T`.
    fn effective<T: ScriptType>(&self, property: Property<T>, registry: &ControlRegistry) -> T {
        let store = self.property_store();
        if let Some(raw) = store.get_raw(property.id())
            && let Some(value) = T::from_script(raw)
        {
            return value;
        }
        let default: Option<T> = registry
            .registration(property.id())
            .map(|registration| registration.default())
            .and_then(T::from_script);
        let Some(default) = default else {
            panic!("{} is not registered with this value type", property.id());
        };
        default
    }

    /// Gets the stored script value for a property, if explicitly set.
    fn get_raw(&self, property: Property<impl ScriptType>) -> Option<&ScriptValue> {
        self.property_store().get_raw(property.id())
    }
}

impl<C: ExtenderControl + ?Sized> ExtenderControlExt for C {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::PropertyDescriptorBuilder;
    use crate::id::ControlKind;
    use alloc::string::{String, ToString};

    struct WatermarkExtender {
        store: PropertyStore,
    }

    impl ExtenderControl for WatermarkExtender {
        fn property_store(&self) -> &PropertyStore {
            &self.store
        }

        fn property_store_mut(&mut self) -> &mut PropertyStore {
            &mut self.store
        }
    }

    fn setup() -> (ControlRegistry, ControlKind, Property<String>) {
        let mut registry = ControlRegistry::new();
        let watermark = registry
            .register_control(
                "TextBoxWatermark",
                "Sys.Extended.UI.TextBoxWatermarkBehavior",
            )
            .unwrap();
        let text = registry
            .register(
                watermark,
                "WatermarkText",
                PropertyDescriptorBuilder::new("text", String::from("(empty)")).build(),
            )
            .unwrap();
        (registry, watermark, text)
    }

    #[test]
    fn control_get_set_has() {
        let (registry, watermark, text) = setup();
        let mut control = WatermarkExtender {
            store: PropertyStore::new(watermark, "TextBox1"),
        };

        assert!(!control.has(text));
        control
            .set(&registry, text, "Enter name".to_string())
            .unwrap();
        assert!(control.has(text));
        assert_eq!(control.get(text, String::new()), "Enter name");
    }

    #[test]
    fn control_effective_falls_back_to_default() {
        let (registry, watermark, text) = setup();
        let mut control = WatermarkExtender {
            store: PropertyStore::new(watermark, "TextBox1"),
        };

        assert_eq!(control.effective(text, &registry), "(empty)");

        control.set(&registry, text, "set".to_string()).unwrap();
        assert_eq!(control.effective(text, &registry), "set");
    }
}
