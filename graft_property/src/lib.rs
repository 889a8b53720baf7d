// Copyright 2026 the Graft Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Graft Property: declarative property state for extender controls.
//!
//! An extender control is a server-side declarative object that attaches
//! client-side behavior to an existing UI element. This crate provides the
//! property half of that contract: typed descriptors registered once per
//! control type, and a sparse per-instance store the control's setters write
//! into. Projection into a client payload is provided by `graft_client`.
//!
//! ## Core Concepts
//!
//! ### Descriptors and the registry
//!
//! A control author registers, once per control type, a
//! [`PropertyDescriptor`] for every property: default value, required flag,
//! client-facing name, and serialization kind ([`ClientKind`]). The
//! [`ControlRegistry`] erases descriptors into [`PropertyRegistration`]
//! entries and hands back typed [`Property<T>`] keys. Registration order is
//! preserved, making emission deterministic.
//!
//! ### Property storage
//!
//! [`PropertyStore`] holds the explicitly set values of one control
//! instance. A value is either explicitly set or absent; absent reads fall
//! back to the caller's fallback (or the registered default, through
//! [`ExtenderControlExt::effective`]). There is no unset operation.
//!
//! ### Script values
//!
//! Values are stored as [`ScriptValue`] primitives, the flat representation
//! they are serialized to the client as. The [`ScriptType`] trait maps Rust
//! value types onto primitives, so typed access converts at the edges and
//! the dynamic name-based binding path can check kinds at bind time.
//!
//! ## Quick Start
//!
//! ```rust
//! use graft_property::{
//!     ControlRegistry, PropertyDescriptorBuilder, PropertyStore,
//! };
//!
//! // One-time registration phase.
//! let mut registry = ControlRegistry::new();
//! let watermark = registry
//!     .register_control("TextBoxWatermark", "Sys.Extended.UI.TextBoxWatermarkBehavior")
//!     .unwrap();
//! let text = registry
//!     .register(
//!         watermark,
//!         "WatermarkText",
//!         PropertyDescriptorBuilder::new("text", String::new())
//!             .required(true)
//!             .build(),
//!     )
//!     .unwrap();
//!
//! // Per-instance property binding.
//! let mut store = PropertyStore::new(watermark, "TextBox1");
//! store.set(&registry, text, String::from("Enter name")).unwrap();
//!
//! assert!(store.has(text));
//! assert_eq!(store.get(text, String::new()), "Enter name");
//! ```
//!
//! ## Concurrency
//!
//! A store belongs to one control instance and is never shared; the registry
//! is written during a one-time startup phase and read-only afterwards. If a
//! host registers lazily from concurrent paths, it must guard registration
//! with a once-only initializer. Nothing here blocks or performs I/O.
//!
//! ## `no_std` Support
//!
//! This crate is `no_std` and uses `alloc`. It does not depend on `std`.

#![no_std]

extern crate alloc;

mod control;
mod descriptor;
mod error;
mod id;
mod registry;
mod store;
mod value;

pub use control::{ExtenderControl, ExtenderControlExt};
pub use descriptor::{
    ClientKind, PropertyDescriptor, PropertyDescriptorBuilder, TransformCallback,
};
pub use error::PropertyError;
pub use id::{ControlKind, Property, PropertyId};
pub use registry::{ControlRegistry, PropertyRegistration, ScriptReference};
pub use store::PropertyStore;
pub use value::{ScriptType, ScriptValue, ValueKind};
