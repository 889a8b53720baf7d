// Copyright 2026 the Graft Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Graft Client: client descriptor emission for extender properties.
//!
//! This crate projects the property state held by `graft_property` into the
//! flat payload a client runtime consumes to instantiate behaviors. It is
//! the render-time half of the extender property contract:
//!
//! - [`DescriptorEmitter`] walks a control type's registered descriptors in
//!   registration order, resolves each property's effective value (stored or
//!   default), applies per-descriptor transform strategies, and enforces the
//!   emission rules: required properties must have been explicitly set,
//!   unset element references and handler names are omitted rather than
//!   serialized empty, and handler names are validated before they cross
//!   into client-executed script.
//! - [`ClientDescriptor`] is the resulting payload: the instance id, the
//!   behavior class name, optional client state, and the entries under their
//!   client-facing names. It renders itself as flat JSON, and
//!   [`render_page_payload`] wraps a page's descriptors into the
//!   side-channel object keyed by control id.
//!
//! Emission is pure: it never mutates the store, the same store state always
//! produces an identical payload, and a failed emission produces nothing.
//!
//! ## Quick Start
//!
//! ```rust
//! use graft_client::DescriptorEmitter;
//! use graft_property::{ControlRegistry, PropertyDescriptorBuilder, PropertyStore};
//!
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
//! let mut store = PropertyStore::new(watermark, "TextBox1");
//! store.set(&registry, text, String::from("Enter name")).unwrap();
//!
//! let descriptor = DescriptorEmitter::new(&registry).emit_store(&store).unwrap();
//! assert_eq!(descriptor.get("text").unwrap().as_str(), Some("Enter name"));
//! ```
//!
//! ## `no_std` Support
//!
//! This crate is `no_std` and uses `alloc`. It does not depend on `std`.

#![no_std]

extern crate alloc;

mod emit;
mod handler;
mod payload;

pub use emit::DescriptorEmitter;
pub use handler::is_valid_handler_name;
pub use payload::{ClientDescriptor, render_page_payload};
