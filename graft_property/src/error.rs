// Copyright 2026 the Graft Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types.
//!
//! All errors here indicate a configuration or programming mistake by a
//! control author, not a transient condition. They are raised synchronously
//! at the call site and are never retryable.

use alloc::string::String;
use thiserror::Error;

use crate::value::ValueKind;

/// An error from registration, binding, or emission.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PropertyError {
    /// The named property is not registered on the control type.
    #[error("control type '{control}' has no property named '{name}'")]
    UnknownProperty {
        /// The control type name.
        control: String,
        /// The unregistered property name.
        name: String,
    },

    /// A control type with this name is already registered.
    #[error("control type '{name}' is already registered")]
    DuplicateControl {
        /// The control type name.
        name: String,
    },

    /// The property is already registered with conflicting metadata.
    #[error("property '{name}' on control type '{control}' is already registered with different metadata")]
    DuplicateProperty {
        /// The control type name.
        control: String,
        /// The conflicting property name.
        name: String,
    },

    /// A required property was never explicitly set on the instance.
    #[error("required property '{name}' on control type '{control}' was never set")]
    MissingRequiredProperty {
        /// The control type name.
        control: String,
        /// The required property name.
        name: String,
    },

    /// An event-handler property holds a malformed handler name.
    #[error("property '{name}' holds an invalid handler name: '{value}'")]
    InvalidHandlerName {
        /// The property name.
        name: String,
        /// The rejected handler-name value.
        value: String,
    },

    /// A bound value has a different primitive kind than the descriptor.
    #[error("property '{name}' expects a {expected} value, got {found}")]
    TypeMismatch {
        /// The property name.
        name: String,
        /// The kind declared by the descriptor.
        expected: ValueKind,
        /// The kind of the rejected value.
        found: ValueKind,
    },
}
