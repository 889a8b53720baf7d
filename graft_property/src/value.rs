// Copyright 2026 the Graft Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Script value primitives.
//!
//! This module provides [`ScriptValue`], the flat serialization primitive an
//! extender property crosses to the client as, and [`ScriptType`], the trait
//! mapping Rust value types onto those primitives.
//!
//! Extender properties always end up in a flat client payload, so the store
//! holds the primitive representation directly and typed access converts at
//! the edges. This keeps the stored form identical to the emitted form and
//! lets the dynamic binding path check primitive kinds at bind time.

use alloc::string::String;
use core::fmt;

/// A flat client-side value.
///
/// These are the only shapes a property value can take once it crosses into
/// the client payload.
///
/// # Example
///
/// ```rust
/// use graft_property::{ScriptValue, ValueKind};
///
/// let value = ScriptValue::Int(42);
/// assert_eq!(value.kind(), ValueKind::Int);
/// assert_eq!(value.as_int(), Some(42));
/// assert_eq!(value.as_str(), None);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum ScriptValue {
    /// A string value.
    Str(String),
    /// A boolean value.
    Bool(bool),
    /// An integer value.
    Int(i64),
    /// A floating-point value.
    Num(f64),
}

impl ScriptValue {
    /// Returns the kind of this value.
    #[must_use]
    #[inline]
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Str(_) => ValueKind::Str,
            Self::Bool(_) => ValueKind::Bool,
            Self::Int(_) => ValueKind::Int,
            Self::Num(_) => ValueKind::Num,
        }
    }

    /// Returns the string contents, if this is a string value.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the boolean contents, if this is a boolean value.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the integer contents, if this is an integer value.
    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the numeric contents, if this is a floating-point value.
    #[must_use]
    pub fn as_num(&self) -> Option<f64> {
        match self {
            Self::Num(n) => Some(*n),
            _ => None,
        }
    }
}

impl From<&str> for ScriptValue {
    fn from(value: &str) -> Self {
        Self::Str(String::from(value))
    }
}

impl From<String> for ScriptValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<bool> for ScriptValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for ScriptValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for ScriptValue {
    fn from(value: f64) -> Self {
        Self::Num(value)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for ScriptValue {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Str(s) => serializer.serialize_str(s),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Int(i) => serializer.serialize_i64(*i),
            Self::Num(n) => serializer.serialize_f64(*n),
        }
    }
}

/// The kind of a [`ScriptValue`], used for bind-time type checks.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// A string value.
    Str,
    /// A boolean value.
    Bool,
    /// An integer value.
    Int,
    /// A floating-point value.
    Num,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Str => "string",
            Self::Bool => "boolean",
            Self::Int => "integer",
            Self::Num => "number",
        };
        f.write_str(name)
    }
}

/// A Rust value type that maps onto a script primitive.
///
/// Property descriptors are declared over `ScriptType` value types, so the
/// primitive kind of every property is known at registration time and typed
/// access through [`Property<T>`](crate::Property) converts losslessly.
///
/// # Example
///
/// ```rust
/// use graft_property::{ScriptType, ScriptValue, ValueKind};
///
/// assert_eq!(<bool as ScriptType>::KIND, ValueKind::Bool);
/// assert_eq!(true.into_script(), ScriptValue::Bool(true));
/// assert_eq!(bool::from_script(&ScriptValue::Bool(false)), Some(false));
/// assert_eq!(bool::from_script(&ScriptValue::Int(1)), None);
/// ```
pub trait ScriptType: Clone + 'static {
    /// The primitive kind values of this type serialize as.
    const KIND: ValueKind;

    /// Converts this value into its script primitive.
    fn into_script(self) -> ScriptValue;

    /// Recovers a value of this type from a script primitive.
    ///
    /// Returns `None` if the primitive has a different kind, or if the
    /// contents do not fit this type.
    fn from_script(value: &ScriptValue) -> Option<Self>;
}

impl ScriptType for String {
    const KIND: ValueKind = ValueKind::Str;

    fn into_script(self) -> ScriptValue {
        ScriptValue::Str(self)
    }

    fn from_script(value: &ScriptValue) -> Option<Self> {
        value.as_str().map(Self::from)
    }
}

impl ScriptType for bool {
    const KIND: ValueKind = ValueKind::Bool;

    fn into_script(self) -> ScriptValue {
        ScriptValue::Bool(self)
    }

    fn from_script(value: &ScriptValue) -> Option<Self> {
        value.as_bool()
    }
}

impl ScriptType for i64 {
    const KIND: ValueKind = ValueKind::Int;

    fn into_script(self) -> ScriptValue {
        ScriptValue::Int(self)
    }

    fn from_script(value: &ScriptValue) -> Option<Self> {
        value.as_int()
    }
}

impl ScriptType for i32 {
    const KIND: ValueKind = ValueKind::Int;

    fn into_script(self) -> ScriptValue {
        ScriptValue::Int(i64::from(self))
    }

    fn from_script(value: &ScriptValue) -> Option<Self> {
        value.as_int().and_then(|i| Self::try_from(i).ok())
    }
}

impl ScriptType for f64 {
    const KIND: ValueKind = ValueKind::Num;

    fn into_script(self) -> ScriptValue {
        ScriptValue::Num(self)
    }

    fn from_script(value: &ScriptValue) -> Option<Self> {
        value.as_num()
    }
}
