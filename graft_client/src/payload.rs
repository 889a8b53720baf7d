// Copyright 2026 the Graft Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The client descriptor payload.
//!
//! This module provides [`ClientDescriptor`], the flat payload handed to the
//! client runtime to instantiate a behavior, and helpers for rendering one
//! or more descriptors as JSON text embedded in page output.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use core::fmt::Write as _;

use graft_property::ScriptValue;

/// The serialized description of one control instance's behavior.
///
/// A descriptor is a transient projection of a property store: it is
/// recomputed on each emission and never persisted. Entries appear under
/// their client-facing names, in descriptor registration order, with unset
/// element references and handler names omitted.
///
/// The JSON rendering reserves the keys `behavior`, `id`, and `state` for
/// the behavior class name, the instance id, and the optional client state;
/// client property names must not collide with them.
#[derive(Clone, Debug, PartialEq)]
pub struct ClientDescriptor {
    control_id: String,
    behavior: &'static str,
    client_state: Option<String>,
    entries: Vec<(&'static str, ScriptValue)>,
}

impl ClientDescriptor {
    pub(crate) fn new(
        control_id: String,
        behavior: &'static str,
        client_state: Option<String>,
        entries: Vec<(&'static str, ScriptValue)>,
    ) -> Self {
        Self {
            control_id,
            behavior,
            client_state,
            entries,
        }
    }

    /// Returns the client id of the instance this descriptor belongs to.
    #[must_use]
    #[inline]
    pub fn control_id(&self) -> &str {
        &self.control_id
    }

    /// Returns the client behavior class name.
    #[must_use]
    #[inline]
    pub fn behavior(&self) -> &'static str {
        self.behavior
    }

    /// Returns the client state string, if the instance carried one.
    #[must_use]
    pub fn client_state(&self) -> Option<&str> {
        self.client_state.as_deref()
    }

    /// Returns the number of property entries.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no property entries were emitted.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Gets an entry by its client-facing name.
    #[must_use]
    pub fn get(&self, client_name: &str) -> Option<&ScriptValue> {
        self.entries
            .iter()
            .find(|(name, _)| *name == client_name)
            .map(|(_, value)| value)
    }

    /// Returns the entries in emission order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &ScriptValue)> + '_ {
        self.entries.iter().map(|(name, value)| (*name, value))
    }

    /// Writes this descriptor as a flat JSON object.
    ///
    /// The object starts with `behavior` and `id`, then `state` if client
    /// state is set, then the property entries in emission order.
    ///
    /// # Errors
    ///
    /// Forwards errors from the underlying writer.
    pub fn write_json<W: fmt::Write>(&self, w: &mut W) -> fmt::Result {
        w.write_char('{')?;
        write_json_string(w, "behavior")?;
        w.write_char(':')?;
        write_json_string(w, self.behavior)?;
        w.write_char(',')?;
        write_json_string(w, "id")?;
        w.write_char(':')?;
        write_json_string(w, &self.control_id)?;
        if let Some(state) = &self.client_state {
            w.write_char(',')?;
            write_json_string(w, "state")?;
            w.write_char(':')?;
            write_json_string(w, state)?;
        }
        for (name, value) in &self.entries {
            w.write_char(',')?;
            write_json_string(w, name)?;
            w.write_char(':')?;
            write_json_value(w, value)?;
        }
        w.write_char('}')
    }

    /// Renders this descriptor as a JSON string.
    #[must_use]
    pub fn to_json(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = self.write_json(&mut out);
        out
    }
}

impl fmt::Display for ClientDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_json(f)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for ClientDescriptor {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let extra = 2 + usize::from(self.client_state.is_some());
        let mut map = serializer.serialize_map(Some(self.entries.len() + extra))?;
        map.serialize_entry("behavior", self.behavior)?;
        map.serialize_entry("id", &self.control_id)?;
        if let Some(state) = &self.client_state {
            map.serialize_entry("state", state)?;
        }
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Renders the page-level side-channel payload: a JSON object mapping each
/// descriptor's control id to its flat descriptor object.
///
/// # Example
///
/// ```rust
/// use graft_client::render_page_payload;
///
/// assert_eq!(render_page_payload(&[]), "{}");
/// ```
#[must_use]
pub fn render_page_payload(descriptors: &[ClientDescriptor]) -> String {
    let mut out = String::new();
    let _ = out.write_char('{');
    for (index, descriptor) in descriptors.iter().enumerate() {
        if index > 0 {
            let _ = out.write_char(',');
        }
        let _ = write_json_string(&mut out, descriptor.control_id());
        let _ = out.write_char(':');
        let _ = descriptor.write_json(&mut out);
    }
    let _ = out.write_char('}');
    out
}

fn write_json_value<W: fmt::Write>(w: &mut W, value: &ScriptValue) -> fmt::Result {
    match value {
        ScriptValue::Str(s) => write_json_string(w, s),
        ScriptValue::Bool(b) => w.write_str(if *b { "true" } else { "false" }),
        ScriptValue::Int(i) => write!(w, "{i}"),
        ScriptValue::Num(n) => {
            // JSON has no representation for non-finite numbers.
            if n.is_finite() {
                write!(w, "{n}")
            } else {
                w.write_str("null")
            }
        }
    }
}

fn write_json_string<W: fmt::Write>(w: &mut W, s: &str) -> fmt::Result {
    w.write_char('"')?;
    for c in s.chars() {
        match c {
            '"' => w.write_str("\\\"")?,
            '\\' => w.write_str("\\\\")?,
            '\n' => w.write_str("\\n")?,
            '\r' => w.write_str("\\r")?,
            '\t' => w.write_str("\\t")?,
            c if (c as u32) < 0x20 => write!(w, "\\u{:04x}", c as u32)?,
            c => w.write_char(c)?,
        }
    }
    w.write_char('"')
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use alloc::vec;

    fn watermark_descriptor() -> ClientDescriptor {
        ClientDescriptor::new(
            "TextBox1".to_string(),
            "Sys.Extended.UI.TextBoxWatermarkBehavior",
            None,
            vec![
                ("text", ScriptValue::from("Enter name")),
                ("enabled", ScriptValue::from(true)),
            ],
        )
    }

    #[test]
    fn accessors() {
        let descriptor = watermark_descriptor();
        assert_eq!(descriptor.control_id(), "TextBox1");
        assert_eq!(
            descriptor.behavior(),
            "Sys.Extended.UI.TextBoxWatermarkBehavior"
        );
        assert_eq!(descriptor.client_state(), None);
        assert_eq!(descriptor.len(), 2);
        assert!(!descriptor.is_empty());
        assert_eq!(descriptor.get("text"), Some(&ScriptValue::from("Enter name")));
        assert_eq!(descriptor.get("button"), None);
    }

    #[test]
    fn json_shape() {
        let descriptor = watermark_descriptor();
        assert_eq!(
            descriptor.to_json(),
            r#"{"behavior":"Sys.Extended.UI.TextBoxWatermarkBehavior","id":"TextBox1","text":"Enter name","enabled":true}"#
        );
    }

    #[test]
    fn json_includes_state_when_set() {
        let descriptor = ClientDescriptor::new(
            "TextBox1".to_string(),
            "Sys.Extended.UI.TextBoxWatermarkBehavior",
            Some("Focused".to_string()),
            vec![("text", ScriptValue::from("Enter name"))],
        );
        assert_eq!(
            descriptor.to_json(),
            r#"{"behavior":"Sys.Extended.UI.TextBoxWatermarkBehavior","id":"TextBox1","state":"Focused","text":"Enter name"}"#
        );
    }

    #[test]
    fn json_escaping() {
        let descriptor = ClientDescriptor::new(
            "ctl\"1".to_string(),
            "B",
            None,
            vec![("text", ScriptValue::from("line1\nline2\t\"quoted\"\\"))],
        );
        assert_eq!(
            descriptor.to_json(),
            r#"{"behavior":"B","id":"ctl\"1","text":"line1\nline2\t\"quoted\"\\"}"#
        );
    }

    #[test]
    fn json_numbers() {
        let descriptor = ClientDescriptor::new(
            "c1".to_string(),
            "B",
            None,
            vec![
                ("count", ScriptValue::Int(-3)),
                ("opacity", ScriptValue::Num(0.5)),
                ("bad", ScriptValue::Num(f64::NAN)),
            ],
        );
        assert_eq!(
            descriptor.to_json(),
            r#"{"behavior":"B","id":"c1","count":-3,"opacity":0.5,"bad":null}"#
        );
    }

    #[test]
    fn json_is_parseable() {
        let parsed: serde_json::Value =
            serde_json::from_str(&watermark_descriptor().to_json()).unwrap();
        assert_eq!(parsed["id"], "TextBox1");
        assert_eq!(parsed["text"], "Enter name");
        assert_eq!(parsed["enabled"], true);
    }

    #[test]
    fn page_payload() {
        let a = watermark_descriptor();
        let b = ClientDescriptor::new("CP1".to_string(), "B", None, vec![]);
        let payload = render_page_payload(&[a, b]);

        let parsed: serde_json::Value = serde_json::from_str(&payload).unwrap();
        assert_eq!(parsed["TextBox1"]["text"], "Enter name");
        assert_eq!(parsed["CP1"]["behavior"], "B");
        assert_eq!(render_page_payload(&[]), "{}");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_matches_hand_rendering() {
        let descriptor = watermark_descriptor();
        assert_eq!(
            serde_json::to_string(&descriptor).unwrap(),
            descriptor.to_json()
        );
    }
}
