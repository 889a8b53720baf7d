// Copyright 2026 the Graft Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Registers two extender control types, binds a few instances, and prints
//! the page payload a host would embed in its output.

use graft_client::{DescriptorEmitter, render_page_payload};
use graft_property::{ControlRegistry, PropertyDescriptorBuilder, PropertyStore};

fn main() {
    // One-time registration phase, the equivalent of toolkit startup.
    let mut registry = ControlRegistry::new();

    let watermark = registry
        .register_control(
            "TextBoxWatermark",
            "Sys.Extended.UI.TextBoxWatermarkBehavior",
        )
        .expect("fresh registry");
    let watermark_text = registry
        .register(
            watermark,
            "WatermarkText",
            PropertyDescriptorBuilder::new("text", String::new())
                .required(true)
                .build(),
        )
        .expect("fresh control type");
    let watermark_class = registry
        .register(
            watermark,
            "WatermarkCssClass",
            PropertyDescriptorBuilder::new("class", String::new()).build(),
        )
        .expect("fresh control type");
    registry.require_script(watermark, "Common", 0);

    let picker = registry
        .register_control("ColorPicker", "Sys.Extended.UI.ColorPickerBehavior")
        .expect("fresh registry");
    let picker_button = registry
        .register(
            picker,
            "PopupButtonID",
            PropertyDescriptorBuilder::new("button", String::new())
                .element_ref()
                .build(),
        )
        .expect("fresh control type");
    let picker_showing = registry
        .register(
            picker,
            "OnClientShowing",
            PropertyDescriptorBuilder::new("showing", String::new())
                .event_handler()
                .build(),
        )
        .expect("fresh control type");
    registry.require_script(picker, "Common", 0);
    registry.require_script(picker, "Popup", 1);

    // Per-instance binding, the equivalent of markup attributes.
    let mut name_box = PropertyStore::new(watermark, "NameTextBox");
    name_box
        .set(&registry, watermark_text, "Enter your name".into())
        .expect("registered property");
    name_box
        .set(&registry, watermark_class, "watermarked".into())
        .expect("registered property");
    name_box.set_client_state(Some("Focused".into()));

    let mut color_box = PropertyStore::new(picker, "ColorTextBox");
    color_box
        .set(&registry, picker_button, "colorButton".into())
        .expect("registered property");
    color_box
        .set(&registry, picker_showing, "onPickerShowing".into())
        .expect("registered property");

    // Render phase.
    let emitter = DescriptorEmitter::new(&registry);
    let descriptors = [
        emitter.emit_store(&name_box).expect("valid watermark state"),
        emitter.emit_store(&color_box).expect("valid picker state"),
    ];

    for (kind, name) in registry.controls() {
        let scripts: Vec<_> = registry
            .scripts(kind)
            .iter()
            .map(|script| script.name())
            .collect();
        println!("{name}: scripts {scripts:?}");
    }
    println!("{}", render_page_payload(&descriptors));
}
