//! Property-aware style updates used by the style panel.
//!
//! Colors and backgrounds interact: a gradient text color is drawn by
//! clipping a gradient background to the glyphs, so setting one of these
//! properties may rewrite several others.

use funnel_model::{Element, Styles};

fn set(styles: &mut Styles, property: &str, value: &str) {
    styles.insert(property.to_string(), value.to_string());
}

fn is_gradient(value: &str) -> bool {
    value.contains("gradient")
}

fn is_image(value: &str) -> bool {
    value.starts_with("url")
}

fn set_gradient_text(styles: &mut Styles, background: &str) {
    set(styles, "background", &format!("{background} text"));
    set(styles, "backgroundColor", "transparent");
    set(styles, "WebkitTextFillColor", "transparent");
    set(styles, "WebkitBackgroundClip", "text");
}

fn unset_gradient_text(styles: &mut Styles) {
    set(styles, "WebkitBackgroundClip", "unset");
    set(styles, "WebkitTextFillColor", "unset");
    set(styles, "background", "unset");
    set(styles, "backgroundImage", "none");
}

fn update_color(styles: &mut Styles, value: &str) {
    set(styles, "color", value);
    if is_gradient(value) {
        set_gradient_text(styles, value);
    } else {
        unset_gradient_text(styles);
    }
}

fn update_background_color(styles: &mut Styles, value: &str) {
    set(styles, "backgroundColor", value);

    if is_gradient(value) || is_image(value) {
        let color = styles
            .get("color")
            .filter(|color| !is_gradient(color))
            .cloned()
            .unwrap_or_default();
        set(styles, "background", value);
        set(styles, "color", &color);
    } else {
        set(styles, "background", "unset");
    }

    if !is_gradient(value) {
        unset_gradient_text(styles);
    }
}

fn update_background(styles: &mut Styles, value: &str) {
    if is_gradient(value) {
        set_gradient_text(styles, value);
    } else {
        unset_gradient_text(styles);
    }
}

/// `element` with `property` set to `value`, plus any dependent properties.
pub fn update_element_styles(element: &Element, property: &str, value: &str) -> Element {
    let mut styles = element.styles.clone();
    match property {
        "color" => update_color(&mut styles, value),
        "backgroundColor" => update_background_color(&mut styles, value),
        "background" => update_background(&mut styles, value),
        _ => set(&mut styles, property, value),
    }

    Element {
        styles,
        ..element.clone()
    }
}
