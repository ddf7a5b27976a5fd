//! A set of reusable, lifetime-free Dioxus components for the Pico.css framework.
//! To use, ensure you have pico.min.css linked in your main application.

#![allow(non_snake_case)] // Allow PascalCase for component function names

use dioxus::prelude::*;

//=============================================================================
// Layout Components
//=============================================================================

/// A centered container for your content.
/// Wraps content in a `<main class="container">` element.
#[component]
pub fn Container(children: Element) -> Element {
    rsx! { main { class: "container", {children} } }
}

/// A responsive grid layout.
#[component]
pub fn Grid(children: Element) -> Element {
    rsx! { div { class: "grid", {children} } }
}

//=============================================================================
// Content Components
//=============================================================================

/// A card for grouping related content.
/// Wraps content in an `<article>` element.
#[component]
pub fn Card(children: Element) -> Element {
    rsx! { article { {children} } }
}

//=============================================================================
// Interactive Components
//=============================================================================

#[derive(PartialEq, Clone, Copy, Default)]
pub enum ButtonType {
    #[default]
    Primary,
    Secondary,
    Contrast,
}

impl ButtonType {
    fn to_class(self, outline: bool) -> &'static str {
        match (self, outline) {
            (ButtonType::Primary, false) => "",
            (ButtonType::Primary, true) => "outline",
            (ButtonType::Secondary, false) => "secondary",
            (ButtonType::Secondary, true) => "secondary outline",
            (ButtonType::Contrast, false) => "contrast",
            (ButtonType::Contrast, true) => "contrast outline",
        }
    }
}

#[derive(Props, PartialEq, Clone)]
pub struct ButtonProps {
    children: Element,
    #[props(optional)]
    on_click: Option<EventHandler<MouseEvent>>,
    #[props(default)]
    button_type: ButtonType,
    #[props(default = false)]
    outline: bool,
    #[props(default = false)]
    disabled: bool,
    /// Shows Pico's spinner and marks the button busy.
    #[props(default = false)]
    busy: bool,
    #[props(optional, into)]
    title: Option<String>,
    #[props(optional, into)]
    id: Option<String>,
}

/// A versatile button component.
pub fn Button(props: ButtonProps) -> Element {
    rsx! {
        button {
            class: "{props.button_type.to_class(props.outline)}",
            disabled: props.disabled,
            "aria-busy": if props.busy { "true" } else { "false" },
            id: props.id.clone(),
            title: props.title.clone(),
            onclick: move |evt| {
                if let Some(handler) = &props.on_click {
                    handler.call(evt);
                }
            },
            {props.children}
        }
    }
}

#[derive(Props, PartialEq, Clone)]
pub struct LinkButtonProps {
    children: Element,
    #[props(into)]
    href: String,
    #[props(default)]
    button_type: ButtonType,
    #[props(default = false)]
    outline: bool,
    /// Opens the link in a new tab.
    #[props(default = false)]
    new_tab: bool,
}

/// An anchor styled as a Pico button.
pub fn LinkButton(props: LinkButtonProps) -> Element {
    rsx! {
        a {
            role: "button",
            class: "{props.button_type.to_class(props.outline)}",
            href: "{props.href}",
            target: if props.new_tab { "_blank" } else { "_self" },
            rel: if props.new_tab { "noopener noreferrer" } else { "" },
            {props.children}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn button_classes() {
        assert_eq!(ButtonType::default().to_class(false), "");
        assert_eq!(ButtonType::Secondary.to_class(true), "secondary outline");
        assert_eq!(ButtonType::Contrast.to_class(true), "contrast outline");
    }
}
