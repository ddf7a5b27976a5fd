// The client-side Dioxus application logic.

use dioxus::prelude::*;

mod app_state;
mod app_state_mut;
mod card_view;
pub mod compat;
mod components;
mod currency;
mod harvest;
pub mod hooks;
mod screens;

use api::config::DashboardConfig;
use api::services::Services;
use app_state::AppState;
use app_state_mut::AppStateMut;
use components::pico::Container;
use components::toast::ToastSink;
use components::toast::ToastStack;
use hooks::use_refresh_ticker::use_refresh_ticker;
use screens::home::HomeScreen;

//=============================================================================
// MAIN APPLICATION COMPONENT (Client-side)
//=============================================================================

#[allow(non_snake_case)]
pub fn App() -> Element {
    let dashboard_css = r#"
    * { box-sizing: border-box; }

    .app-main-container header nav {
        --pico-nav-element-spacing-vertical: 0.5rem;
    }

    .amount small {
        color: var(--pico-muted-color);
    }

    .fiat-estimate {
        color: var(--pico-muted-color);
        font-size: 0.875rem;
    }

    /* --- TOASTS --- */
    .toast-stack {
        position: fixed;
        right: 1rem;
        bottom: 1rem;
        display: flex;
        flex-direction: column;
        gap: 0.5rem;
        max-width: 22rem;
        z-index: 200;
    }

    .toast-stack .toast {
        margin: 0;
        padding: 0.75rem 1rem;
        cursor: pointer;
        box-shadow: 0 4px 16px rgba(0,0,0,0.2);
    }

    .toast-stack .toast p {
        margin: 0.25rem 0 0 0;
        font-size: 0.875rem;
    }
"#;

    rsx! {
        document::Meta {
            name: "viewport",
            content: "width=device-width, initial-scale=1.0",
        }
        document::Stylesheet {
            href: "https://cdn.jsdelivr.net/npm/@picocss/pico@2/css/pico.cyan.min.css",
        }
        style {
            "{dashboard_css}"
        }
        AppBody {}
    }
}

/// Wires config, services and mutable state into context, then renders the
/// dashboard.
#[component]
fn AppBody() -> Element {
    let app_state = use_context_provider(|| {
        let config = DashboardConfig::from_env();
        dioxus_logger::tracing::info!("dashboard config: {:#?}", config);
        AppState::new(config)
    });

    use_context_provider(|| {
        let config = &app_state.config;
        #[cfg(feature = "web")]
        let services = Services::browser(config);
        #[cfg(not(feature = "web"))]
        let services = Services::simulated(config);
        services
    });

    let fast_tick = use_signal(|| 0_u64);
    let toasts = use_signal(Vec::new);
    let app_state_mut = use_context_provider(|| AppStateMut {
        fast_tick,
        toasts: ToastSink::new(toasts),
    });

    use_refresh_ticker(app_state_mut.fast_tick, app_state.config.fast_refresh);

    rsx! {
        div {
            class: "app-main-container",
            Container {
                header {
                    nav {
                        ul {
                            li {
                                h1 {
                                    style: "margin: 0; font-size: 1.5rem;",
                                    "{app_state.config.title}"
                                }
                            }
                        }
                    }
                }
                div {
                    class: "content",
                    HomeScreen {}
                }
            }
            ToastStack {
                sink: app_state_mut.toasts,
            }
        }
    }
}
