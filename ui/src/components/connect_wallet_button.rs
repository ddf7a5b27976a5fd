use api::notifications::NotificationSink;
use api::services::Services;
use dioxus::prelude::*;

use crate::app_state_mut::AppStateMut;
use crate::components::pico::Button;

/// Asks the wallet for an account, then refreshes everything that depends on it.
#[component]
pub fn ConnectWalletButton() -> Element {
    let services = use_context::<Services>();
    let mut app_state_mut = use_context::<AppStateMut>();
    let mut connecting = use_signal(|| false);

    rsx! {
        Button {
            disabled: connecting(),
            busy: connecting(),
            on_click: move |_| {
                let wallet = services.wallet.clone();
                connecting.set(true);
                spawn(async move {
                    match wallet.connect().await {
                        Ok(account) => {
                            dioxus_logger::tracing::info!("account {} connected", account.abbreviated());
                            app_state_mut.refresh_now();
                        }
                        Err(e) => {
                            dioxus_logger::tracing::warn!("wallet connect failed: {}", e);
                            app_state_mut.toasts.error("Unable to connect", &e.to_string());
                        }
                    }
                    connecting.set(false);
                });
            },
            "Unlock Wallet"
        }
    }
}
