//! The dashboard's farms and staking card.

use api::services::Services;
use api::wallet::register_asset_best_effort;
use dioxus::prelude::*;

use crate::app_state::AppState;
use crate::app_state_mut::AppStateMut;
use crate::card_view::CardSnapshot;
use crate::card_view::CardView;
use crate::components::amount::Amount;
use crate::components::connect_wallet_button::ConnectWalletButton;
use crate::components::pico::Button;
use crate::components::pico::ButtonType;
use crate::components::pico::Card;
use crate::components::pico::Grid;
use crate::components::pico::LinkButton;
use crate::harvest::harvest_all;
use crate::harvest::HarvestMessages;

/// Pending farm earnings and wallet balance with fiat estimates, plus the
/// "harvest all" action.
#[component]
pub fn StakingSummaryCard() -> Element {
    let app_state = use_context::<AppState>();
    let services = use_context::<Services>();
    let mut app_state_mut = use_context::<AppStateMut>();
    let pending_tx = use_signal(|| false);

    let snapshot = use_resource({
        let services = services.clone();
        let app_state = app_state.clone();
        move || {
            // Re-run on every tick.
            let _tick = (app_state_mut.fast_tick)();
            let services = services.clone();
            let app_state = app_state.clone();
            async move { CardSnapshot::load(&services, &app_state.config).await }
        }
    });

    let config = &app_state.config;
    let token = &config.reward_token;

    let on_register_asset = {
        let wallet = services.wallet.clone();
        let asset = token.watch_asset();
        move |_: MouseEvent| {
            let wallet = wallet.clone();
            let asset = asset.clone();
            spawn(async move {
                register_asset_best_effort(wallet.as_ref(), &asset).await;
            });
        }
    };

    let on_harvest = {
        let services = services.clone();
        let app_state = app_state.clone();
        move |_: MouseEvent| {
            if *pending_tx.peek() {
                return;
            }
            let positions = snapshot
                .peek()
                .as_ref()
                .map(|s| s.summary.positions().to_vec())
                .unwrap_or_default();
            let executor = services.executor.clone();
            let app_state = app_state.clone();
            spawn(async move {
                let config = &app_state.config;
                let messages = HarvestMessages::for_symbol(&config.reward_token.symbol);
                dioxus_logger::tracing::info!("harvesting {} farms", positions.len());
                harvest_all(
                    &positions,
                    &config.masterchef,
                    executor.as_ref(),
                    &app_state_mut.toasts,
                    &messages,
                    pending_tx,
                )
                .await;
                app_state_mut.refresh_now();
            });
        }
    };

    let view = snapshot
        .read()
        .as_ref()
        .map(|s| CardView::build(s, config, pending_tx()));

    rsx! {
        Card {
            header {
                style: "display: flex; align-items: center; justify-content: space-between;",
                h3 { style: "margin-bottom: 0;", "Farms & Staking" }
                Button {
                    button_type: ButtonType::Contrast,
                    outline: true,
                    title: format!("Add {} to your wallet", token.symbol),
                    on_click: on_register_asset,
                    img {
                        src: "{token.icon_url}",
                        alt: "{token.symbol}",
                        width: "32",
                        height: "32",
                        style: "vertical-align: middle;",
                    }
                    " +"
                }
            }
            match view {
                None => rsx! {
                    p { "Loading..." }
                    progress {}
                },
                Some(CardView::Disconnected) => rsx! {
                    div {
                        id: "connect",
                        ConnectWalletButton {}
                    }
                },
                Some(CardView::Connected(card)) => rsx! {
                    Grid {
                        Amount {
                            id: "harvest-balance",
                            label: format!("{} to Harvest", token.symbol),
                            amount: card.earnings.clone(),
                            symbol: token.symbol.clone(),
                            fiat_estimate: card.earnings_fiat.clone(),
                        }
                        Amount {
                            id: "wallet-balance",
                            label: format!("{} in Wallet", token.symbol),
                            amount: card.wallet.clone(),
                            symbol: token.symbol.clone(),
                            fiat_estimate: card.wallet_fiat.clone(),
                        }
                    }
                    footer {
                        Grid {
                            Button {
                                id: "harvest-all",
                                disabled: card.harvest_disabled,
                                busy: pending_tx(),
                                on_click: on_harvest,
                                "{card.harvest_label}"
                            }
                            LinkButton {
                                href: config.buy_url.clone(),
                                button_type: ButtonType::Secondary,
                                outline: true,
                                new_tab: true,
                                "Buy {token.symbol} Token"
                            }
                        }
                    }
                },
            }
        }
    }
}
