//! A labelled token amount with its fiat estimate underneath. Both values
//! arrive preformatted, e.g. `8.000` and `~$16.00`.

use dioxus::prelude::*;

#[component]
pub fn Amount(
    label: String,
    amount: String,
    symbol: String,
    fiat_estimate: String,
    #[props(default)] id: String,
) -> Element {
    rsx! {
        div {
            id: "{id}",
            class: "amount",
            small { "{label}" }
            h3 {
                style: "margin-bottom: 0;",
                "{amount} "
                small { "{symbol}" }
            }
            span {
                class: "fiat-estimate",
                title: "Estimated value",
                "{fiat_estimate}"
            }
        }
    }
}
