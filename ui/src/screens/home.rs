//! The landing screen.

use crate::components::pico::Grid;
use crate::components::staking_summary_card::StakingSummaryCard;
use dioxus::prelude::*;

#[component]
pub fn HomeScreen() -> Element {
    rsx! {
        section {
            Grid {
                StakingSummaryCard {}
            }
        }
    }
}
