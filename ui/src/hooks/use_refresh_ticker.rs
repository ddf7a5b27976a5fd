use std::time::Duration;

use dioxus::prelude::*;

use crate::compat;

/// Bumps `tick` every `period` for as long as the calling component lives.
pub fn use_refresh_ticker(mut tick: Signal<u64>, period: Duration) {
    use_coroutine(move |_rx: UnboundedReceiver<()>| async move {
        loop {
            compat::sleep(period).await;
            *tick.write() += 1;
        }
    });
}
