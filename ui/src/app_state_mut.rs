//! Defines the mutable, reactive state for the application's UI.

use dioxus::prelude::*;

use crate::components::toast::ToastSink;

/// A reactive state provided as a Dioxus context for mutable UI data.
///
/// Separate from the immutable `AppState`; every field is a `Signal` (or a
/// wrapper around one) so the struct stays `Copy`.
#[derive(Clone, Copy)]
pub struct AppStateMut {
    /// Bumped on every refresh tick. Readers of account, balances, farms and
    /// prices subscribe to it.
    pub fast_tick: Signal<u64>,
    pub toasts: ToastSink,
}

impl AppStateMut {
    /// Forces an immediate re-read instead of waiting for the next tick.
    pub fn refresh_now(&mut self) {
        *self.fast_tick.write() += 1;
    }
}
