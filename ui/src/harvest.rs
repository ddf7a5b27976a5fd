//! The "harvest all" action: one transaction per staked farm, strictly one
//! after another, with a toast for every outcome.

use api::farms::FarmPosition;
use api::notifications::NotificationSink;
use api::transactions::ContractHandle;
use api::transactions::TransactionExecutor;
use dioxus::prelude::*;

/// A boolean that is true while a harvest action is in flight.
pub trait PendingFlag {
    fn set_pending(&mut self, pending: bool);
}

impl PendingFlag for Signal<bool> {
    /// A no-op once the owning component has been dropped.
    fn set_pending(&mut self, pending: bool) {
        if let Ok(mut flag) = self.try_write() {
            *flag = pending;
        }
    }
}

/// Holds a [`PendingFlag`] at `true` until dropped.
pub struct PendingTxGuard<F: PendingFlag> {
    flag: F,
}

impl<F: PendingFlag> PendingTxGuard<F> {
    pub fn acquire(mut flag: F) -> Self {
        flag.set_pending(true);
        Self { flag }
    }
}

impl<F: PendingFlag> Drop for PendingTxGuard<F> {
    fn drop(&mut self) {
        self.flag.set_pending(false);
    }
}

/// Toast texts for one reward token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarvestMessages {
    pub success_title: String,
    pub success_body: String,
    pub error_title: String,
    pub error_body: String,
}

impl HarvestMessages {
    pub fn for_symbol(symbol: &str) -> Self {
        Self {
            success_title: "Harvested!".to_string(),
            success_body: format!("Your {} earnings have been sent to your wallet!", symbol),
            error_title: "Error".to_string(),
            error_body:
                "Please try again. Confirm the transaction and make sure you are paying enough gas!"
                    .to_string(),
        }
    }
}

/// Harvests every position in order, awaiting each transaction before
/// submitting the next.
///
/// Per-farm failures are toasted and skipped. `pending_tx` is held at `true`
/// for the whole run and reset on every exit path, including a panic or the
/// future being dropped.
pub async fn harvest_all<F: PendingFlag>(
    positions: &[FarmPosition],
    contract: &ContractHandle,
    executor: &dyn TransactionExecutor,
    notifications: &dyn NotificationSink,
    messages: &HarvestMessages,
    pending_tx: F,
) {
    let _guard = PendingTxGuard::acquire(pending_tx);

    for position in positions {
        match executor.harvest(contract, position.farm_id).await {
            Ok(tx) => {
                dioxus_logger::tracing::info!("harvested farm {} in {}", position.farm_id, tx);
                notifications.success(&messages.success_title, &messages.success_body);
            }
            Err(e) => {
                dioxus_logger::tracing::warn!("harvest of farm {} failed: {}", position.farm_id, e);
                notifications.error(&messages.error_title, &messages.error_body);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api::farms::FarmId;
    use api::notifications::NotificationKind;
    use api::transactions::TxError;
    use api::transactions::TxHash;
    use futures::future::LocalBoxFuture;
    use futures::FutureExt;
    use rust_decimal::Decimal;
    use std::cell::Cell;
    use std::cell::RefCell;
    use std::collections::HashSet;
    use std::panic::AssertUnwindSafe;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct TestFlag(Rc<Cell<bool>>);

    impl PendingFlag for TestFlag {
        fn set_pending(&mut self, pending: bool) {
            self.0.set(pending);
        }
    }

    #[derive(Default)]
    struct StubExecutor {
        flag: TestFlag,
        failing: HashSet<FarmId>,
        panicking: Option<FarmId>,
        calls: RefCell<Vec<FarmId>>,
        flag_during: RefCell<Vec<bool>>,
        in_flight: Cell<usize>,
        max_in_flight: Cell<usize>,
    }

    impl TransactionExecutor for StubExecutor {
        fn harvest<'a>(
            &'a self,
            _contract: &'a ContractHandle,
            farm_id: FarmId,
        ) -> LocalBoxFuture<'a, Result<TxHash, TxError>> {
            Box::pin(async move {
                self.in_flight.set(self.in_flight.get() + 1);
                self.max_in_flight
                    .set(self.max_in_flight.get().max(self.in_flight.get()));
                self.calls.borrow_mut().push(farm_id);
                self.flag_during.borrow_mut().push(self.flag.0.get());

                tokio::task::yield_now().await;
                self.in_flight.set(self.in_flight.get() - 1);

                if self.panicking == Some(farm_id) {
                    panic!("executor blew up");
                }
                if self.failing.contains(&farm_id) {
                    Err(TxError::Rejected("user denied".to_string()))
                } else {
                    Ok(TxHash::new(format!("0x{}", farm_id)))
                }
            })
        }
    }

    #[derive(Default)]
    struct RecordingSink(RefCell<Vec<(NotificationKind, String, String)>>);

    impl NotificationSink for RecordingSink {
        fn notify(&self, kind: NotificationKind, title: &str, message: &str) {
            self.0
                .borrow_mut()
                .push((kind, title.to_string(), message.to_string()));
        }
    }

    fn positions(ids: &[u32]) -> Vec<FarmPosition> {
        ids.iter()
            .map(|id| FarmPosition::new(FarmId(*id), Decimal::ONE, Decimal::ONE))
            .collect()
    }

    async fn run(executor: &StubExecutor, sink: &RecordingSink, ids: &[u32]) {
        harvest_all(
            &positions(ids),
            &ContractHandle::new("0xchef"),
            executor,
            sink,
            &HarvestMessages::for_symbol("HTO"),
            executor.flag.clone(),
        )
        .await;
    }

    #[tokio::test]
    async fn harvests_sequentially_in_order() {
        let executor = StubExecutor::default();
        let sink = RecordingSink::default();

        run(&executor, &sink, &[3, 0, 7, 1]).await;

        assert_eq!(
            *executor.calls.borrow(),
            vec![FarmId(3), FarmId(0), FarmId(7), FarmId(1)]
        );
        assert_eq!(executor.max_in_flight.get(), 1);
    }

    #[tokio::test]
    async fn flag_is_held_only_while_running() {
        let executor = StubExecutor::default();
        let sink = RecordingSink::default();
        assert!(!executor.flag.0.get());

        run(&executor, &sink, &[1, 2]).await;

        assert_eq!(*executor.flag_during.borrow(), vec![true, true]);
        assert!(!executor.flag.0.get());
    }

    #[tokio::test]
    async fn mixed_outcomes_toast_each_farm() {
        let executor = StubExecutor {
            failing: HashSet::from([FarmId(2)]),
            ..Default::default()
        };
        let sink = RecordingSink::default();

        run(&executor, &sink, &[1, 2]).await;

        assert_eq!(*executor.calls.borrow(), vec![FarmId(1), FarmId(2)]);
        let toasts = sink.0.borrow();
        assert_eq!(toasts.len(), 2);
        assert_eq!(
            toasts[0],
            (
                NotificationKind::Success,
                "Harvested!".to_string(),
                "Your HTO earnings have been sent to your wallet!".to_string()
            )
        );
        assert_eq!(toasts[1].0, NotificationKind::Error);
        assert_eq!(toasts[1].1, "Error");
        assert!(!executor.flag.0.get());
    }

    #[tokio::test]
    async fn all_failures_still_attempt_every_farm() {
        let executor = StubExecutor {
            failing: HashSet::from([FarmId(1), FarmId(2), FarmId(3)]),
            ..Default::default()
        };
        let sink = RecordingSink::default();

        run(&executor, &sink, &[1, 2, 3]).await;

        assert_eq!(executor.calls.borrow().len(), 3);
        assert!(sink.0.borrow().iter().all(|(kind, _, _)| kind.is_error()));
        assert!(!executor.flag.0.get());
    }

    #[tokio::test]
    async fn empty_list_toggles_flag_without_toasts() {
        let executor = StubExecutor::default();
        let sink = RecordingSink::default();

        run(&executor, &sink, &[]).await;

        assert!(executor.calls.borrow().is_empty());
        assert!(sink.0.borrow().is_empty());
        assert!(!executor.flag.0.get());
    }

    #[tokio::test]
    async fn panic_mid_loop_resets_flag() {
        let executor = StubExecutor {
            panicking: Some(FarmId(2)),
            ..Default::default()
        };
        let sink = RecordingSink::default();

        let outcome = AssertUnwindSafe(run(&executor, &sink, &[1, 2, 3]))
            .catch_unwind()
            .await;

        assert!(outcome.is_err());
        assert_eq!(*executor.calls.borrow(), vec![FarmId(1), FarmId(2)]);
        assert!(!executor.flag.0.get());
    }

    #[tokio::test]
    async fn dropping_the_action_resets_flag() {
        let executor = StubExecutor::default();
        let sink = RecordingSink::default();

        {
            let mut action = Box::pin(run(&executor, &sink, &[1, 2]));
            // First poll submits farm 1 and parks on its yield.
            assert!(futures::poll!(action.as_mut()).is_pending());
            assert!(executor.flag.0.get());
        }

        assert!(!executor.flag.0.get());
    }

    #[test]
    fn messages_name_the_token() {
        let messages = HarvestMessages::for_symbol("CAKE");
        assert_eq!(
            messages.success_body,
            "Your CAKE earnings have been sent to your wallet!"
        );
        assert_eq!(messages.error_title, "Error");
    }
}
