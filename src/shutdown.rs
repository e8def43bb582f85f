//! One-shot shutdown notification shared between a client and its retry loop.
//!
//! [`ShutdownTrigger::fire`] wakes every [`ShutdownSignal`] cloned from the
//! same channel. Signals whose trigger has been dropped never fire.

use tokio::sync::watch;

/// Creates a connected trigger/signal pair.
#[must_use]
pub fn channel() -> (ShutdownTrigger, ShutdownSignal) {
    let (tx, rx) = watch::channel(false);
    (ShutdownTrigger { tx }, ShutdownSignal { rx })
}

/// Sending half, owned by whoever decides when to shut down.
#[derive(Debug)]
pub struct ShutdownTrigger {
    tx: watch::Sender<bool>,
}

impl ShutdownTrigger {
    /// Fires the signal. Returns `true` only on the first call.
    pub fn fire(&self) -> bool {
        self.tx.send_if_modified(|fired| {
            if *fired {
                false
            } else {
                *fired = true;
                true
            }
        })
    }

    /// Returns true once [`fire`](Self::fire) has been called.
    #[must_use]
    pub fn is_fired(&self) -> bool {
        *self.tx.borrow()
    }

    /// Returns a new signal attached to this trigger.
    #[must_use]
    pub fn signal(&self) -> ShutdownSignal {
        ShutdownSignal {
            rx: self.tx.subscribe(),
        }
    }
}

/// Receiving half, cheap to clone.
#[derive(Debug, Clone)]
pub struct ShutdownSignal {
    rx: watch::Receiver<bool>,
}

impl ShutdownSignal {
    /// A signal that never fires.
    #[must_use]
    pub fn never() -> Self {
        let (_tx, rx) = watch::channel(false);
        Self { rx }
    }

    /// Returns true if the trigger has already fired.
    #[must_use]
    pub fn is_fired(&self) -> bool {
        *self.rx.borrow()
    }

    /// Completes when the trigger fires.
    ///
    /// Pends forever if the trigger is dropped without firing.
    pub async fn fired(&self) {
        let mut rx = self.rx.clone();
        let trigger_alive = rx.wait_for(|fired| *fired).await.is_ok();
        if !trigger_alive {
            std::future::pending::<()>().await;
        }
    }
}

impl Default for ShutdownSignal {
    fn default() -> Self {
        Self::never()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn new_pair_is_not_fired() {
        let (trigger, signal) = channel();

        assert!(!trigger.is_fired());
        assert!(!signal.is_fired());
    }

    #[test]
    fn fire_is_idempotent() {
        let (trigger, signal) = channel();

        assert!(trigger.fire());
        assert!(!trigger.fire());
        assert!(signal.is_fired());
    }

    #[test]
    fn signal_from_trigger_sees_fire() {
        let (trigger, _) = channel();
        let late = trigger.signal();

        trigger.fire();

        assert!(late.is_fired());
    }

    #[tokio::test]
    async fn fired_completes_after_fire() {
        let (trigger, signal) = channel();
        let waiter = tokio::spawn(async move { signal.fired().await });

        trigger.fire();

        tokio::time::timeout(Duration::from_secs(1), waiter)
            .await
            .expect("signal should complete")
            .unwrap();
    }

    #[tokio::test]
    async fn fired_completes_immediately_when_already_fired() {
        let (trigger, signal) = channel();
        trigger.fire();

        tokio::time::timeout(Duration::from_millis(100), signal.fired())
            .await
            .expect("already-fired signal should complete");
    }

    #[tokio::test(start_paused = true)]
    async fn never_signal_does_not_complete() {
        let signal = ShutdownSignal::never();

        let result = tokio::time::timeout(Duration::from_secs(5), signal.fired()).await;

        assert!(result.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn dropped_trigger_does_not_fire() {
        let (trigger, signal) = channel();
        drop(trigger);

        let result = tokio::time::timeout(Duration::from_secs(5), signal.fired()).await;

        assert!(result.is_err());
        assert!(!signal.is_fired());
    }
}
