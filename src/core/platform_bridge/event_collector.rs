//=========================================================================
// Gamepad Event Collector
//=========================================================================
//
// Marshals gamepad notifications raised on OS notification threads onto
// the pump thread.
//
// Architecture:
//   OS thread(s): GamepadNotifier::notify() ──┐
//                                              │ bounded channel (FIFO)
//   Pump thread:  GamepadEventCollector ◄──────┘
//                   collect_frame() → take_batch() → GamepadManager
//
// A single channel preserves per-device order across the boundary.
// Bounded draining prevents starvation; whatever is left is picked up,
// still in order, next frame.
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{bounded, Receiver, Sender, TryRecvError, TrySendError};
use log::warn;

//=== Internal Dependencies ===============================================

use super::interface::GamepadNotification;

//=== Constructor =========================================================

/// Creates a connected notifier/collector pair.
pub(crate) fn gamepad_channel(capacity: usize) -> (GamepadNotifier, GamepadEventCollector) {
    let (sender, receiver) = bounded(capacity);
    (
        GamepadNotifier { sender },
        GamepadEventCollector {
            receiver,
            batch: Vec::with_capacity(capacity.min(64)),
        },
    )
}

//=== GamepadNotifier =====================================================

/// Thread-safe sender for gamepad notifications.
///
/// Cheap to clone; hand one to every thread that observes devices.
/// [`notify`](Self::notify) blocks while the queue is full, so callers
/// that may run on the pump thread use [`try_notify`](Self::try_notify)
/// (pump-thread backends normally return `NativeEvent::Gamepad` instead).
#[derive(Debug, Clone)]
pub struct GamepadNotifier {
    sender: Sender<GamepadNotification>,
}

impl GamepadNotifier {
    /// Queues a notification; returns `false` if the pump is gone.
    pub fn notify(&self, notification: GamepadNotification) -> bool {
        if self.sender.send(notification).is_err() {
            warn!(
                target: "platform::gamepad",
                "Pump disconnected, dropping gamepad notification"
            );
            return false;
        }
        true
    }

    /// Queues a notification without blocking; a full queue drops it.
    ///
    /// Returns `false` if the notification was dropped.
    pub fn try_notify(&self, notification: GamepadNotification) -> bool {
        match self.sender.try_send(notification) {
            Ok(()) => true,
            Err(TrySendError::Full(dropped)) => {
                warn!(
                    target: "platform::gamepad",
                    "Gamepad queue full, dropping {:?}",
                    dropped
                );
                false
            }
            Err(TrySendError::Disconnected(_)) => {
                warn!(
                    target: "platform::gamepad",
                    "Pump disconnected, dropping gamepad notification"
                );
                false
            }
        }
    }
}

//=== GamepadEventCollector ===============================================

/// Pump-side end of the gamepad channel.
#[derive(Debug)]
pub(crate) struct GamepadEventCollector {
    receiver: Receiver<GamepadNotification>,
    batch: Vec<GamepadNotification>,
}

impl GamepadEventCollector {
    /// Upper bound on notifications drained per frame.
    pub(crate) const MAX_EVENTS_PER_FRAME: usize = 100;

    /// Drains pending notifications (bounded); returns how many.
    pub(crate) fn collect_frame(&mut self) -> usize {
        self.batch.clear();

        while self.batch.len() < Self::MAX_EVENTS_PER_FRAME {
            match self.receiver.try_recv() {
                Ok(notification) => self.batch.push(notification),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }

        if self.batch.len() >= Self::MAX_EVENTS_PER_FRAME {
            warn!(
                target: "platform::gamepad",
                "Gamepad queue backlog: drained {} notifications this frame",
                self.batch.len()
            );
        }

        self.batch.len()
    }

    /// Collected notifications for this frame.
    #[cfg(test)]
    pub(crate) fn batch(&self) -> &[GamepadNotification] {
        &self.batch
    }

    /// Takes the collected batch, leaving an empty vec.
    pub(crate) fn take_batch(&mut self) -> Vec<GamepadNotification> {
        std::mem::take(&mut self.batch)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
