//! Special-ability readiness meter with its background ticker.
//!
//! Every counted move on an AI-owned board credits one decile: the meter
//! gains a point immediately and a ticker task adds the rest one point per
//! tick until the next multiple of [`METER_STEP`] is reached. A single
//! ticker serves the meter; moves landing while it runs only raise its
//! target.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use core::time::Duration;
use log::{debug, warn};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use crate::config::{METER_MAX, METER_STEP};
use crate::events::{EventSink, GameEvent};

#[derive(Debug, Default)]
struct MeterState {
    value: u8,
    /// Level the ticker climbs to; never below `value`.
    target: u8,
    /// Bumped on every reset so stale tickers stop on their next tick.
    generation: u64,
    ticking: bool,
}

fn next_decile(level: u8) -> u8 {
    (level / METER_STEP + 1).saturating_mul(METER_STEP).min(METER_MAX)
}

pub struct SpecialMeter {
    state: Arc<Mutex<MeterState>>,
    tick: Duration,
    ticker: Option<JoinHandle<()>>,
    sink: Arc<dyn EventSink>,
}

impl SpecialMeter {
    /// `tick` of zero credits each decile synchronously.
    pub fn new(tick: Duration, sink: Arc<dyn EventSink>) -> Self {
        Self {
            state: Arc::new(Mutex::new(MeterState::default())),
            tick,
            ticker: None,
            sink,
        }
    }

    fn lock(&self) -> MutexGuard<'_, MeterState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn value(&self) -> u8 {
        self.lock().value
    }

    pub fn is_full(&self) -> bool {
        self.value() >= METER_MAX
    }

    /// Whether a ticker is still climbing towards its target.
    pub fn is_ticking(&self) -> bool {
        self.lock().ticking
    }

    /// Credit one decile for a counted move.
    pub fn earn(&mut self) {
        let spawn = {
            let mut state = self.lock();
            if state.value >= METER_MAX {
                return;
            }
            state.target = next_decile(state.target.max(state.value));
            let old = state.value;
            state.value += 1;
            self.sink.emit(GameEvent::SpecialProgress {
                old,
                new: state.value,
            });

            if state.value >= state.target || state.ticking {
                None
            } else if self.tick.is_zero() {
                climb(&mut state, self.sink.as_ref());
                None
            } else {
                match Handle::try_current() {
                    Ok(handle) => {
                        state.ticking = true;
                        Some((handle, state.generation))
                    }
                    Err(_) => {
                        warn!("no tokio runtime for the meter ticker, crediting synchronously");
                        climb(&mut state, self.sink.as_ref());
                        None
                    }
                }
            }
        };

        if let Some((handle, generation)) = spawn {
            let task = run_ticker(
                Arc::clone(&self.state),
                Arc::clone(&self.sink),
                self.tick,
                generation,
            );
            self.ticker = Some(handle.spawn(task));
        }
    }

    /// Empty a full meter. Returns `false` and leaves the meter alone if it
    /// was not full.
    pub fn consume(&mut self) -> bool {
        if !self.is_full() {
            return false;
        }
        self.reset();
        true
    }

    /// Cancel any running ticker and drop the meter to zero.
    pub fn reset(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.abort();
        }
        let mut state = self.lock();
        state.generation += 1;
        state.ticking = false;
        state.target = 0;
        let old = std::mem::replace(&mut state.value, 0);
        if old != 0 {
            self.sink.emit(GameEvent::SpecialProgress { old, new: 0 });
        }
    }
}

impl Drop for SpecialMeter {
    fn drop(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.abort();
        }
    }
}

impl core::fmt::Debug for SpecialMeter {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let state = self.lock();
        f.debug_struct("SpecialMeter")
            .field("value", &state.value)
            .field("target", &state.target)
            .field("ticking", &state.ticking)
            .finish()
    }
}

/// Raise the meter to its target in one go.
fn climb(state: &mut MeterState, sink: &dyn EventSink) {
    while state.value < state.target {
        let old = state.value;
        state.value += 1;
        sink.emit(GameEvent::SpecialProgress {
            old,
            new: state.value,
        });
    }
}

async fn run_ticker(
    state: Arc<Mutex<MeterState>>,
    sink: Arc<dyn EventSink>,
    period: Duration,
    generation: u64,
) {
    let mut interval = tokio::time::interval(period);
    interval.tick().await; // First tick completes immediately, skip it

    loop {
        interval.tick().await;
        let mut guard = state.lock().unwrap_or_else(PoisonError::into_inner);
        if guard.generation != generation {
            return;
        }
        if guard.value >= guard.target {
            guard.ticking = false;
            debug!("meter ticker settled at {}", guard.value);
            return;
        }
        let old = guard.value;
        guard.value += 1;
        sink.emit(GameEvent::SpecialProgress {
            old,
            new: guard.value,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deciles_round_up_and_cap() {
        assert_eq!(next_decile(0), 10);
        assert_eq!(next_decile(13), 20);
        assert_eq!(next_decile(20), 30);
        assert_eq!(next_decile(95), 100);
        assert_eq!(next_decile(100), 100);
    }
}
