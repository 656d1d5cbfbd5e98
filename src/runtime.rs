use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyEvent};

/// Cadence of the periodic driver: once per second, matching the
/// second-granularity round clock.
pub const TICK_RATE_MS: u64 = 1000;

/// Everything that can advance a round: a keystroke, a terminal resize, or
/// the periodic tick.
#[derive(Clone, Debug)]
pub enum RoundEvent {
    Key(KeyEvent),
    Resize,
    Tick,
}

/// Where input events come from. The production impl reads the terminal;
/// tests feed a channel.
pub trait RoundEventSource: Send + 'static {
    /// Waits up to `timeout` for the next event.
    fn recv_timeout(&self, timeout: Duration) -> Result<RoundEvent, RecvTimeoutError>;
}

/// Terminal-backed event source. A background thread translates crossterm
/// events; it exits when the receiving side is dropped.
pub struct CrosstermEventSource {
    rx: Receiver<RoundEvent>,
}

impl CrosstermEventSource {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            while let Ok(ev) = event::read() {
                let translated = match ev {
                    CtEvent::Key(key) => Some(RoundEvent::Key(key)),
                    CtEvent::Resize(_, _) => Some(RoundEvent::Resize),
                    _ => None,
                };
                if let Some(ev) = translated {
                    if tx.send(ev).is_err() {
                        break;
                    }
                }
            }
        });

        Self { rx }
    }
}

impl Default for CrosstermEventSource {
    fn default() -> Self {
        Self::new()
    }
}

impl RoundEventSource for CrosstermEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<RoundEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Channel-fed event source for driving the loop in tests.
pub struct TestEventSource {
    rx: Receiver<RoundEvent>,
}

impl TestEventSource {
    pub fn pair() -> (Sender<RoundEvent>, Self) {
        let (tx, rx) = mpsc::channel();
        (tx, Self { rx })
    }
}

impl RoundEventSource for TestEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<RoundEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Advances the application one event at a time. The runner owns the tick
/// cadence: whenever the interval passes without input it emits `Tick`, the
/// one autonomous activity in the system. Whether a given tick still means
/// anything is decided downstream by the round's tick registration.
pub struct Runner<E: RoundEventSource> {
    event_source: E,
    tick_interval: Duration,
}

impl<E: RoundEventSource> Runner<E> {
    pub fn new(event_source: E) -> Self {
        Self::with_interval(event_source, Duration::from_millis(TICK_RATE_MS))
    }

    pub fn with_interval(event_source: E, tick_interval: Duration) -> Self {
        Self {
            event_source,
            tick_interval,
        }
    }

    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    /// The next event, or `Tick` once the interval expires without one.
    /// A disconnected source degenerates to a pure ticker.
    pub fn step(&self) -> RoundEvent {
        match self.event_source.recv_timeout(self.tick_interval) {
            Ok(ev) => ev,
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => {
                RoundEvent::Tick
            }
        }
    }
}
