//! Event loop plumbing: terminal input, animation frames and the one-second
//! pulse that drives the preview countdown.

use std::sync::{
    atomic::{AtomicU64, Ordering},
    mpsc::{self, Receiver, RecvTimeoutError, Sender},
    Arc,
};
use std::time::{Duration, Instant};

use crossterm::event::{self, Event as CtEvent, KeyEvent, KeyEventKind};

const SECOND: Duration = Duration::from_secs(1);

/// What the loop wakes up for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TermEvent {
    Key(KeyEvent),
    Resize,
    /// Nothing arrived within one frame; step animations.
    Frame,
    /// Whole seconds elapsed while second counting was on.
    Second(u32),
    /// The input side hung up. Nothing more will arrive.
    Closed,
}

/// Where input events come from.
pub trait EventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<TermEvent, RecvTimeoutError>;
}

/// Reads the terminal on a background thread and forwards key presses and
/// resizes over a channel.
pub struct CrosstermEventSource {
    rx: Receiver<TermEvent>,
}

impl CrosstermEventSource {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();

        std::thread::spawn(move || loop {
            let forwarded = match event::read() {
                // release/repeat events would double every key on some platforms
                Ok(CtEvent::Key(key)) if key.kind == KeyEventKind::Press => {
                    tx.send(TermEvent::Key(key))
                }
                Ok(CtEvent::Resize(_, _)) => tx.send(TermEvent::Resize),
                Ok(_) => Ok(()),
                Err(err) => {
                    tracing::warn!(%err, "terminal event reader stopped");
                    break;
                }
            };
            if forwarded.is_err() {
                break;
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

impl EventSource for CrosstermEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<TermEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Channel-fed source for driving the loop without a terminal.
pub struct TestEventSource {
    rx: Receiver<TermEvent>,
}

impl TestEventSource {
    pub fn channel() -> (Sender<TermEvent>, Self) {
        let (tx, rx) = mpsc::channel();
        (tx, Self { rx })
    }
}

impl EventSource for TestEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<TermEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

pub trait Clock {
    fn now(&self) -> Instant;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// A clock that only moves when told to. Clones share the same time.
#[derive(Clone, Debug)]
pub struct ManualClock {
    base: Instant,
    offset_ms: Arc<AtomicU64>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            base: Instant::now(),
            offset_ms: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn advance(&self, by: Duration) {
        let ms = u64::try_from(by.as_millis()).unwrap_or(u64::MAX);
        self.offset_ms.fetch_add(ms, Ordering::SeqCst);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.base + Duration::from_millis(self.offset_ms.load(Ordering::SeqCst))
    }
}

/// Turns irregular wakeups into whole elapsed seconds.
///
/// Key presses cut receive timeouts short, so frames alone cannot drive a
/// one-second countdown. The pulse remembers the last second boundary and
/// reports how many full seconds have passed since.
#[derive(Debug, Clone, Copy)]
pub struct SecondPulse {
    last: Instant,
}

impl SecondPulse {
    pub fn new(now: Instant) -> Self {
        Self { last: now }
    }

    /// Whole seconds elapsed since the last boundary. Keeps the remainder.
    pub fn take(&mut self, now: Instant) -> u32 {
        let secs = now.saturating_duration_since(self.last).as_secs();
        self.last += Duration::from_secs(secs);
        u32::try_from(secs).unwrap_or(u32::MAX)
    }

    /// Time left until the next boundary.
    pub fn until_next(&self, now: Instant) -> Duration {
        SECOND.saturating_sub(now.saturating_duration_since(self.last))
    }
}

/// Hands the loop one event at a time.
///
/// While second counting is on, the runner shortens its waits so a
/// [`TermEvent::Second`] is delivered on each boundary even when keys keep
/// arriving.
pub struct Runner<E: EventSource, C: Clock = SystemClock> {
    events: E,
    frame: Duration,
    clock: C,
    pulse: Option<SecondPulse>,
}

impl<E: EventSource> Runner<E, SystemClock> {
    pub fn new(events: E, frame: Duration) -> Self {
        Self::with_clock(events, frame, SystemClock)
    }
}

impl<E: EventSource, C: Clock> Runner<E, C> {
    pub fn with_clock(events: E, frame: Duration, clock: C) -> Self {
        Self {
            events,
            frame,
            clock,
            pulse: None,
        }
    }

    pub fn is_counting(&self) -> bool {
        self.pulse.is_some()
    }

    /// Turn second counting on or off. Turning it on counts from now;
    /// keeping it on keeps the current boundary. Turning it off drops any
    /// partial second.
    pub fn count_seconds(&mut self, on: bool) {
        match (on, self.pulse.is_some()) {
            (true, false) => self.pulse = Some(SecondPulse::new(self.clock.now())),
            (false, true) => self.pulse = None,
            _ => {}
        }
    }

    pub fn step(&mut self) -> TermEvent {
        if let Some(due) = self.due_seconds() {
            return due;
        }

        let wait = match &self.pulse {
            Some(pulse) => pulse.until_next(self.clock.now()).min(self.frame),
            None => self.frame,
        };
        match self.events.recv_timeout(wait) {
            Ok(ev) => ev,
            Err(RecvTimeoutError::Timeout) => self.due_seconds().unwrap_or(TermEvent::Frame),
            Err(RecvTimeoutError::Disconnected) => TermEvent::Closed,
        }
    }

    fn due_seconds(&mut self) -> Option<TermEvent> {
        let now = self.clock.now();
        let secs = self.pulse.as_mut()?.take(now);
        (secs > 0).then_some(TermEvent::Second(secs))
    }
}
