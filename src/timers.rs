//! Timer abstraction for the cylinder controller.
//!
//! The controller only ever asks for two kinds of timers: a periodic tick that
//! lives as long as a mode, and a one-shot that clears the operating flag.
//! Both are modelled as handles that cancel the timer when dropped.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo::timers::callback::{Interval, Timeout};
use yew::Callback;

/// What a timer delivers back to the controller when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    /// Periodic tick of the active mode, tagged with the arming generation.
    ModeTick { generation: u64 },
    /// The operating-indicator hold has elapsed.
    OperatingElapsed { generation: u64 },
}

/// Source of cancellable timers.
///
/// Dropping a returned handle must cancel the timer.
pub trait Scheduler {
    type Handle;

    fn every(&self, period_ms: u32, event: TimerEvent) -> Self::Handle;
    fn after(&self, delay_ms: u32, event: TimerEvent) -> Self::Handle;
}

/// Browser timers that post their events into a yew component.
pub struct GlooScheduler {
    callback: Callback<TimerEvent>,
}

impl GlooScheduler {
    pub fn new(callback: Callback<TimerEvent>) -> Self {
        Self { callback }
    }
}

/// A live browser timer. gloo cancels the underlying JS timer on drop.
pub enum GlooTimer {
    Interval(Interval),
    Timeout(Timeout),
}

impl Scheduler for GlooScheduler {
    type Handle = GlooTimer;

    fn every(&self, period_ms: u32, event: TimerEvent) -> GlooTimer {
        let callback = self.callback.clone();
        GlooTimer::Interval(Interval::new(period_ms, move || callback.emit(event)))
    }

    fn after(&self, delay_ms: u32, event: TimerEvent) -> GlooTimer {
        let callback = self.callback.clone();
        GlooTimer::Timeout(Timeout::new(delay_ms, move || callback.emit(event)))
    }
}

/// Deterministic scheduler driven by explicit calls to [`VirtualClock::advance`].
///
/// Clones share the same timeline, so one clone can be handed to a controller
/// while another drives time.
#[derive(Clone, Default)]
pub struct VirtualClock {
    inner: Rc<RefCell<ClockInner>>,
}

#[derive(Default)]
struct ClockInner {
    now_ms: u64,
    next_id: u64,
    timers: Vec<VirtualTimer>,
}

struct VirtualTimer {
    id: u64,
    due_ms: u64,
    period_ms: Option<u64>,
    event: TimerEvent,
    live: Rc<Cell<bool>>,
}

/// Handle to a [`VirtualClock`] timer.
pub struct VirtualHandle {
    live: Rc<Cell<bool>>,
}

impl Drop for VirtualHandle {
    fn drop(&mut self) {
        self.live.set(false);
    }
}

impl VirtualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now_ms(&self) -> u64 {
        self.inner.borrow().now_ms
    }

    /// Number of timers that are armed and not cancelled.
    pub fn pending(&self) -> usize {
        self.inner
            .borrow()
            .timers
            .iter()
            .filter(|t| t.live.get())
            .count()
    }

    /// Move time forward by `ms`, handing every due event to `on_event` in
    /// firing order.
    ///
    /// Timers armed or cancelled by `on_event` take effect immediately, even
    /// within the same call.
    pub fn advance(&self, ms: u64, mut on_event: impl FnMut(TimerEvent)) {
        let deadline = self.now_ms() + ms;
        while let Some(event) = self.pop_due(deadline) {
            on_event(event);
        }
        self.inner.borrow_mut().now_ms = deadline;
    }

    fn arm(&self, due_in: u64, period_ms: Option<u64>, event: TimerEvent) -> VirtualHandle {
        let mut inner = self.inner.borrow_mut();
        let live = Rc::new(Cell::new(true));
        let id = inner.next_id;
        inner.next_id += 1;
        let due_ms = inner.now_ms + due_in;
        inner.timers.push(VirtualTimer {
            id,
            due_ms,
            period_ms,
            event,
            live: Rc::clone(&live),
        });
        VirtualHandle { live }
    }

    fn pop_due(&self, deadline: u64) -> Option<TimerEvent> {
        let mut inner = self.inner.borrow_mut();
        inner.timers.retain(|t| t.live.get());

        let idx = inner
            .timers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due_ms <= deadline)
            .min_by_key(|(_, t)| (t.due_ms, t.id))
            .map(|(i, _)| i)?;

        let due_ms = inner.timers[idx].due_ms;
        inner.now_ms = due_ms;
        let event = inner.timers[idx].event;
        match inner.timers[idx].period_ms {
            Some(period) => inner.timers[idx].due_ms += period,
            None => {
                inner.timers.remove(idx);
            }
        }
        Some(event)
    }
}

impl Scheduler for VirtualClock {
    type Handle = VirtualHandle;

    fn every(&self, period_ms: u32, event: TimerEvent) -> VirtualHandle {
        let period = u64::from(period_ms.max(1));
        self.arm(period, Some(period), event)
    }

    fn after(&self, delay_ms: u32, event: TimerEvent) -> VirtualHandle {
        self.arm(u64::from(delay_ms), None, event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TICK: TimerEvent = TimerEvent::ModeTick { generation: 1 };
    const ELAPSED: TimerEvent = TimerEvent::OperatingElapsed { generation: 1 };

    #[test]
    fn test_interval_fires_each_period() {
        let clock = VirtualClock::new();
        let _tick = clock.every(100, TICK);
        let mut fired = Vec::new();
        clock.advance(350, |ev| fired.push(ev));
        assert_eq!(fired, vec![TICK, TICK, TICK]);
        assert_eq!(clock.now_ms(), 350);

        clock.advance(50, |ev| fired.push(ev));
        assert_eq!(fired.len(), 4);
    }

    #[test]
    fn test_timeout_fires_once() {
        let clock = VirtualClock::new();
        let _reset = clock.after(500, ELAPSED);
        let mut fired = Vec::new();
        clock.advance(499, |ev| fired.push(ev));
        assert!(fired.is_empty());
        clock.advance(1, |ev| fired.push(ev));
        clock.advance(1000, |ev| fired.push(ev));
        assert_eq!(fired, vec![ELAPSED]);
        assert_eq!(clock.pending(), 0);
    }

    #[test]
    fn test_dropping_handle_cancels() {
        let clock = VirtualClock::new();
        let tick = clock.every(100, TICK);
        assert_eq!(clock.pending(), 1);
        drop(tick);
        assert_eq!(clock.pending(), 0);

        let mut count = 0;
        clock.advance(1000, |_| count += 1);
        assert_eq!(count, 0);
    }

    #[test]
    fn test_events_interleave_in_time_order() {
        let clock = VirtualClock::new();
        let _tick = clock.every(200, TICK);
        let _reset = clock.after(300, ELAPSED);
        let mut fired = Vec::new();
        clock.advance(400, |ev| fired.push((clock.now_ms(), ev)));
        assert_eq!(fired, vec![(200, TICK), (300, ELAPSED), (400, TICK)]);
    }
}
