#[cfg(feature = "async")]
use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
    time::Duration,
};

#[cfg(feature = "tokio_timer")]
use {
    std::collections::{BTreeMap, HashMap},
    tokio::time::{Instant, Sleep},
};

#[derive(Eq, Hash, Clone, Copy, PartialEq, PartialOrd, Ord, Debug)]
pub enum TimerId {
    Heartbeat,
    MeterSampled(usize),
    /// One step of a scheduled workflow, keyed by its task id.
    Task(u64),
}

#[cfg(feature = "async")]
pub trait TimerManager: Send + Unpin + 'static {
    fn add_or_update_timeout(&mut self, id: TimerId, timeout: Duration);
    fn remove_timeout(&mut self, id: TimerId);
    fn remove_all_timeouts(&mut self);
    /// Resolves with a timer whose deadline passed. A fired timer is forgotten.
    fn poll_timeout(&mut self, cx: &mut Context<'_>) -> Poll<TimerId>;
}

#[cfg(feature = "async")]
pub(crate) struct TimerDriver<T: TimerManager> {
    timer: T,
}

#[cfg(feature = "async")]
impl<T: TimerManager> TimerDriver<T> {
    pub fn new(timer: T) -> Self {
        Self { timer }
    }

    pub fn add_or_update(&mut self, id: TimerId, timeout: Duration) {
        self.timer.add_or_update_timeout(id, timeout);
    }

    pub fn remove_timeout(&mut self, id: TimerId) {
        self.timer.remove_timeout(id);
    }

    pub fn remove_all_timeouts(&mut self) {
        self.timer.remove_all_timeouts();
    }
}

#[cfg(feature = "async")]
impl<T: TimerManager> Future for TimerDriver<T> {
    type Output = TimerId;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        self.timer.poll_timeout(cx)
    }
}

#[cfg(feature = "tokio_timer")]
pub struct TokioTimerManager {
    timer_deadlines: HashMap<TimerId, Instant>,
    deadline_queue: BTreeMap<(Instant, TimerId), ()>,
    active_sleep: Option<(Pin<Box<Sleep>>, TimerId)>,
    needs_reschedule: bool,
}

#[cfg(feature = "tokio_timer")]
impl Default for TokioTimerManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "tokio_timer")]
impl TokioTimerManager {
    pub fn new() -> Self {
        Self {
            timer_deadlines: HashMap::new(),
            deadline_queue: BTreeMap::new(),
            active_sleep: None,
            needs_reschedule: false,
        }
    }

    fn next_deadline(&self) -> Option<(Instant, TimerId)> {
        self.deadline_queue.keys().next().copied()
    }

    fn fire(&mut self, id: TimerId) -> Poll<TimerId> {
        if let Some(when) = self.timer_deadlines.remove(&id) {
            self.deadline_queue.remove(&(when, id));
        }
        self.active_sleep = None;
        self.needs_reschedule = true;
        Poll::Ready(id)
    }
}

#[cfg(feature = "tokio_timer")]
impl TimerManager for TokioTimerManager {
    fn add_or_update_timeout(&mut self, id: TimerId, timeout: Duration) {
        let when = Instant::now() + timeout;
        if let Some(prev) = self.timer_deadlines.insert(id, when) {
            self.deadline_queue.remove(&(prev, id));
        }
        self.deadline_queue.insert((when, id), ());
        self.needs_reschedule = true;
    }

    fn remove_timeout(&mut self, id: TimerId) {
        if let Some(when) = self.timer_deadlines.remove(&id) {
            self.deadline_queue.remove(&(when, id));
        }
        self.needs_reschedule = true;
    }

    fn remove_all_timeouts(&mut self) {
        self.timer_deadlines.clear();
        self.deadline_queue.clear();
        self.active_sleep = None;
        self.needs_reschedule = false;
    }

    fn poll_timeout(&mut self, cx: &mut Context<'_>) -> Poll<TimerId> {
        if self.needs_reschedule {
            self.needs_reschedule = false;
            let (deadline, timer_id) = match self.next_deadline() {
                Some(v) => v,
                None => {
                    self.active_sleep = None;
                    return Poll::Pending;
                }
            };
            if Instant::now() >= deadline {
                return self.fire(timer_id);
            }
            self.active_sleep = Some((Box::pin(tokio::time::sleep_until(deadline)), timer_id));
        }
        let fired = match &mut self.active_sleep {
            Some((sleep_fut, id)) => match sleep_fut.as_mut().poll(cx) {
                Poll::Ready(()) => *id,
                Poll::Pending => return Poll::Pending,
            },
            None => return Poll::Pending,
        };
        self.fire(fired)
    }
}
