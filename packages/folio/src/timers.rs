//! Deferred work (`setTimeout`) on a clock the host advances explicitly.

use std::time::Duration;

/// Work scheduled by a collaborator
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum TimerTask {
    /// Remove the alert element
    DismissAlert(usize),
    /// Put the submit button's original children back and re-enable it
    RestoreSubmitButton { button: usize, original: Vec<usize> },
}

#[derive(Debug)]
struct Timer {
    due: Duration,
    seq: u64,
    task: TimerTask,
}

#[derive(Debug, Default)]
pub(crate) struct TimerQueue {
    now: Duration,
    next_seq: u64,
    pending: Vec<Timer>,
}

impl TimerQueue {
    pub(crate) fn now(&self) -> Duration {
        self.now
    }

    pub(crate) fn len(&self) -> usize {
        self.pending.len()
    }

    pub(crate) fn schedule(&mut self, delay: Duration, task: TimerTask) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending.push(Timer {
            due: self.now + delay,
            seq,
            task,
        });
    }

    /// Move the clock forward and return the tasks which became due, earliest first.
    /// Tasks due at the same instant run in the order they were scheduled.
    pub(crate) fn advance(&mut self, by: Duration) -> Vec<TimerTask> {
        self.now += by;
        let now = self.now;
        let (mut due, pending): (Vec<Timer>, Vec<Timer>) =
            self.pending.drain(..).partition(|timer| timer.due <= now);
        self.pending = pending;
        due.sort_by_key(|timer| (timer.due, timer.seq));
        due.into_iter().map(|timer| timer.task).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_in_due_then_schedule_order() {
        let mut timers = TimerQueue::default();
        timers.schedule(Duration::from_secs(5), TimerTask::DismissAlert(1));
        timers.schedule(Duration::from_secs(2), TimerTask::DismissAlert(2));
        timers.schedule(Duration::from_secs(5), TimerTask::DismissAlert(3));

        assert!(timers.advance(Duration::from_secs(1)).is_empty());
        assert_eq!(
            timers.advance(Duration::from_secs(1)),
            vec![TimerTask::DismissAlert(2)]
        );
        assert_eq!(
            timers.advance(Duration::from_secs(10)),
            vec![TimerTask::DismissAlert(1), TimerTask::DismissAlert(3)]
        );
        assert_eq!(timers.len(), 0);
        assert_eq!(timers.now(), Duration::from_secs(12));
    }
}
