//! Zero-delay deferral for coalescing bursts of notifications
//!
//! A [`Debounced`] task scheduled several times before the owning
//! [`Scheduler`] is flushed runs exactly once, and reads whatever state is
//! current at flush time.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;

trait Deferred {
    fn run(&self);
}

/// Queue of deferred work, flushed by the event loop once per tick
#[derive(Clone, Default)]
pub struct Scheduler {
    queue: Rc<RefCell<VecDeque<Rc<dyn Deferred>>>>,
}

impl fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scheduler")
            .field("pending", &self.pending())
            .finish()
    }
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of tasks waiting for the next flush
    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }

    /// Run everything queued, including work queued by the tasks themselves.
    ///
    /// Returns the number of tasks that ran.
    pub fn run_pending(&self) -> usize {
        let mut ran = 0;
        loop {
            // Release the borrow before running so tasks can schedule more work
            let next = self.queue.borrow_mut().pop_front();
            let Some(task) = next else {
                break;
            };
            task.run();
            ran += 1;
        }
        ran
    }

    fn defer(&self, task: Rc<dyn Deferred>) {
        self.queue.borrow_mut().push_back(task);
    }

    /// Wrap `task` so that repeated schedules collapse into one run
    pub fn debounce(&self, task: impl Fn() + 'static) -> Rc<Debounced> {
        Rc::new(Debounced {
            scheduler: self.clone(),
            pending: Cell::new(false),
            task: Box::new(task),
        })
    }
}

/// A coalescing task bound to a [`Scheduler`]
pub struct Debounced {
    scheduler: Scheduler,
    pending: Cell<bool>,
    task: Box<dyn Fn()>,
}

impl Debounced {
    /// Queue the task for the next flush unless it is already queued
    pub fn schedule(self: &Rc<Self>) {
        if self.pending.replace(true) {
            return;
        }
        self.scheduler.defer(Rc::clone(self) as Rc<dyn Deferred>);
    }

    pub fn is_pending(&self) -> bool {
        self.pending.get()
    }
}

impl Deferred for Debounced {
    fn run(&self) {
        self.pending.set(false);
        (self.task)();
    }
}

impl fmt::Debug for Debounced {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Debounced")
            .field("pending", &self.pending.get())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_burst_collapses_into_one_run() {
        let scheduler = Scheduler::new();
        let runs = Rc::new(Cell::new(0));
        let counter = Rc::clone(&runs);
        let task = scheduler.debounce(move || counter.set(counter.get() + 1));

        task.schedule();
        task.schedule();
        task.schedule();
        assert!(task.is_pending());
        assert_eq!(runs.get(), 0);

        assert_eq!(scheduler.run_pending(), 1);
        assert_eq!(runs.get(), 1);
        assert!(!task.is_pending());
    }

    #[test]
    fn test_task_reads_state_at_flush_time() {
        let scheduler = Scheduler::new();
        let value = Rc::new(Cell::new(0));
        let observed = Rc::new(Cell::new(-1));

        let (source, sink) = (Rc::clone(&value), Rc::clone(&observed));
        let task = scheduler.debounce(move || sink.set(source.get()));

        value.set(1);
        task.schedule();
        value.set(2);
        task.schedule();
        scheduler.run_pending();

        assert_eq!(observed.get(), 2);
    }

    #[test]
    fn test_can_reschedule_after_flush() {
        let scheduler = Scheduler::new();
        let runs = Rc::new(Cell::new(0));
        let counter = Rc::clone(&runs);
        let task = scheduler.debounce(move || counter.set(counter.get() + 1));

        task.schedule();
        scheduler.run_pending();
        task.schedule();
        scheduler.run_pending();

        assert_eq!(runs.get(), 2);
        assert_eq!(scheduler.run_pending(), 0);
    }

    #[test]
    fn test_task_scheduled_during_flush_runs_in_same_flush() {
        let scheduler = Scheduler::new();
        let runs = Rc::new(Cell::new(0));

        let counter = Rc::clone(&runs);
        let second = scheduler.debounce(move || counter.set(counter.get() + 10));
        let chained = Rc::clone(&second);
        let first = scheduler.debounce(move || chained.schedule());

        first.schedule();
        assert_eq!(scheduler.run_pending(), 2);
        assert_eq!(runs.get(), 10);
    }
}
