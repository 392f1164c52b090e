//! Strictly ordered, single-worker execution queue.
//!
//! Any thread can enqueue tasks through a [`QueueSender`]. Tasks are handed
//! out one at a time on the worker side (the Cursive event loop): the next
//! task is only available once the previous one called
//! [`TransitionQueue::finish`].
use crossbeam_channel::{Receiver, Sender};
use cursive_core::{CbSink, Cursive};
use std::thread;
use std::time::{Duration, Instant};

/// FIFO backlog with a single worker slot.
pub struct TransitionQueue<T> {
    sender: QueueSender<T>,
    receiver: Receiver<T>,
    busy: bool,
}

new_default!(TransitionQueue<T>);

impl<T> TransitionQueue<T> {
    /// Creates a new empty queue.
    pub fn new() -> Self {
        let (sender, receiver) = crossbeam_channel::unbounded();

        TransitionQueue {
            sender: QueueSender {
                sender,
                waker: Waker::default(),
            },
            receiver,
            busy: false,
        }
    }

    /// Returns a sender to enqueue tasks from any thread.
    pub fn sender(&self) -> QueueSender<T> {
        self.sender.clone()
    }

    /// Sets the sink used to wake up the event loop after each enqueue.
    pub fn set_waker(&mut self, waker: Waker) {
        self.sender.waker = waker;
    }

    /// Appends a task to the backlog.
    pub fn enqueue(&self, task: T) {
        self.sender.enqueue(task);
    }

    /// Takes the next task, if the worker slot is free.
    ///
    /// The slot stays taken until `finish()` is called.
    pub fn next(&mut self) -> Option<T> {
        if self.busy {
            return None;
        }

        let task = self.receiver.try_recv().ok()?;
        self.busy = true;
        Some(task)
    }

    /// Releases the worker slot, letting the next task through.
    pub fn finish(&mut self) {
        self.busy = false;
    }

    /// Returns `true` if a task is currently running.
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Returns the number of tasks waiting for their turn.
    pub fn pending(&self) -> usize {
        self.receiver.len()
    }

    /// Returns `true` if no task is running or waiting.
    pub fn is_idle(&self) -> bool {
        !self.busy && self.receiver.is_empty()
    }
}

/// Enqueues tasks in a [`TransitionQueue`].
///
/// Cheap to clone, and usable from any thread.
pub struct QueueSender<T> {
    sender: Sender<T>,
    waker: Waker,
}

impl<T> Clone for QueueSender<T> {
    fn clone(&self) -> Self {
        QueueSender {
            sender: self.sender.clone(),
            waker: self.waker.clone(),
        }
    }
}

impl<T> QueueSender<T> {
    /// Appends a task to the backlog. Never blocks.
    pub fn enqueue(&self, task: T) {
        // The receiver lives as long as the queue; after that, requests are moot.
        if self.sender.send(task).is_err() {
            log::trace!("Transition queue is gone, dropping task");
            return;
        }
        self.waker.poke();
    }
}

/// Wakes up the Cursive event loop.
///
/// Cursive only redraws when something happens: a no-op callback sent to
/// its `CbSink` is enough to trigger a new layout and draw.
#[derive(Clone, Default)]
pub struct Waker {
    sink: Option<CbSink>,
}

impl Waker {
    /// Creates a waker sending to the given sink.
    pub fn new(sink: CbSink) -> Self {
        Waker { sink: Some(sink) }
    }

    /// Returns `true` if this waker has a sink to send to.
    pub fn is_connected(&self) -> bool {
        self.sink.is_some()
    }

    /// Requests a single refresh.
    pub fn poke(&self) {
        if let Some(ref sink) = self.sink {
            // Fails once cursive has quit, which is fine.
            sink.send(Box::new(Cursive::noop)).ok();
        }
    }

    /// Keeps the event loop refreshing `fps` times per second for `duration`.
    ///
    /// One last refresh is sent after `duration`, so the end of an animation
    /// is always drawn.
    pub fn keep_awake(&self, duration: Duration, fps: u32) {
        let sink = match self.sink {
            Some(ref sink) => sink.clone(),
            None => return,
        };

        let interval = Duration::from_secs(1) / fps.max(1);

        thread::spawn(move || {
            let deadline = Instant::now() + duration;
            loop {
                let now = Instant::now();
                thread::sleep(interval.min(deadline.saturating_duration_since(now)));

                if sink.send(Box::new(Cursive::noop)).is_err() || now >= deadline {
                    break;
                }
            }
        });
    }
}
