use std::{
  collections::VecDeque,
  sync::{Arc, Condvar, Mutex},
};

use log::trace;

/// Unbounded handoff queue. Clones share the same buffer, so producer and
/// consumer threads each hold their own handle. `pop` removes the newest
/// entry and suspends the caller while the buffer is empty.
#[derive(Clone)]
pub struct BlockingQueue<T> {
  inner: Arc<(Mutex<VecDeque<T>>, Condvar)>,
}

impl<T> BlockingQueue<T> {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn push(&self, value: T) {
    let (lock, cvar) = &*self.inner;
    let mut queue = lock.lock().unwrap();
    queue.push_back(value);
    trace!("Queue holds {} entries after push", queue.len());
    cvar.notify_one();
  }

  pub fn pop(&self) -> T {
    let (lock, cvar) = &*self.inner;
    let queue = lock.lock().unwrap();
    let mut queue = cvar.wait_while(queue, |queue| queue.is_empty()).unwrap();
    queue.pop_back().unwrap()
  }

  pub fn len(&self) -> usize {
    let (lock, _) = &*self.inner;
    lock.lock().unwrap().len()
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }
}

impl<T> Default for BlockingQueue<T> {
  fn default() -> Self {
    Self {
      inner: Arc::new((Mutex::new(VecDeque::new()), Condvar::new())),
    }
  }
}

#[cfg(test)]
mod test {
  use std::{
    sync::{
      atomic::{AtomicUsize, Ordering},
      Arc,
    },
    thread,
    time::{Duration, Instant},
  };

  use super::BlockingQueue;

  #[test]
  fn pop_returns_newest_first() {
    let queue = BlockingQueue::new();
    queue.push(1);
    queue.push(2);
    queue.push(3);

    assert_eq!(queue.pop(), 3);
    assert_eq!(queue.pop(), 2);
    assert_eq!(queue.pop(), 1);
    assert!(queue.is_empty());
  }

  #[test]
  fn pop_blocks_until_push() {
    let queue = BlockingQueue::new();
    let producer = queue.clone();

    let handle = thread::spawn(move || {
      thread::sleep(Duration::from_millis(50));
      producer.push(7usize);
    });

    let start = Instant::now();
    assert_eq!(queue.pop(), 7);
    assert!(start.elapsed() >= Duration::from_millis(50));
    assert!(start.elapsed() < Duration::from_millis(500));

    handle.join().unwrap();
  }

  #[test]
  fn no_loss_under_concurrent_producers() {
    let queue = BlockingQueue::new();

    let mut producers = Vec::new();
    for _ in 0..4 {
      let queue = queue.clone();
      producers.push(thread::spawn(move || {
        for i in 0..250usize {
          queue.push(i);
        }
      }));
    }
    for producer in producers {
      producer.join().unwrap();
    }

    assert_eq!(queue.len(), 1000);
    for _ in 0..1000 {
      queue.pop();
    }
    assert!(queue.is_empty());
  }

  #[test]
  fn each_value_reaches_exactly_one_consumer() {
    let queue = BlockingQueue::new();
    let received = Arc::new(AtomicUsize::new(0));

    let mut consumers = Vec::new();
    for _ in 0..8 {
      let queue = queue.clone();
      let received = received.clone();
      consumers.push(thread::spawn(move || {
        queue.pop();
        received.fetch_add(1, Ordering::Relaxed);
      }));
    }

    for i in 0..8usize {
      queue.push(i);
    }
    for consumer in consumers {
      consumer.join().unwrap();
    }

    assert_eq!(received.load(Ordering::Relaxed), 8);
    assert!(queue.is_empty());
  }
}
