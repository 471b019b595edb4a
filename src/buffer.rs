use std::{
    collections::VecDeque,
    sync::{Condvar, Mutex, MutexGuard, PoisonError},
};

/// Byte stream fed into the decoding stage
pub type ByteBuffer = SyncBuffer<u8>;

/// Codepoint stream exchanged between pipeline stages
pub type CodepointBuffer = SyncBuffer<char>;

/// Ordered buffer shared between a producing and a consuming pipeline stage.
///
/// Elements are observed in FIFO order through a read cursor that only the
/// consumer advances. Writers never block. Readers block until at least one
/// element is available or [`set_input_ended`](Self::set_input_ended) has been
/// called, after which drained reads return nothing.
///
/// The cursor position can be saved with [`read_position`](Self::read_position)
/// and restored with [`set_read_position`](Self::set_read_position) as long as
/// the data in between has not been discarded by
/// [`clear_until_read_position`](Self::clear_until_read_position).
pub struct SyncBuffer<T> {
    inner: Mutex<Inner<T>>,
    available: Condvar,
}

struct Inner<T> {
    data: VecDeque<T>,
    /// Logical position of the front element of `data`
    front: usize,
    /// Logical read cursor, always within `front..=front + data.len()`
    cursor: usize,
    input_ended: bool,
}

impl<T> Inner<T> {
    fn end(&self) -> usize {
        self.front + self.data.len()
    }
}

impl<T> SyncBuffer<T> {
    /// Create an empty buffer
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                data: VecDeque::new(),
                front: 0,
                cursor: 0,
                input_ended: false,
            }),
            available: Condvar::new(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner<T>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn wait<'a>(&self, guard: MutexGuard<'a, Inner<T>>) -> MutexGuard<'a, Inner<T>> {
        self.available
            .wait(guard)
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Append a single element
    pub fn write_one(&self, item: T) {
        let mut inner = self.lock();
        inner.data.push_back(item);
        self.available.notify_all();
    }

    /// Append a sequence of elements as one atomic write
    pub fn write_multiple(&self, items: impl IntoIterator<Item = T>) {
        let mut inner = self.lock();
        inner.data.extend(items);
        self.available.notify_all();
    }

    /// Mark the end of input. The flag is sticky and wakes all blocked readers.
    pub fn set_input_ended(&self) {
        self.lock().input_ended = true;
        self.available.notify_all();
    }

    /// Whether the producer has marked the end of input
    #[must_use]
    pub fn is_input_ended(&self) -> bool {
        self.lock().input_ended
    }

    /// Whether the input has ended and the read cursor has consumed everything
    #[must_use]
    pub fn is_read_done(&self) -> bool {
        let inner = self.lock();
        inner.input_ended && inner.cursor == inner.end()
    }

    /// Current logical position of the read cursor
    #[must_use]
    pub fn read_position(&self) -> usize {
        self.lock().cursor
    }

    /// Move the read cursor to a previously saved position.
    ///
    /// Returns false without moving the cursor if the position has been
    /// invalidated by [`clear_until_read_position`](Self::clear_until_read_position)
    /// or lies beyond the written data.
    pub fn set_read_position(&self, position: usize) -> bool {
        let mut inner = self.lock();
        if position < inner.front || position > inner.end() {
            return false;
        }
        inner.cursor = position;
        true
    }

    /// Discard all elements before the read cursor, invalidating any saved
    /// positions older than it
    pub fn clear_until_read_position(&self) {
        let mut inner = self.lock();
        while inner.front < inner.cursor {
            inner.data.pop_front();
            inner.front += 1;
        }
    }

    /// Whether any currently buffered element matches the predicate,
    /// including elements already behind the read cursor
    pub fn contains(&self, predicate: impl Fn(&T) -> bool) -> bool {
        self.lock().data.iter().any(|item| predicate(item))
    }
}

impl<T: Clone> SyncBuffer<T> {
    /// Read one element, blocking until one is available or the input ends
    pub fn read_one(&self) -> Option<T> {
        let mut inner = self.lock();
        loop {
            if inner.cursor < inner.end() {
                let index = inner.cursor - inner.front;
                let item = inner.data[index].clone();
                inner.cursor += 1;
                return Some(item);
            }
            if inner.input_ended {
                return None;
            }
            inner = self.wait(inner);
        }
    }

    /// Read up to `count` elements, blocking until at least one is available.
    /// Returns an empty vector only once the input has ended and drained.
    pub fn read_multiple(&self, count: usize) -> Vec<T> {
        if count == 0 {
            return Vec::new();
        }
        let mut inner = self.lock();
        loop {
            if inner.cursor < inner.end() {
                let take = count.min(inner.end() - inner.cursor);
                let start = inner.cursor - inner.front;
                let items = inner.data.iter().skip(start).take(take).cloned().collect();
                inner.cursor += take;
                return items;
            }
            if inner.input_ended {
                return Vec::new();
            }
            inner = self.wait(inner);
        }
    }

    /// Look at the next element without advancing the cursor, blocking until
    /// one is available or the input ends
    pub fn peek_one(&self) -> Option<T> {
        let mut inner = self.lock();
        loop {
            if inner.cursor < inner.end() {
                let index = inner.cursor - inner.front;
                return Some(inner.data[index].clone());
            }
            if inner.input_ended {
                return None;
            }
            inner = self.wait(inner);
        }
    }
}

impl<T: Clone + PartialEq> SyncBuffer<T> {
    /// Read everything before the next occurrence of `stop`, blocking until
    /// `stop` is visible or the input ends. `stop` itself is not consumed.
    pub fn read_until(&self, stop: &T) -> Vec<T> {
        let mut inner = self.lock();
        loop {
            let start = inner.cursor - inner.front;
            if let Some(offset) = inner.data.iter().skip(start).position(|item| item == stop) {
                let items = inner.data.iter().skip(start).take(offset).cloned().collect();
                inner.cursor += offset;
                return items;
            }
            if inner.input_ended {
                let items = inner.data.iter().skip(start).cloned().collect();
                inner.cursor = inner.end();
                return items;
            }
            inner = self.wait(inner);
        }
    }

    /// Advance the cursor past a run of elements equal to `value`, stopping at
    /// the first other element or the end of input
    pub fn skip_run(&self, value: &T) {
        let mut inner = self.lock();
        loop {
            while inner.cursor < inner.end() {
                let index = inner.cursor - inner.front;
                if inner.data[index] != *value {
                    return;
                }
                inner.cursor += 1;
            }
            if inner.input_ended {
                return;
            }
            inner = self.wait(inner);
        }
    }
}

impl SyncBuffer<char> {
    /// Read the current line up to (not including) the next line feed
    pub fn read_line(&self) -> String {
        self.read_until(&'\n').into_iter().collect()
    }

    /// Read exactly `count` codepoints unless the input ends first
    pub(crate) fn read_exact_string(&self, count: usize) -> String {
        let mut collected = String::new();
        let mut remaining = count;
        while remaining > 0 {
            let chunk = self.read_multiple(remaining);
            if chunk.is_empty() {
                break;
            }
            remaining -= chunk.len();
            collected.extend(chunk);
        }
        collected
    }
}

impl<T> Default for SyncBuffer<T> {
    fn default() -> Self {
        Self::new()
    }
}
