use std::collections::VecDeque;
use std::fmt;

/// A deque that maintains a maximum capacity by removing oldest elements
#[derive(Debug, Clone)]
pub struct BoundedVec<T> {
    items: VecDeque<T>,
    max_size: usize,
}

impl<T> BoundedVec<T> {
    pub fn new(max_size: usize) -> Self {
        let max_size = max_size.max(1);
        Self {
            items: VecDeque::with_capacity(max_size + 1),
            max_size,
        }
    }

    /// Appends `item`, returning the evicted front element if the bound was exceeded.
    pub fn push(&mut self, item: T) -> Option<T> {
        self.items.push_back(item);
        if self.items.len() > self.max_size {
            self.items.pop_front()
        } else {
            None
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &T> {
        self.items.iter()
    }
}

/// Renders as `[ a <-> b <-> c ]`, or `[ Empty ]` when there is nothing to show.
impl<T: fmt::Display> fmt::Display for BoundedVec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("[ Empty ]");
        }

        f.write_str("[ ")?;
        for (i, item) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(" <-> ")?;
            }
            write!(f, "{}", item)?;
        }
        f.write_str(" ]")
    }
}
