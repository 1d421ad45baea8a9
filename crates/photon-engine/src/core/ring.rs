/// Fixed-capacity FIFO ring. Pushing into a full ring evicts the oldest entry.
/// Storage is inline, so pushes never allocate.
#[derive(Debug, Clone)]
pub struct Ring<T: Copy + PartialEq, const N: usize> {
    slots: [Option<T>; N],
    /// Index of the slot the next push writes to.
    head: usize,
    len: usize,
}

impl<T: Copy + PartialEq, const N: usize> Ring<T, N> {
    pub fn new() -> Self {
        Self {
            slots: [None; N],
            head: 0,
            len: 0,
        }
    }

    /// Push a value. Returns the evicted value if the ring was full.
    pub fn push(&mut self, value: T) -> Option<T> {
        let evicted = self.slots[self.head].replace(value);
        self.head = (self.head + 1) % N;
        if self.len < N {
            self.len += 1;
        }
        evicted
    }

    pub fn contains(&self, value: &T) -> bool {
        self.slots.iter().any(|slot| slot.as_ref() == Some(value))
    }

    /// Iterate from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        let start = (self.head + N - self.len) % N;
        (0..self.len).filter_map(move |i| self.slots[(start + i) % N].as_ref())
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn capacity(&self) -> usize {
        N
    }

    pub fn clear(&mut self) {
        self.slots = [None; N];
        self.head = 0;
        self.len = 0;
    }
}

impl<T: Copy + PartialEq, const N: usize> Default for Ring<T, N> {
    fn default() -> Self {
        Self::new()
    }
}
