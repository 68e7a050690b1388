use std::cell::Cell;

/// A counter that can be bumped through `&self`.
///
/// Read paths such as `get` on FIFO and LIFO caches take `&self`, so their
/// counters live in cells. Like the caches themselves it is `!Sync`.
#[repr(transparent)]
#[derive(Debug, Default, Clone)]
pub struct MetricsCell(Cell<u64>);

impl MetricsCell {
    #[inline]
    pub fn new() -> Self {
        Self(Cell::new(0))
    }

    #[inline]
    pub fn get(&self) -> u64 {
        self.0.get()
    }

    #[inline]
    pub fn incr(&self) {
        self.0.set(self.0.get() + 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn incr_through_shared_ref() {
        let cell = MetricsCell::new();
        let r = &cell;
        r.incr();
        r.incr();
        assert_eq!(cell.get(), 2);
    }
}
