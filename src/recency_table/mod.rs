/*!
Recency ordered lookup table

Symbols live in a fixed array of `capacity` slots, most recently used first.
Only the first `occupied` slots are live. A hit is promoted to the front
(move-to-front) and every `decay_period + 1` hits the last live entry is
culled, shrinking the working set over time.

```ignore
let mut table = RecencyTable::new(8, 4, SearchMode::Full)?;
assert_eq!(table.push(b'a'), HitResult::Miss);
assert_eq!(table.push(b'a'), HitResult::Hit(0));
```
*/

use tracing::{debug, trace};

use crate::config::SearchMode;
use crate::error::{AseError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitResult {
    Miss,
    /// Position of the symbol before promotion
    Hit(usize),
}

/// State of a single slot, as reported to diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotState {
    Live,
    /// Last live slot (`occupied - 1`), the next one to be culled
    Last,
    /// Holds a symbol that was culled out of the live region
    Invalidated,
    Empty,
}

#[derive(Debug, Clone)]
pub struct RecencyTable<S> {
    slots: Box<[Option<S>]>,
    occupied: usize,
    decay_period: usize,
    decay_counter: usize,
    search: SearchMode,
}

impl<S: Copy + PartialEq> RecencyTable<S> {
    pub fn new(capacity: usize, decay_period: usize, search: SearchMode) -> Result<Self> {
        if capacity == 0 {
            return Err(AseError::invalid("capacity must be at least 1"));
        }
        if decay_period < 1 {
            return Err(AseError::invalid("decay_period must be at least 1"));
        }
        debug!(capacity, decay_period, ?search, "recency table created");
        Ok(Self {
            slots: vec![None; capacity].into_boxed_slice(),
            occupied: 0,
            decay_period,
            decay_counter: decay_period,
            search,
        })
    }

    /// Looks up `symbol`, promoting it on a hit and registering it on a miss
    pub fn push(&mut self, symbol: S) -> HitResult {
        let end = match self.search {
            SearchMode::Faithful => self.occupied.saturating_sub(1),
            SearchMode::Full => self.occupied,
        };

        match self.slots[..end].iter().position(|slot| *slot == Some(symbol)) {
            Some(hit_index) => {
                trace!(hit_index, "hit");
                self.promote(hit_index);
                self.cull();
                HitResult::Hit(hit_index)
            }
            None => {
                trace!(occupied = self.occupied, "new symbol");
                self.register(symbol);
                HitResult::Miss
            }
        }
    }

    /// `ceil(log2(occupied))`, the bits needed to index the live region
    pub fn entropy_width(&self) -> Result<u32> {
        ceil_log2(self.occupied).ok_or(AseError::EmptyTableEntropyQuery)
    }

    fn register(&mut self, symbol: S) {
        // saturated tables drop new symbols
        if self.occupied + 1 < self.capacity() {
            self.slots.rotate_right(1);
            self.slots[0] = Some(symbol);
            self.occupied += 1;
        }
    }

    fn promote(&mut self, hit_index: usize) {
        self.slots[..=hit_index].rotate_right(1);
    }

    fn cull(&mut self) {
        if self.decay_counter > 0 {
            self.decay_counter -= 1;
            return;
        }
        trace!(occupied = self.occupied, "invalidated the last entry");
        self.occupied = self.occupied.saturating_sub(1);
        self.decay_counter = self.decay_period;
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn occupied(&self) -> usize {
        self.occupied
    }

    pub fn decay_period(&self) -> usize {
        self.decay_period
    }

    pub fn decay_counter(&self) -> usize {
        self.decay_counter
    }

    pub fn search_mode(&self) -> SearchMode {
        self.search
    }

    /// Live symbols, most recent first
    pub fn live(&self) -> impl Iterator<Item = S> + '_ {
        self.slots[..self.occupied].iter().flatten().copied()
    }

    /// Every slot, including culled leftovers past the live region
    pub fn slots(&self) -> &[Option<S>] {
        &self.slots
    }

    pub fn slot_states(&self) -> impl Iterator<Item = SlotState> + '_ {
        self.slots.iter().enumerate().map(move |(i, slot)| match (i, slot) {
            (i, _) if i + 1 == self.occupied => SlotState::Last,
            (i, _) if i < self.occupied => SlotState::Live,
            (_, Some(_)) => SlotState::Invalidated,
            (_, None) => SlotState::Empty,
        })
    }
}

/// `None` for 0, where log2 is undefined
pub(crate) fn ceil_log2(n: usize) -> Option<u32> {
    n.checked_sub(1).map(|x| usize::BITS - x.leading_zeros())
}
