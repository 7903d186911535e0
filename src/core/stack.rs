//! Per-tier sparse stacks.
//!
//! A tier stack is an index → value map with a signed stack pointer. Slots
//! that were never written read as zero, and reading never creates a slot.

use std::collections::BTreeMap;
use std::fmt;

use super::value::Value;

/// The stack and stack pointer owned by one tier.
#[derive(Clone, Default, PartialEq)]
pub struct TierStack {
    slots: BTreeMap<i64, Value>,
    sp: i64,
}

impl TierStack {
    /// Create an empty stack with the pointer at 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current stack pointer.
    #[inline]
    pub fn sp(&self) -> i64 {
        self.sp
    }

    /// Move the stack pointer by `delta` (`[` and `]`).
    #[inline]
    pub fn move_pointer(&mut self, delta: i64) {
        self.sp += delta;
    }

    /// Place the stack pointer at an absolute index.
    pub fn set_sp(&mut self, sp: i64) {
        self.sp = sp;
    }

    /// The greatest populated index, or sp if that is higher (or the stack is empty).
    pub fn top(&self) -> i64 {
        match self.slots.keys().next_back() {
            Some(&highest) => highest.max(self.sp),
            None => self.sp,
        }
    }

    /// Value at `index`, zero when unset.
    pub fn read(&self, index: i64) -> Value {
        self.slots.get(&index).cloned().unwrap_or(Value::ZERO)
    }

    /// Value under the stack pointer.
    #[inline]
    pub fn current(&self) -> Value {
        self.read(self.sp)
    }

    pub fn write(&mut self, index: i64, value: Value) {
        self.slots.insert(index, value);
    }

    /// Write at `top() + 1`.
    pub fn push(&mut self, value: Value) {
        let index = self.top() + 1;
        self.slots.insert(index, value);
    }

    /// Remove the value under sp, closing the gap above it.
    ///
    /// Everything in `(sp, top()]` moves down one index; slots below sp are
    /// untouched. Returns the evicted value.
    pub fn pop_shift(&mut self) -> Value {
        let sp = self.sp;
        let evicted = self.read(sp);
        let top = self.top();
        if sp == top {
            self.slots.remove(&sp);
            return evicted;
        }
        for index in sp..top {
            match self.slots.remove(&(index + 1)) {
                Some(v) => {
                    self.slots.insert(index, v);
                }
                None => {
                    self.slots.remove(&index);
                }
            }
        }
        self.slots.remove(&top);
        evicted
    }

    /// Remove the value at `top()` without shifting. Returns the evicted value.
    pub fn pop_top(&mut self) -> Value {
        let top = self.top();
        self.slots.remove(&top).unwrap_or(Value::ZERO)
    }

    /// Populated slots in index order.
    pub fn slots(&self) -> impl Iterator<Item = (i64, &Value)> {
        self.slots.iter().map(|(k, v)| (*k, v))
    }

    /// Number of populated slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Whether `index` holds a written value.
    pub fn is_set(&self, index: i64) -> bool {
        self.slots.contains_key(&index)
    }
}

impl fmt::Debug for TierStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TierStack{{sp={}, ", self.sp)?;
        f.debug_map().entries(self.slots.iter()).finish()?;
        write!(f, "}}")
    }
}

/// All tier stacks of a running program.
#[derive(Debug, Clone, Default)]
pub struct StackStore {
    stacks: BTreeMap<i64, TierStack>,
}

impl StackStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create one empty stack per tier id.
    pub fn with_tiers(tiers: impl IntoIterator<Item = i64>) -> Self {
        Self {
            stacks: tiers.into_iter().map(|t| (t, TierStack::new())).collect(),
        }
    }

    pub fn contains(&self, tier: i64) -> bool {
        self.stacks.contains_key(&tier)
    }

    pub fn get(&self, tier: i64) -> Option<&TierStack> {
        self.stacks.get(&tier)
    }

    /// Stack of `tier`, created empty on first use.
    pub fn tier_mut(&mut self, tier: i64) -> &mut TierStack {
        self.stacks.entry(tier).or_default()
    }

    /// Tier ids that own a stack.
    pub fn tiers(&self) -> impl Iterator<Item = i64> + '_ {
        self.stacks.keys().copied()
    }
}
