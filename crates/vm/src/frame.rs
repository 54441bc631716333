//! Frame storage: the fixed-capacity value stack of one active call.
//!
//! Values are addressed by distance from the top (slot 0 is the most
//! recent push). The capacity is fixed when the frame is created.

use std::collections::TryReserveError;
use std::collections::VecDeque;

/// What happens when a value is pushed into a full frame.
///
/// `Window` is the default and departs from the rule that an overflowing
/// push is fatal: `push 1 / push 2 / add s0 s1` in a one-slot frame, or a
/// recursive body whose results land above its locals, only runs when the
/// oldest value is overwritten as in a ring buffer. `Strict` restores the
/// fatal overflow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FramePolicy {
    /// The oldest value is evicted. The capacity is the addressable window.
    #[default]
    Window,
    /// The push fails with [`FrameError::Overflow`].
    Strict,
}

/// Bounds violations on a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameError {
    /// Push into a full strict frame.
    Overflow { capacity: usize },
    /// Read of a slot at or beyond the number of live values.
    Underflow { slot: usize, depth: usize },
}

/// A bounded stack of `i64` values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    slots: VecDeque<i64>,
    capacity: usize,
    policy: FramePolicy,
}

impl Frame {
    /// Allocate a frame holding up to `capacity` values.
    pub fn new(capacity: usize, policy: FramePolicy) -> Result<Self, TryReserveError> {
        let mut slots = VecDeque::new();
        slots.try_reserve_exact(capacity)?;
        Ok(Self {
            slots,
            capacity,
            policy,
        })
    }

    /// Push a value on top of the frame.
    pub fn push(&mut self, value: i64) -> Result<(), FrameError> {
        if self.slots.len() >= self.capacity {
            match self.policy {
                FramePolicy::Strict => {
                    return Err(FrameError::Overflow {
                        capacity: self.capacity,
                    })
                }
                FramePolicy::Window => {
                    if self.slots.pop_front().is_none() {
                        // Zero-capacity window: nothing is retained.
                        return Ok(());
                    }
                }
            }
        }
        self.slots.push_back(value);
        Ok(())
    }

    /// Read the value `slot` positions below the top.
    pub fn get(&self, slot: usize) -> Result<i64, FrameError> {
        let depth = self.slots.len();
        slot.checked_add(1)
            .and_then(|needed| depth.checked_sub(needed))
            .and_then(|index| self.slots.get(index).copied())
            .ok_or(FrameError::Underflow { slot, depth })
    }

    /// The most recently pushed value.
    pub fn top(&self) -> Result<i64, FrameError> {
        self.get(0)
    }

    /// Number of live values.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns true if nothing has been pushed.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(capacity: usize, policy: FramePolicy) -> Frame {
        Frame::new(capacity, policy).unwrap()
    }

    #[test]
    fn slot_zero_is_most_recent() {
        let mut f = frame(3, FramePolicy::Strict);
        f.push(10).unwrap();
        f.push(20).unwrap();
        assert_eq!(f.get(0), Ok(20));
        assert_eq!(f.get(1), Ok(10));
        assert_eq!(f.top(), Ok(20));
        assert_eq!(f.len(), 2);
    }

    #[test]
    fn read_below_bottom_underflows() {
        let mut f = frame(3, FramePolicy::Window);
        f.push(1).unwrap();
        assert_eq!(f.get(1), Err(FrameError::Underflow { slot: 1, depth: 1 }));
    }

    #[test]
    fn empty_frame_has_no_top() {
        let f = frame(1, FramePolicy::Window);
        assert!(f.is_empty());
        assert_eq!(f.top(), Err(FrameError::Underflow { slot: 0, depth: 0 }));
    }

    #[test]
    fn huge_slot_underflows_without_overflowing_index() {
        let mut f = frame(1, FramePolicy::Window);
        f.push(1).unwrap();
        assert!(matches!(f.get(usize::MAX), Err(FrameError::Underflow { .. })));
    }

    #[test]
    fn strict_push_past_capacity_overflows() {
        let mut f = frame(2, FramePolicy::Strict);
        f.push(1).unwrap();
        f.push(2).unwrap();
        assert_eq!(f.push(3), Err(FrameError::Overflow { capacity: 2 }));
        assert_eq!(f.top(), Ok(2));
    }

    #[test]
    fn window_push_past_capacity_evicts_oldest() {
        let mut f = frame(2, FramePolicy::Window);
        for v in 1..=4 {
            f.push(v).unwrap();
        }
        assert_eq!(f.len(), 2);
        assert_eq!(f.get(0), Ok(4));
        assert_eq!(f.get(1), Ok(3));
        assert_eq!(f.get(2), Err(FrameError::Underflow { slot: 2, depth: 2 }));
    }

    #[test]
    fn zero_capacity_window_keeps_nothing() {
        let mut f = frame(0, FramePolicy::Window);
        f.push(1).unwrap();
        assert!(f.is_empty());
    }

    #[test]
    fn absurd_capacity_fails_to_allocate() {
        assert!(Frame::new(usize::MAX, FramePolicy::Window).is_err());
    }
}
