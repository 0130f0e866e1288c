//! Which hole currently shows the mole.

use rand::Rng;

/// One hole on the board. Ids are 1-based.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Slot {
    pub id: usize,
    pub has_target: bool,
}

/// Result of [`TargetScheduler::activate_random`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Activation {
    /// Slot that lost the target, if a different one held it.
    pub deactivated: Option<usize>,
    pub activated: usize,
}

/// Owns the slot set and keeps at most one of them active.
#[derive(Debug)]
pub struct TargetScheduler<R> {
    slots: Vec<Slot>,
    rng: R,
}

impl<R: Rng> TargetScheduler<R> {
    /// # Panics
    /// If `slot_count` is zero; [`GameConfig::validate`](crate::GameConfig::validate)
    /// rules that out before an engine is built.
    pub fn new(slot_count: usize, rng: R) -> Self {
        assert!(slot_count > 0, "a board needs at least one slot");
        let slots = (1..=slot_count)
            .map(|id| Slot {
                id,
                has_target: false,
            })
            .collect();
        Self { slots, rng }
    }

    /// Pick a slot uniformly over all of them (the current one included) and
    /// make it the only active slot.
    pub fn activate_random(&mut self) -> Activation {
        let idx = self.rng.gen_range(0..self.slots.len());
        let previous = self.active();
        for (i, slot) in self.slots.iter_mut().enumerate() {
            slot.has_target = i == idx;
        }
        let activated = idx + 1;
        Activation {
            deactivated: previous.filter(|&id| id != activated),
            activated,
        }
    }

    /// Returns the slot that was active, if any.
    pub fn clear_all(&mut self) -> Option<usize> {
        let previous = self.active();
        for slot in &mut self.slots {
            slot.has_target = false;
        }
        previous
    }

    /// Returns whether the slot held the target. Unknown ids are ignored.
    pub fn clear(&mut self, id: usize) -> bool {
        match self.slot_mut(id) {
            Some(slot) => std::mem::replace(&mut slot.has_target, false),
            None => false,
        }
    }

    /// `None` for ids outside `1..=slot_count`.
    pub fn has_target(&self, id: usize) -> Option<bool> {
        self.slots.get(id.checked_sub(1)?).map(|s| s.has_target)
    }

    pub fn active(&self) -> Option<usize> {
        self.slots.iter().find(|s| s.has_target).map(|s| s.id)
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    fn slot_mut(&mut self, id: usize) -> Option<&mut Slot> {
        self.slots.get_mut(id.checked_sub(1)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn scheduler(n: usize) -> TargetScheduler<SmallRng> {
        TargetScheduler::new(n, SmallRng::seed_from_u64(7))
    }

    fn active_count(s: &TargetScheduler<SmallRng>) -> usize {
        s.slots().iter().filter(|s| s.has_target).count()
    }

    #[test]
    fn exactly_one_active_after_activation() {
        let mut s = scheduler(6);
        assert_eq!(active_count(&s), 0);
        for _ in 0..50 {
            let a = s.activate_random();
            assert_eq!(active_count(&s), 1);
            assert_eq!(s.active(), Some(a.activated));
            assert!((1..=6).contains(&a.activated));
        }
        assert!(s.clear_all().is_some());
        assert_eq!(active_count(&s), 0);
        assert_eq!(s.clear_all(), None);
    }

    #[test]
    fn reports_previous_slot_only_when_it_moves() {
        let mut s = scheduler(1);
        let first = s.activate_random();
        assert_eq!(first, Activation { deactivated: None, activated: 1 });
        // One slot: re-activating the same hole is the only outcome.
        let second = s.activate_random();
        assert_eq!(second, Activation { deactivated: None, activated: 1 });
    }

    #[test]
    fn every_slot_gets_picked() {
        let mut s = scheduler(6);
        let mut seen = [0usize; 6];
        for _ in 0..6_000 {
            let a = s.activate_random();
            seen[a.activated - 1] += 1;
        }
        // Uniform over 6 slots: each should land near 1000.
        for count in seen {
            assert!((800..1200).contains(&count), "skewed distribution: {seen:?}");
        }
    }

    #[test]
    fn out_of_range_ids_are_no_match() {
        let mut s = scheduler(6);
        assert_eq!(s.has_target(0), None);
        assert_eq!(s.has_target(7), None);
        assert_eq!(s.has_target(3), Some(false));
        assert!(!s.clear(0));
        assert!(!s.clear(99));
    }

    #[test]
    fn clear_single_slot() {
        let mut s = scheduler(6);
        let a = s.activate_random();
        assert!(s.clear(a.activated));
        assert!(!s.clear(a.activated));
        assert_eq!(s.active(), None);
    }
}
