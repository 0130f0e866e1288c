/// Running score. Negative values are valid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScoreTracker {
    value: i64,
}

impl ScoreTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) -> i64 {
        self.value = 0;
        self.value
    }

    pub fn increment(&mut self) -> i64 {
        self.value = self.value.saturating_add(1);
        self.value
    }

    pub fn decrement(&mut self) -> i64 {
        self.value = self.value.saturating_sub(1);
        self.value
    }

    pub fn value(&self) -> i64 {
        self.value
    }
}
