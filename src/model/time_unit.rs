/// The engine's integer time unit, with a fixed conversion to ticks per
/// second. Bound once at startup (spec.md §4.5, §6).
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum TimeUnit {
    Seconds,
    Milliseconds,
}

impl TimeUnit {
    pub fn ticks_per_second(&self) -> i64 {
        match self {
            TimeUnit::Seconds => 1,
            TimeUnit::Milliseconds => 1_000,
        }
    }

    pub fn tick_duration_ns(&self) -> i64 {
        1_000_000_000 / self.ticks_per_second()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_duration_matches_ticks_per_second() {
        assert_eq!(TimeUnit::Seconds.tick_duration_ns(), 1_000_000_000);
        assert_eq!(TimeUnit::Milliseconds.tick_duration_ns(), 1_000_000);
    }
}
