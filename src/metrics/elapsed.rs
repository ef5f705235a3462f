use std::fmt;

/// Minutes and seconds played in the current game
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ElapsedTime {
    pub minutes: u32,
    pub seconds: u8,
}

impl ElapsedTime {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance by one second; seconds roll over into unbounded minutes
    pub fn tick(&mut self) {
        if self.seconds == 59 {
            self.minutes += 1;
            self.seconds = 0;
        } else {
            self.seconds += 1;
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn total_seconds(&self) -> u64 {
        u64::from(self.minutes) * 60 + u64::from(self.seconds)
    }
}

impl fmt::Display for ElapsedTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.minutes, self.seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn after(ticks: u32) -> ElapsedTime {
        let mut time = ElapsedTime::new();
        for _ in 0..ticks {
            time.tick();
        }
        time
    }

    #[test]
    fn test_time_formatting() {
        assert_eq!(ElapsedTime::new().to_string(), "00:00");
        assert_eq!(after(125).to_string(), "02:05");
        assert_eq!(after(3661).to_string(), "61:01");
    }

    #[test]
    fn test_rollover() {
        let time = after(59);
        assert_eq!((time.minutes, time.seconds), (0, 59));

        let time = after(60);
        assert_eq!((time.minutes, time.seconds), (1, 0));
        assert_eq!(time.total_seconds(), 60);
    }

    #[test]
    fn test_reset() {
        let mut time = after(90);
        time.reset();
        assert_eq!(time, ElapsedTime::new());
    }
}
