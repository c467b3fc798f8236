//! Calendar system for tick/hour/day tracking
//!
//! Day/night classification is derived from the hour on demand, never
//! stored as independent truth.

use serde::{Deserialize, Serialize};

/// Coarse day/night phase for consumers such as a renderer's lighting pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DayPhase {
    Day,   // 06:00-20:00
    Night, // 20:00-06:00
}

impl DayPhase {
    pub fn from_hour(hour: u32) -> Self {
        if (6..20).contains(&hour) {
            DayPhase::Day
        } else {
            DayPhase::Night
        }
    }
}

/// Calendar tracks simulation time with hour/day granularity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Calendar {
    tick: u64,
    ticks_per_hour: u64,
}

impl Calendar {
    pub fn new(ticks_per_hour: u64) -> Self {
        Self { tick: 0, ticks_per_hour }
    }

    pub fn advance(&mut self) {
        self.tick += 1;
    }

    pub fn current_tick(&self) -> u64 {
        self.tick
    }

    /// Days are 1-based: a freshly started colony is on day 1
    pub fn current_day(&self) -> u64 {
        self.tick / (self.ticks_per_hour * 24) + 1
    }

    pub fn current_hour(&self) -> u32 {
        ((self.tick / self.ticks_per_hour) % 24) as u32
    }

    pub fn current_phase(&self) -> DayPhase {
        DayPhase::from_hour(self.current_hour())
    }

    /// True when this tick is the first of a new day
    pub fn is_day_boundary(&self) -> bool {
        self.tick > 0 && self.tick % (self.ticks_per_hour * 24) == 0
    }

    pub fn ticks_per_hour(&self) -> u64 {
        self.ticks_per_hour
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_phase_from_hour() {
        assert_eq!(DayPhase::from_hour(6), DayPhase::Day);
        assert_eq!(DayPhase::from_hour(19), DayPhase::Day);
        assert_eq!(DayPhase::from_hour(20), DayPhase::Night);
        assert_eq!(DayPhase::from_hour(23), DayPhase::Night);
        assert_eq!(DayPhase::from_hour(0), DayPhase::Night);
        assert_eq!(DayPhase::from_hour(5), DayPhase::Night);
    }

    #[test]
    fn test_calendar_advances() {
        let mut cal = Calendar::new(10); // 10 ticks per hour, 240 per day
        assert_eq!(cal.current_tick(), 0);
        assert_eq!(cal.current_day(), 1);
        assert_eq!(cal.current_hour(), 0);

        for _ in 0..10 {
            cal.advance();
        }
        assert_eq!(cal.current_hour(), 1);

        for _ in 0..230 {
            cal.advance();
        }
        assert_eq!(cal.current_tick(), 240);
        assert_eq!(cal.current_day(), 2);
        assert_eq!(cal.current_hour(), 0);
        assert!(cal.is_day_boundary());
    }

    #[test]
    fn test_day_boundary_not_at_genesis() {
        let cal = Calendar::new(10);
        assert!(!cal.is_day_boundary());
    }
}
