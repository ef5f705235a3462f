use log::{info, warn};

use crate::store::{HIGH_SCORE_KEY, KeyValueStore};

/// Score after eating one food worth `points`
pub fn on_food_consumed(score: u32, points: u32) -> u32 {
    score.saturating_add(points)
}

/// The best score given the current one
pub fn on_score_changed(score: u32, high_score: u32) -> u32 {
    score.max(high_score)
}

/// Current score plus the persisted best score
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreTracker {
    score: u32,
    high_score: u32,
    points_per_food: u32,
}

impl ScoreTracker {
    pub fn new(points_per_food: u32, high_score: u32) -> Self {
        Self {
            score: 0,
            high_score,
            points_per_food,
        }
    }

    /// Read the best score from the store once. An absent entry, or a store
    /// that cannot be read, starts from 0.
    pub fn load<S: KeyValueStore + ?Sized>(points_per_food: u32, store: &S) -> Self {
        let high_score = match store.get(HIGH_SCORE_KEY) {
            Ok(value) => value.unwrap_or(0),
            Err(err) => {
                warn!("Could not read high score: {}", err);
                0
            }
        };

        Self::new(points_per_food, high_score)
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    /// Award one food and persist a new record if it was set.
    /// Returns true when the high score changed.
    pub fn record_food<S: KeyValueStore + ?Sized>(&mut self, store: &mut S) -> bool {
        self.score = on_food_consumed(self.score, self.points_per_food);

        let best = on_score_changed(self.score, self.high_score);
        if best == self.high_score {
            return false;
        }

        self.high_score = best;
        info!("New high score: {}", best);
        if let Err(err) = store.set(HIGH_SCORE_KEY, best) {
            warn!("Could not persist high score: {}", err);
        }
        true
    }

    /// Score back to zero; the high score is kept
    pub fn reset(&mut self) {
        self.score = 0;
    }
}
