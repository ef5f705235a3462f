pub mod elapsed;
pub mod score;

pub use elapsed::ElapsedTime;
pub use score::ScoreTracker;
