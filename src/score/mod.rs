pub mod high_score;

pub use high_score::{HIGH_SCORE_KEY, HighScore, HighScoreBoard};
