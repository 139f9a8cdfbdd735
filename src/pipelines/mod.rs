/// Sentiment inference over single texts and tables
pub mod sentiment;

/// Frequency views over a slice of reviews
pub mod aggregation;
