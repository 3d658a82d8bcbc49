pub mod application;
pub mod job;
pub mod learning;
pub mod match_score;
pub mod message;
pub mod profile;
pub mod user;
