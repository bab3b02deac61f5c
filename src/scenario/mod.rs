//! Scripted verification scenario against a live automation server

mod outcome;
mod runner;

pub use outcome::TestOutcome;
pub use runner::run;
