pub mod aggregate;
pub mod checker;
pub mod checkers;
pub mod domain;
pub mod loader;
pub mod logging;
pub mod matching;
pub mod metrics;
pub mod review;
pub mod reviewers;
pub mod runner;
pub mod scaling;
pub mod sections;
