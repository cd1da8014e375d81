//! Swipe Snake - a headless snake simulation core
//!
//! This library provides:
//! - Core game logic: wrap-around movement, food, scoring, collisions and
//!   difficulty (game module)
//! - An async tick scheduler with countdown and pause (session module)
//! - Per-process statistics (metrics module)

pub mod game;
pub mod metrics;
pub mod session;
