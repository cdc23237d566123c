//! Инфраструктурный слой вокруг движка:
//! - RNG-реализации;
//! - случайный бот для симуляций.

pub mod bot;
pub mod rng;

pub use bot::pick_random_action;
pub use rng::*;
