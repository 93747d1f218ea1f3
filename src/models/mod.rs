// src/models/mod.rs

pub mod booking;
pub mod hotel;
pub mod room;
pub mod search;

pub use booking::*;
pub use hotel::*;
pub use room::*;
pub use search::*;
