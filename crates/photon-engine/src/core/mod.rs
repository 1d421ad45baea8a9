pub mod ring;
pub mod rng;
pub mod time;
