pub mod app_time;
pub mod rng;

pub use app_time::{AppInstant, clock_label, ms, now};
pub use rng::{DemoRng, rng_for, seeded_rng};
