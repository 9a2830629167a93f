pub mod controller;

pub use controller::{TimerEvent, TimingController};
