pub mod play;

pub use play::{Phase, PlayMode};
