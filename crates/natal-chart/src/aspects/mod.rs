pub mod calculator;
pub mod types;

pub use calculator::{AspectCalculator, EXACT_ORB};
pub use types::{Aspect, AspectCore, AspectType, Influence};
