//! Shared utilities: transition easing curves and the wall clock that
//! feeds the controller's logical time.

pub mod clock;
pub mod easing;
