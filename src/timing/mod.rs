//! Timing Module - Zeitquellen, Dauer-Anzeige und Timer
//!
//! Alle Timer sind kooperativ: sie werden auf der UI-Schleife gesetzt
//! und von ihr abgefragt.

mod clock;
mod duration;
mod timer;

pub use clock::{Clock, SystemClock, TickClock, TokioClock};
pub use duration::DurationClock;
pub use timer::CooperativeTimer;
