mod common;
mod event;
mod ladder;
mod pro_points;
mod schedule;
mod tournament;

pub use common::*;
pub use event::*;
pub use ladder::*;
pub use pro_points::*;
pub use schedule::*;
pub use tournament::*;
