mod award;
mod event;
mod program;
mod qualification;
mod skills;
mod team;

pub use award::*;
pub use event::*;
pub use program::*;
pub use qualification::*;
pub use skills::*;
pub use team::*;

#[cfg(test)]
pub(crate) use event::tests::event as test_event;
