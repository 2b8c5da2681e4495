//! Typewriter presentation: options, effect ranges and the per-surface reveal scheduler.

pub(crate) mod options;
pub(crate) mod presenter;
