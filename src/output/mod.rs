//! Output formatting for simulation runs.

mod terminal;

pub use terminal::format_run;
