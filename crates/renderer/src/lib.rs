//! Status-line layout engine.
//!
//! [`render_status_line`] is the entry point: each configured line goes
//! through [`layout::render_line`] and the results are joined with `\n`.

pub mod compose;
pub mod layout;
pub mod powerline;

pub use compose::{effective_width, render_status_line};
pub use layout::{distribute, render_line, render_segments, Segment};
