//! Text diffing and rendering
//!
//! - `myers`: Myers' shortest edit script over arbitrary token sequences
//! - `segment`: word/line mode selection and grouping of edits into tagged segments
//! - `render`: bounded, line-numbered textual rendering of a segment sequence

pub mod myers;
pub mod render;
pub mod segment;

pub use render::{DiffFormatOptions, format_diff, render};
pub use segment::{Diff, DiffMode, DiffSegment, SegmentTag, diff};
