#![cfg_attr(not(test), no_std)]
extern crate alloc;

pub mod compiler;

mod segment;
pub use segment::{
    Segment,
    SegmentKind,
};

mod pattern;
pub use pattern::{
    BorrowedTextPattern,
    OwnedTextPattern,
    TextPattern,
};

mod validator;
pub use validator::{
    validate_segment_value,
    validate_values,
    ValueError,
};
