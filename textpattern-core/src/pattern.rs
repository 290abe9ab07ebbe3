use alloc::{
    string::String,
    vec::Vec,
};
use core::{
    fmt::{
        self,
        Debug,
    },
    str::FromStr,
};

use crate::{
    compiler::{
        self,
        ParseError,
        PositionedError,
    },
    Segment,
    SegmentKind,
};

/// A text pattern is the compiled form of a pattern expression.
///
/// It consists of an ordered list of [Segment]s. Generating a value for the pattern means
/// generating a value for every segment in order and concatenating the results.
pub trait TextPattern: Send + Sync + Debug {
    /// Retrieves the segments of this pattern in expression order.
    fn segments(&self) -> &[Segment<'_>];

    /// Returns the first segment whose value comes from a generator (SEQUENTIAL or RANDOM).
    fn generated_segment(&self) -> Option<&Segment<'_>> {
        self.segments()
            .iter()
            .find(|segment| segment.kind().is_generated())
    }

    /// Returns true if at least one segment has the given kind.
    fn contains_kind(&self, kind: SegmentKind) -> bool {
        self.segments().iter().any(|segment| segment.kind() == kind)
    }

    /// Renders the pattern back into an expression.
    ///
    /// # Note
    /// Whitespace of the original expression is not preserved.
    /// Parsing the result yields the same segments again.
    fn expression(&self) -> String {
        let mut result = String::new();
        for (index, segment) in self.segments().iter().enumerate() {
            if index > 0 {
                result.push_str(" + ");
            }

            result.push_str(segment.raw_text());
        }

        result
    }
}

/// An implementation of the [TextPattern] interface that borrows its [Segment]s.
///
/// This struct is primarily used alongside the `text_pattern!` macro to create patterns at compile time.
#[derive(Debug, Clone, Copy)]
pub struct BorrowedTextPattern<'a> {
    segments: &'a [Segment<'a>],
}

impl<'a> BorrowedTextPattern<'a> {
    pub const fn new(segments: &'a [Segment<'a>]) -> Self {
        Self { segments }
    }
}

impl TextPattern for BorrowedTextPattern<'_> {
    fn segments(&self) -> &[Segment<'_>] {
        self.segments
    }
}

/// An implementation of the [TextPattern] interface that owns its [Segment]s.
///
/// This struct is returned by [compiler::parse_pattern] when parsing patterns at runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OwnedTextPattern {
    segments: Vec<Segment<'static>>,
}

impl OwnedTextPattern {
    pub(crate) fn new(segments: Vec<Segment<'static>>) -> Self {
        Self { segments }
    }

    pub fn into_segments(self) -> Vec<Segment<'static>> {
        self.segments
    }
}

impl TextPattern for OwnedTextPattern {
    fn segments(&self) -> &[Segment<'_>] {
        &self.segments
    }
}

impl FromStr for OwnedTextPattern {
    type Err = PositionedError<ParseError>;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        compiler::parse_pattern(value)
    }
}

impl fmt::Display for OwnedTextPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.expression())
    }
}
