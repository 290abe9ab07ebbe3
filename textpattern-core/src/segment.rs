use alloc::borrow::Cow;
use core::fmt;

/// The kind of a segment, determining how the segment value gets produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum SegmentKind {
    /// A quoted literal: `"ABC"`
    Text,

    /// A zero padded counter: `SEQUENTIAL(###)`
    Sequential,

    /// A random string: `RANDOM(#Xx)`
    Random,

    /// The code of the contextual organisation unit: `ORG_UNIT_CODE()`
    OrgUnitCode,

    /// The current date in the given format: `CURRENT_DATE(yyyy)`
    CurrentDate,
}

impl SegmentKind {
    /// All method kinds, i.e. every kind written as `NAME(argument)`.
    pub const METHODS: [SegmentKind; 4] = [
        SegmentKind::Sequential,
        SegmentKind::Random,
        SegmentKind::OrgUnitCode,
        SegmentKind::CurrentDate,
    ];

    /// The name of this kind as it appears in an expression.
    pub const fn method_name(&self) -> &'static str {
        match self {
            SegmentKind::Text => "TEXT",
            SegmentKind::Sequential => "SEQUENTIAL",
            SegmentKind::Random => "RANDOM",
            SegmentKind::OrgUnitCode => "ORG_UNIT_CODE",
            SegmentKind::CurrentDate => "CURRENT_DATE",
        }
    }

    /// Resolve a method identifier.
    /// `TEXT` is not a method and therefore never resolves.
    pub fn from_method_name(name: &str) -> Option<Self> {
        Self::METHODS
            .into_iter()
            .find(|kind| kind.method_name() == name)
    }

    /// Returns true for kinds whose value is produced by a generator (SEQUENTIAL and RANDOM).
    pub const fn is_generated(&self) -> bool {
        matches!(self, SegmentKind::Sequential | SegmentKind::Random)
    }

    pub const fn is_text(&self) -> bool {
        matches!(self, SegmentKind::Text)
    }
}

impl fmt::Display for SegmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.method_name())
    }
}

/// A single typed unit of a compiled pattern.
///
/// The segment borrows its strings when created in a const context (see the `text_pattern!` macro)
/// and owns them when created by the runtime parser.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Segment<'a> {
    kind: SegmentKind,
    raw_text: Cow<'a, str>,
    parameter: Option<Cow<'a, str>>,
}

impl<'a> Segment<'a> {
    pub fn new(
        kind: SegmentKind,
        raw_text: impl Into<Cow<'a, str>>,
        parameter: Option<Cow<'a, str>>,
    ) -> Self {
        Self {
            kind,
            raw_text: raw_text.into(),
            parameter,
        }
    }

    pub const fn new_const(kind: SegmentKind, raw_text: &'a str, parameter: Option<&'a str>) -> Self {
        Self {
            kind,
            raw_text: Cow::Borrowed(raw_text),
            parameter: match parameter {
                Some(parameter) => Some(Cow::Borrowed(parameter)),
                None => None,
            },
        }
    }

    pub fn kind(&self) -> SegmentKind {
        self.kind
    }

    /// The exact part of the expression this segment has been parsed from.
    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }

    /// The method argument, or the unescaped content of a text segment.
    /// `None` for methods which take no argument.
    pub fn parameter(&self) -> Option<&str> {
        self.parameter.as_deref()
    }

    /// Detach the segment from the borrowed input.
    pub fn into_owned(self) -> Segment<'static> {
        Segment {
            kind: self.kind,
            raw_text: Cow::Owned(self.raw_text.into_owned()),
            parameter: self.parameter.map(|value| Cow::Owned(value.into_owned())),
        }
    }
}

impl fmt::Display for Segment<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.raw_text)
    }
}
