use core::{
    fmt::Debug,
    ops::Range,
};

use thiserror::Error;

use crate::SegmentKind;

/// All the ways an expression can fail to parse.
#[derive(Debug, PartialEq, Eq, Clone, Error)]
pub enum ParseError {
    #[error("expression is empty")]
    EmptyExpression,

    #[error("unexpected token '{0}'")]
    UnexpectedToken(char),

    #[error("text segment is missing its closing quote")]
    UnterminatedText,

    #[error("{0} segment is missing its closing parenthesis")]
    UnterminatedMethod(SegmentKind),

    #[error("{0} requires a non empty argument")]
    EmptyMethodArgument(SegmentKind),

    #[error("invalid character '{character}' in {kind} argument")]
    InvalidArgumentCharacter { kind: SegmentKind, character: char },

    #[error("{0} does not take an argument")]
    UnexpectedMethodArgument(SegmentKind),

    #[error("expression must not end with a join operator '+'")]
    TrailingJoinOperator,
}

/// A PositionedError representing an error that is associated with a specific position in the given pattern.
#[derive(Debug, PartialEq, Error)]
#[error("{inner} at offset {}", .position.start)]
pub struct PositionedError<E: Debug + PartialEq> {
    position: Range<usize>,
    inner: E,
}

impl<E: Debug + PartialEq> PositionedError<E> {
    pub fn new(position: Range<usize>, inner: E) -> Self {
        Self { position, inner }
    }

    /// Byte range of the offending input.
    pub fn position(&self) -> &Range<usize> {
        &self.position
    }

    /// Byte offset where the offending input starts.
    pub fn offset(&self) -> usize {
        self.position.start
    }

    pub fn inner(&self) -> &E {
        &self.inner
    }

    pub fn into_inner(self) -> E {
        self.inner
    }
}
