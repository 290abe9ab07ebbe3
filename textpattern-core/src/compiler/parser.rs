use alloc::{
    borrow::Cow,
    string::String,
    vec::Vec,
};
use core::ops::Range;

use super::{
    lexer::unescape_text,
    Lexer,
    ParseError,
    PositionedError,
    Token,
};
use crate::{
    pattern::OwnedTextPattern,
    Segment,
    SegmentKind,
};

/// Characters allowed within a SEQUENTIAL argument
const SEQUENTIAL_CHARS: &[char] = &['#'];

/// Characters allowed within a RANDOM argument: digit, uppercase letter or lowercase letter
const RANDOM_CHARS: &[char] = &['#', 'X', 'x'];

pub struct PatternParser<'a> {
    lexer: Lexer<'a>,
    segments: Vec<Segment<'static>>,
}

impl<'a> PatternParser<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            lexer: Lexer::new(input),
            segments: Vec::with_capacity(8),
        }
    }

    fn pop_token(&mut self) -> Result<Option<Token<'a>>, PositionedError<ParseError>> {
        self.lexer.next_token()
    }

    fn unexpected_token(&self, token: Token<'a>) -> PositionedError<ParseError> {
        let range = self.lexer.token_range();
        let character = match token {
            Token::Join => '+',
            Token::GroupOpen => '(',
            Token::GroupClose => ')',
            Token::Text(_) => '"',
            Token::Identifier(value) => {
                /* report the whole identifier, e.g. an unknown method name */
                let character = value.chars().next().unwrap_or_default();
                return PositionedError::new(range, ParseError::UnexpectedToken(character));
            }
            Token::Argument(value) => value.chars().next().unwrap_or_default(),
            Token::Unknown(value) => value,
        };

        PositionedError::new(
            range.start..range.start + character.len_utf8(),
            ParseError::UnexpectedToken(character),
        )
    }

    pub fn parse(mut self) -> Result<OwnedTextPattern, PositionedError<ParseError>> {
        let input = self.lexer.input();
        if input.trim().is_empty() {
            return Err(PositionedError::new(
                0..input.len(),
                ParseError::EmptyExpression,
            ));
        }

        let mut next_token = self.pop_token()?;
        while let Some(token) = next_token {
            self.parse_segment(token)?;

            next_token = match self.pop_token()? {
                None => None,
                Some(Token::Join) => {
                    let join_range = self.lexer.token_range();
                    let Some(token) = self.pop_token()? else {
                        return Err(PositionedError::new(
                            join_range,
                            ParseError::TrailingJoinOperator,
                        ));
                    };

                    Some(token)
                }
                Some(token) => return Err(self.unexpected_token(token)),
            };
        }

        if self.segments.is_empty() {
            return Err(PositionedError::new(
                0..input.len(),
                ParseError::EmptyExpression,
            ));
        }

        Ok(OwnedTextPattern::new(self.segments))
    }

    fn parse_segment(&mut self, token: Token<'a>) -> Result<(), PositionedError<ParseError>> {
        match token {
            Token::Text(value) => self.parse_text(value),
            Token::Identifier(name) => {
                let Some(kind) = SegmentKind::from_method_name(name) else {
                    return Err(self.unexpected_token(token));
                };

                self.parse_method(kind)
            }
            _ => Err(self.unexpected_token(token)),
        }
    }

    fn parse_text(&mut self, value: &'a str) -> Result<(), PositionedError<ParseError>> {
        let raw_text = &self.lexer.input()[self.lexer.token_range()];

        log::trace!("TEXT segment {raw_text}");
        self.segments.push(Segment::new(
            SegmentKind::Text,
            String::from(raw_text),
            Some(Cow::Owned(unescape_text(value))),
        ));
        Ok(())
    }

    fn parse_method(&mut self, kind: SegmentKind) -> Result<(), PositionedError<ParseError>> {
        let input = self.lexer.input();
        let name_range = self.lexer.token_range();
        if !self.lexer.next_is('(') {
            /* the argument list must follow the method name immediately */
            let remaining = input[name_range.end..].trim_start();
            let position = input.len() - remaining.len();
            return Err(match remaining.chars().next() {
                Some(value) => PositionedError::new(
                    position..position + value.len_utf8(),
                    ParseError::UnexpectedToken(value),
                ),
                None => PositionedError::new(
                    name_range.start..input.len(),
                    ParseError::UnterminatedMethod(kind),
                ),
            });
        }

        let group_start = self.lexer.token_range().start;
        let Some(Token::Argument(argument)) = self.lexer.method_argument() else {
            return Err(PositionedError::new(
                name_range.start..input.len(),
                ParseError::UnterminatedMethod(kind),
            ));
        };

        let segment_end = self.lexer.token_range().end;
        Self::validate_argument(kind, argument, group_start..segment_end)?;

        let raw_text = &input[name_range.start..segment_end];
        let parameter = match kind {
            SegmentKind::OrgUnitCode => None,
            _ => Some(Cow::Owned(String::from(argument))),
        };

        log::trace!("{kind} segment {raw_text}");
        self.segments
            .push(Segment::new(kind, String::from(raw_text), parameter));
        Ok(())
    }

    /// Validate the argument of a method.
    /// The group range covers the parentheses and the argument in between.
    fn validate_argument(
        kind: SegmentKind,
        argument: &str,
        group_range: Range<usize>,
    ) -> Result<(), PositionedError<ParseError>> {
        let allowed_chars = match kind {
            SegmentKind::Sequential => Some(SEQUENTIAL_CHARS),
            SegmentKind::Random => Some(RANDOM_CHARS),
            SegmentKind::OrgUnitCode => {
                return if argument.is_empty() {
                    Ok(())
                } else {
                    Err(PositionedError::new(
                        group_range,
                        ParseError::UnexpectedMethodArgument(kind),
                    ))
                };
            }
            SegmentKind::CurrentDate | SegmentKind::Text => None,
        };

        if argument.is_empty() {
            return Err(PositionedError::new(
                group_range,
                ParseError::EmptyMethodArgument(kind),
            ));
        }

        let Some(allowed_chars) = allowed_chars else {
            return Ok(());
        };

        if let Some((index, character)) = argument
            .char_indices()
            .find(|(_, character)| !allowed_chars.contains(character))
        {
            let position = group_range.start + 1 + index;
            return Err(PositionedError::new(
                position..position + character.len_utf8(),
                ParseError::InvalidArgumentCharacter { kind, character },
            ));
        }

        Ok(())
    }
}

/// Parse the given string as pattern.
pub fn parse_pattern(pattern: &str) -> Result<OwnedTextPattern, PositionedError<ParseError>> {
    let parser = PatternParser::new(pattern);
    parser.parse().inspect_err(|error| {
        log::debug!("failed to parse pattern {pattern:?}: {error}");
    })
}

/// Parse a pattern which might be absent.
/// A missing pattern is treated like an empty expression.
pub fn parse_optional_pattern(
    pattern: Option<&str>,
) -> Result<OwnedTextPattern, PositionedError<ParseError>> {
    match pattern {
        Some(pattern) => self::parse_pattern(pattern),
        None => Err(PositionedError::new(0..0, ParseError::EmptyExpression)),
    }
}

#[cfg(test)]
mod test {
    use super::{
        parse_optional_pattern,
        parse_pattern,
        PatternParser,
    };
    use crate::{
        compiler::{
            ParseError,
            PositionedError,
        },
        pattern::TextPattern,
        SegmentKind,
    };

    fn parse_error(input: &str) -> PositionedError<ParseError> {
        PatternParser::new(input).parse().unwrap_err()
    }

    fn assert_single_segment(input: &str, kind: SegmentKind, parameter: Option<&str>) {
        let result = PatternParser::new(input).parse().unwrap();
        let segments = result.segments();
        assert_eq!(segments.len(), 1);

        assert_eq!(segments[0].raw_text(), input.trim());
        assert_eq!(segments[0].kind(), kind);
        assert_eq!(segments[0].parameter(), parameter);
    }

    #[test]
    fn test_empty_expression() {
        assert_eq!(
            parse_error(""),
            PositionedError::new(0..0, ParseError::EmptyExpression)
        );
        assert_eq!(
            parse_error("   "),
            PositionedError::new(0..3, ParseError::EmptyExpression)
        );
        assert_eq!(
            parse_error("\t\n"),
            PositionedError::new(0..2, ParseError::EmptyExpression)
        );
        assert_eq!(
            parse_optional_pattern(None).unwrap_err(),
            PositionedError::new(0..0, ParseError::EmptyExpression)
        );
        assert!(parse_optional_pattern(Some("\"A\"")).is_ok());
    }

    #[test]
    fn test_text() {
        assert_single_segment("\"Hello world!\"", SegmentKind::Text, Some("Hello world!"));
        assert_single_segment(
            "\"This is an \\\"escaped\\\" text\"",
            SegmentKind::Text,
            Some("This is an \"escaped\" text"),
        );
        assert_single_segment("  \"\"  ", SegmentKind::Text, Some(""));
        assert_single_segment("\"a+b(c)\"", SegmentKind::Text, Some("a+b(c)"));

        assert_eq!(
            parse_error("\"This segment has no end"),
            PositionedError::new(0..24, ParseError::UnterminatedText)
        );
    }

    #[test]
    fn test_sequential() {
        assert_single_segment("SEQUENTIAL(#)", SegmentKind::Sequential, Some("#"));
        assert_single_segment("SEQUENTIAL(#####)", SegmentKind::Sequential, Some("#####"));

        assert_eq!(
            parse_error("SEQUENTIAL(X)"),
            PositionedError::new(
                11..12,
                ParseError::InvalidArgumentCharacter {
                    kind: SegmentKind::Sequential,
                    character: 'X'
                }
            )
        );
        assert_eq!(
            parse_error("SEQUENTIAL(#"),
            PositionedError::new(0..12, ParseError::UnterminatedMethod(SegmentKind::Sequential))
        );
        assert_eq!(
            parse_error("SEQUENTIAL()"),
            PositionedError::new(
                10..12,
                ParseError::EmptyMethodArgument(SegmentKind::Sequential)
            )
        );
    }

    #[test]
    fn test_random() {
        assert_single_segment("RANDOM(#Xx)", SegmentKind::Random, Some("#Xx"));
        assert_single_segment(" RANDOM(XXXX) ", SegmentKind::Random, Some("XXXX"));

        assert_eq!(
            parse_error("RANDOM(S)"),
            PositionedError::new(
                7..8,
                ParseError::InvalidArgumentCharacter {
                    kind: SegmentKind::Random,
                    character: 'S'
                }
            )
        );
        assert_eq!(
            parse_error("RANDOM(##ü)"),
            PositionedError::new(
                9..11,
                ParseError::InvalidArgumentCharacter {
                    kind: SegmentKind::Random,
                    character: 'ü'
                }
            )
        );
        assert_eq!(
            parse_error("RANDOM()"),
            PositionedError::new(6..8, ParseError::EmptyMethodArgument(SegmentKind::Random))
        );
        assert_eq!(
            parse_error("RANDOM(#"),
            PositionedError::new(0..8, ParseError::UnterminatedMethod(SegmentKind::Random))
        );
    }

    #[test]
    fn test_org_unit_code() {
        assert_single_segment("ORG_UNIT_CODE()", SegmentKind::OrgUnitCode, None);

        assert_eq!(
            parse_error("ORG_UNIT_CODE(...)"),
            PositionedError::new(
                13..18,
                ParseError::UnexpectedMethodArgument(SegmentKind::OrgUnitCode)
            )
        );
    }

    #[test]
    fn test_current_date() {
        assert_single_segment("CURRENT_DATE(yyyy)", SegmentKind::CurrentDate, Some("yyyy"));
        assert_single_segment(
            "CURRENT_DATE(dd.MM.yyyy HH:mm)",
            SegmentKind::CurrentDate,
            Some("dd.MM.yyyy HH:mm"),
        );

        assert_eq!(
            parse_error("CURRENT_DATE()"),
            PositionedError::new(
                12..14,
                ParseError::EmptyMethodArgument(SegmentKind::CurrentDate)
            )
        );
    }

    #[test]
    fn test_method_name() {
        /* unknown method */
        assert_eq!(
            parse_error("Z"),
            PositionedError::new(0..1, ParseError::UnexpectedToken('Z'))
        );
        assert_eq!(
            parse_error("UNKNOWN(#)"),
            PositionedError::new(0..7, ParseError::UnexpectedToken('U'))
        );

        /* lowercase method */
        assert_eq!(
            parse_error("random(#)"),
            PositionedError::new(0..1, ParseError::UnexpectedToken('r'))
        );

        /* space between name and argument list */
        assert_eq!(
            parse_error("RANDOM (#)"),
            PositionedError::new(7..8, ParseError::UnexpectedToken('('))
        );

        /* name without argument list followed by more segments */
        assert_eq!(
            parse_error("ORG_UNIT_CODE + \"A\""),
            PositionedError::new(14..15, ParseError::UnexpectedToken('+'))
        );
        assert_eq!(
            parse_error("\"A\" + CURRENT_DATE\t\"B\""),
            PositionedError::new(19..20, ParseError::UnexpectedToken('"'))
        );

        /* name without argument list */
        assert_eq!(
            parse_error("RANDOM "),
            PositionedError::new(0..7, ParseError::UnterminatedMethod(SegmentKind::Random))
        );
        assert_eq!(
            parse_error("\"A\" + RANDOMx(#)"),
            PositionedError::new(12..13, ParseError::UnexpectedToken('x'))
        );
    }

    #[test]
    fn test_join() {
        assert_eq!(
            parse_error("+"),
            PositionedError::new(0..1, ParseError::UnexpectedToken('+'))
        );
        assert_eq!(
            parse_error("+ \"A\""),
            PositionedError::new(0..1, ParseError::UnexpectedToken('+'))
        );
        assert_eq!(
            parse_error("\"A\" + + \"B\""),
            PositionedError::new(6..7, ParseError::UnexpectedToken('+'))
        );
        assert_eq!(
            parse_error("\"A\" \"B\""),
            PositionedError::new(4..5, ParseError::UnexpectedToken('"'))
        );
        assert_eq!(
            parse_error("RANDOM(#) SEQUENTIAL(#)"),
            PositionedError::new(10..20, ParseError::UnexpectedToken('S'))
        );
        assert_eq!(
            parse_error("RANDOM(#))"),
            PositionedError::new(9..10, ParseError::UnexpectedToken(')'))
        );
        assert_eq!(
            parse_error("RANDOM(#) + "),
            PositionedError::new(10..11, ParseError::TrailingJoinOperator)
        );
        assert_eq!(
            parse_error("\"A\"+"),
            PositionedError::new(3..4, ParseError::TrailingJoinOperator)
        );
    }

    #[test]
    fn test_full_expression() {
        let result = parse_pattern(" \"ABC\" + \"-\" + SEQUENTIAL(###)").unwrap();
        let kinds = result
            .segments()
            .iter()
            .map(|segment| segment.kind())
            .collect::<Vec<_>>();
        assert_eq!(
            kinds,
            [SegmentKind::Text, SegmentKind::Text, SegmentKind::Sequential]
        );

        let raw_texts = result
            .segments()
            .iter()
            .map(|segment| segment.raw_text())
            .collect::<Vec<_>>();
        assert_eq!(raw_texts, ["\"ABC\"", "\"-\"", "SEQUENTIAL(###)"]);
    }

    #[test]
    fn test_complete_pattern() {
        let result =
            parse_pattern("ORG_UNIT_CODE() + CURRENT_DATE(yyyy) + RANDOM(###) + \"-OK\"").unwrap();

        let segments = result.segments();
        assert_eq!(segments.len(), 4);
        assert_eq!(segments[0].kind(), SegmentKind::OrgUnitCode);
        assert_eq!(segments[1].kind(), SegmentKind::CurrentDate);
        assert_eq!(segments[2].kind(), SegmentKind::Random);
        assert_eq!(segments[3].kind(), SegmentKind::Text);

        assert_eq!(segments[0].parameter(), None);
        assert_eq!(segments[1].parameter(), Some("yyyy"));
        assert_eq!(segments[2].parameter(), Some("###"));
        assert_eq!(segments[3].parameter(), Some("-OK"));
    }

    #[test]
    fn test_compact_expression() {
        let result = parse_pattern("\"A\"+SEQUENTIAL(#)+\"B\"").unwrap();
        assert_eq!(result.segments().len(), 3);
        assert_eq!(result.segments()[1].raw_text(), "SEQUENTIAL(#)");
    }
}
