use std::{
    io::{
        self,
        Cursor,
        Write,
    },
    iter,
    ops::Range,
};

use proc_macro2::{
    Span,
    TokenStream,
};
use quote::ToTokens;
use syn::{
    parse2,
    Error,
    Expr,
    LitStr,
    Result,
};
use textpattern_core::{
    compiler,
    Segment,
    SegmentKind,
    TextPattern,
};

fn emit_kind(output: &mut dyn Write, kind: SegmentKind) -> io::Result<()> {
    let kind = match kind {
        SegmentKind::Text => "textpattern::SegmentKind::Text",
        SegmentKind::Sequential => "textpattern::SegmentKind::Sequential",
        SegmentKind::Random => "textpattern::SegmentKind::Random",
        SegmentKind::OrgUnitCode => "textpattern::SegmentKind::OrgUnitCode",
        SegmentKind::CurrentDate => "textpattern::SegmentKind::CurrentDate",
    };

    write!(output, "{}", kind)
}

fn emit_segment(output: &mut dyn Write, segment: &Segment<'_>) -> io::Result<()> {
    write!(output, "textpattern::Segment::new_const(")?;
    self::emit_kind(output, segment.kind())?;

    /* the debug representation of a str is a valid string literal */
    write!(output, ", {:?}, ", segment.raw_text())?;
    match segment.parameter() {
        Some(parameter) => write!(output, "Some({:?})", parameter)?,
        None => write!(output, "None")?,
    }

    write!(output, ")")?;
    Ok(())
}

fn emit_segments(output: &mut dyn Write, segments: &[Segment<'_>]) -> io::Result<()> {
    write!(output, "&[")?;

    if !segments.is_empty() {
        self::emit_segment(output, &segments[0])?;
    }

    if segments.len() > 1 {
        for segment in &segments[1..] {
            write!(output, ", ")?;
            self::emit_segment(output, segment)?;
        }
    }

    write!(output, "]")?;
    Ok(())
}

fn pattern_to_const_str(pattern: &dyn TextPattern) -> io::Result<String> {
    let mut result_buffer = Vec::<u8>::with_capacity(1024);
    {
        let mut writer = Cursor::new(&mut result_buffer);

        /* the segments need a const item to be promoted into a 'static slice */
        write!(
            &mut writer,
            "{{ const SEGMENTS: &[textpattern::Segment<'static>] = "
        )?;
        emit_segments(&mut writer, pattern.segments())?;
        write!(&mut writer, "; textpattern::BorrowedTextPattern::new(SEGMENTS) }}")?;
    }

    String::from_utf8(result_buffer).map_err(|error| io::Error::new(io::ErrorKind::InvalidData, error))
}

/// Map byte offsets of a string literal's value onto byte offsets within the literal's source.
///
/// Entry `n` holds the source offset of value byte `n`, the last entry the end of the value.
/// Returns `None` if the source is not a string literal.
fn value_offsets(source: &str) -> Option<Vec<usize>> {
    let content_end = source.rfind('"')?;
    if source.starts_with('r') {
        /* raw strings have no escapes, only a prefix like r#" */
        let content_start = source.find('"')? + 1;
        return Some((content_start..=content_end).collect());
    }

    if !source.starts_with('"') || content_end == 0 {
        return None;
    }

    let mut offsets = Vec::with_capacity(source.len());
    let mut chars = source[1..content_end]
        .char_indices()
        .map(|(position, value)| (position + 1, value))
        .peekable();

    while let Some((position, value)) = chars.next() {
        let value_len = if value == '\\' {
            match chars.next()?.1 {
                'x' => {
                    chars.next()?;
                    chars.next()?;
                    1
                }
                'u' => {
                    let mut code = 0u32;
                    for (_, digit) in chars.by_ref() {
                        if digit == '}' {
                            break;
                        }

                        if let Some(digit) = digit.to_digit(16) {
                            code = code * 16 + digit;
                        }
                    }

                    char::from_u32(code).map_or(1, char::len_utf8)
                }
                '\n' | '\r' => {
                    /* line continuation, skips the following whitespaces */
                    while chars.next_if(|(_, value)| value.is_whitespace()).is_some() {}
                    0
                }
                _ => 1,
            }
        } else {
            value.len_utf8()
        };

        offsets.extend(iter::repeat(position).take(value_len));
    }

    offsets.push(content_end);
    Some(offsets)
}

fn error_span(literal: &LitStr, position: &Range<usize>) -> Span {
    let token = literal.token();
    self::value_offsets(&token.to_string())
        .and_then(|offsets| {
            let start = *offsets.get(position.start)?;
            let end = *offsets.get(position.end)?;
            token.subspan(start..end)
        })
        .unwrap_or(literal.span())
}

pub fn text_pattern(item: TokenStream) -> Result<TokenStream> {
    let pattern_str = parse2::<LitStr>(item)?;
    let pattern = match compiler::parse_pattern(&pattern_str.value()) {
        Ok(result) => result,
        Err(error) => {
            let error_span = self::error_span(&pattern_str, error.position());
            return Err(Error::new(error_span, format!("{}", error)));
        }
    };

    let pattern = pattern_to_const_str(&pattern)
        .map_err(|error| Error::new(pattern_str.span(), error.to_string()))?;
    let pattern = syn::parse_str::<Expr>(&pattern)?;
    Ok(pattern.to_token_stream())
}
