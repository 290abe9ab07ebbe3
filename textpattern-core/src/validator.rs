use thiserror::Error;

use crate::{
    Segment,
    SegmentKind,
    TextPattern,
};

#[derive(Debug, PartialEq, Eq, Clone, Error)]
pub enum ValueError {
    #[error("expected {expected} segment values but got {actual}")]
    SegmentCountMismatch { expected: usize, actual: usize },

    #[error("value of segment {index} does not match its {kind} format")]
    InvalidValue { index: usize, kind: SegmentKind },
}

/// Check whether the value could have been produced by the given segment.
///
/// # Note
/// ORG_UNIT_CODE and CURRENT_DATE values depend on their context and only need to be non empty.
pub fn validate_segment_value(segment: &Segment<'_>, value: &str) -> bool {
    let format = segment.parameter().unwrap_or_default();
    match segment.kind() {
        SegmentKind::Text => format == value,
        SegmentKind::Sequential => {
            value.chars().count() == format.chars().count()
                && value.chars().all(|value| value.is_ascii_digit())
        }
        SegmentKind::Random => {
            value.chars().count() == format.chars().count()
                && format.chars().zip(value.chars()).all(|(format, value)| match format {
                    '#' => value.is_ascii_digit(),
                    'X' => value.is_ascii_uppercase(),
                    'x' => value.is_ascii_lowercase(),
                    _ => false,
                })
        }
        SegmentKind::OrgUnitCode | SegmentKind::CurrentDate => !value.is_empty(),
    }
}

/// Validate one value per segment of the pattern.
pub fn validate_values(pattern: &dyn TextPattern, values: &[&str]) -> Result<(), ValueError> {
    let segments = pattern.segments();
    if segments.len() != values.len() {
        return Err(ValueError::SegmentCountMismatch {
            expected: segments.len(),
            actual: values.len(),
        });
    }

    for (index, (segment, value)) in segments.iter().zip(values).enumerate() {
        if !self::validate_segment_value(segment, value) {
            return Err(ValueError::InvalidValue {
                index,
                kind: segment.kind(),
            });
        }
    }

    Ok(())
}
