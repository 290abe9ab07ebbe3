/*!
A parser for text patterns: small expressions describing how to generate identifiers and codes.

A pattern joins segments with `+`. Every segment produces one part of the resulting value:
```
use textpattern::{compiler, SegmentKind, TextPattern};

let pattern = compiler::parse_pattern("ORG_UNIT_CODE() + \"-\" + SEQUENTIAL(####)").unwrap();
let kinds = pattern.segments().iter().map(|segment| segment.kind()).collect::<Vec<_>>();
assert_eq!(kinds, [SegmentKind::OrgUnitCode, SegmentKind::Text, SegmentKind::Sequential]);
```

Patterns known at compile time can be checked and built by the [text_pattern!] macro.

*/
#![doc = include_str!("../GRAMMAR.md")]
#![cfg_attr(not(test), no_std)]
pub use textpattern_core::*;
pub use textpattern_proc::text_pattern;
