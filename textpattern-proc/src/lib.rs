use proc_macro::TokenStream;
use syn::parse_macro_input;

extern crate proc_macro;

mod macro_pattern;

/// Parse a text pattern and generate an instance of <a href="struct.BorrowedTextPattern.html">BorrowedTextPattern</a> at compile time.  
/// An exhaustive overview of the pattern syntax can be found here: <a href="index.html">textpattern</a>.
///
/// # Example
/// ```
/// # use textpattern_core as textpattern;
/// # use textpattern_core::*;
/// # use textpattern_proc::*;
/// static MY_PATTERN: &dyn TextPattern = &text_pattern!("\"ID-\" + RANDOM(XX##)");
/// ```
#[proc_macro]
pub fn text_pattern(item: TokenStream) -> TokenStream {
    let item = parse_macro_input!(item);

    macro_pattern::text_pattern(item)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
