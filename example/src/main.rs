use std::env;

use textpattern::{
    compiler,
    text_pattern,
    validate_values,
    TextPattern,
};

static ATTRIBUTE_PATTERN: &dyn TextPattern = &text_pattern!(
    "ORG_UNIT_CODE() + \"-\" + CURRENT_DATE(yyyy) + \"-\" + RANDOM(XX##) + SEQUENTIAL(###)"
);

fn print_pattern(pattern: &dyn TextPattern) {
    for (index, segment) in pattern.segments().iter().enumerate() {
        println!(
            "  {index}: {:<13} {:<20} {:?}",
            segment.kind(),
            segment.raw_text(),
            segment.parameter()
        );
    }
}

fn main() {
    env_logger::init();

    println!("Compile time pattern {}", ATTRIBUTE_PATTERN.expression());
    print_pattern(ATTRIBUTE_PATTERN);

    let values = ["OU_559", "-", "2026", "-", "AB12", "007"];
    match validate_values(ATTRIBUTE_PATTERN, &values) {
        Ok(()) => println!("Value {} matches the pattern", values.concat()),
        Err(error) => println!("Value {} does not match: {error}", values.concat()),
    }

    for expression in env::args().skip(1) {
        match compiler::parse_pattern(&expression) {
            Ok(pattern) => {
                println!("Pattern {expression}");
                print_pattern(&pattern);
            }
            Err(error) => {
                log::error!("invalid pattern {expression:?}: {error}");
                println!("{expression}");
                println!("{}^ {}", " ".repeat(error.offset()), error.inner());
            }
        }
    }
}
