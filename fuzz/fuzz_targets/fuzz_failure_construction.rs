#![no_main]

use libfuzzer_sys::fuzz_target;
use remote_failure::{ErrorFormatter, Failure, StaticCatalog};

// Input layout: template, then tokens, separated by NUL bytes.
fuzz_target!(|data: &str| {
    let mut parts = data.split('\0');
    let template = parts.next().unwrap_or_default();
    let tokens: Vec<&str> = parts.collect();

    let mut catalog = StaticCatalog::new();
    if let Some(code) = tokens.first() {
        catalog.insert(*code, template);
    }
    let formatter = ErrorFormatter::with_catalog(&catalog);
    let failure = Failure::with_formatter(tokens.iter().copied(), &formatter);

    assert_eq!(failure.message().is_none(), tokens.is_empty());
    let mut line = String::new();
    let _ = failure.log_entry().write_to(&mut line);
});
