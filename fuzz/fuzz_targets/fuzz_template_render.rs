#![no_main]

use libfuzzer_sys::fuzz_target;
use remote_failure::template;

fuzz_target!(|input: (&str, Vec<&str>)| {
    let (template_text, args) = input;
    let _ = template::render(template_text, &args);
});
