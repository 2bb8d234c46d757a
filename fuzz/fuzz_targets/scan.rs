#![no_main]

use libfuzzer_sys::fuzz_target;

use clockscan::{scan, Locale, ScanEnv, ScanOptions};

fuzz_target!(|data: (&str, &str, bool, bool)| {
    let (format, input, strict, extended) = data;
    let locale = Locale::english();
    let env = ScanEnv::new(&locale);
    let opts = ScanOptions {
        strict,
        extended,
        validate: false,
    };
    let _ = scan(format, input, &opts, &env);
});
