#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Best-effort entry point must swallow every failure.
    let _ = ksef_fa::fa::from_bytes(data);
});
