#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Parse → serialize → parse must not panic, and the second parse
        // must succeed on our own output.
        if let Ok(invoice) = ksef_fa::fa::parse_fa_xml(s) {
            if let Ok(xml) = ksef_fa::fa::write_fa_xml(&invoice) {
                assert!(ksef_fa::fa::parse_fa_xml(&xml).is_ok());
            }
        }
    }
});
