#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    argexpand::fuzz_resolve_bytes(data);
});
