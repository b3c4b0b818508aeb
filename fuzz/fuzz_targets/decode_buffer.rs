#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Any byte string must decode or fail cleanly, never panic or
    // allocate past what the buffer could describe.
    let _ = mssql_rowset::decode(data);
});
