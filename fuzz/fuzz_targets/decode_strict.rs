#![no_main]

use libfuzzer_sys::fuzz_target;
use mssql_rowset::{Decoder, DecoderConfig};

fuzz_target!(|data: &[u8]| {
    let strict = Decoder::new(DecoderConfig::untrusted());
    let lossy = Decoder::new(DecoderConfig::untrusted().strict_utf8(false));

    // Strict acceptance implies lossy acceptance of the same shape.
    if let Ok(result) = strict.decode(data) {
        let relaxed = lossy.decode(data).expect("lossy decoder rejected strict input");
        assert_eq!(relaxed.columns(), result.columns());
        assert_eq!(relaxed.row_count(), result.row_count());
    }
});
