// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Fuzz target for single-line event decoding

#![no_main]

use libfuzzer_sys::fuzz_target;

use testtint_events::decode_line;

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes, including invalid UTF-8, must never panic
    let _ = decode_line(data);
});
