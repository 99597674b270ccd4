// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Fuzz target for the streaming event reader

#![no_main]

use libfuzzer_sys::fuzz_target;

use testtint_events::EventReader;

fuzz_target!(|data: &[u8]| {
    let mut reader = EventReader::new(data);
    for event in reader.by_ref() {
        // Reading from memory never fails, so every item is an event
        assert!(event.is_ok());
    }

    let stats = reader.stats();
    assert!(stats.blank + stats.malformed <= stats.lines);
});
