// Integration tests live in tests/; nothing is exported from this crate.
