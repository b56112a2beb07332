//! Cross-module store tests
