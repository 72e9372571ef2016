//! Unit tests for the codelock codecs.
