//! Unit tests for the builder DSL and the generated-file controller.

mod builder_tests;
