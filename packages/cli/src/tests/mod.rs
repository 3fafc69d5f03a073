mod config_tests;
mod tracing_tests;
