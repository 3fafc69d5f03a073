use crate::init_tracing;
use serial_test::serial;
use std::env;

#[test]
#[serial]
fn test_init_tracing_reads_filter_and_tolerates_repeat_calls() {
    env::set_var("RUST_LOG", "accessgate_client=debug");
    init_tracing();
    init_tracing();
    env::remove_var("RUST_LOG");
}
