use digestbot::setup_logging;

#[test]
fn logging_setup_does_not_panic() {
    let result = std::panic::catch_unwind(|| {
        setup_logging();
    });

    assert!(result.is_ok(), "setup_logging should not panic");
}
