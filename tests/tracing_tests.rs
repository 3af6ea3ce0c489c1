use tracing::Level;

#[test]
fn rust_log_overrides_default_level() {
    std::env::set_var("RUST_LOG", "income_core=debug");

    income_core::utils::init_tracing();

    assert!(tracing::enabled!(target: "income_core", Level::DEBUG));
    assert!(!tracing::enabled!(target: "income_core", Level::TRACE));
}
