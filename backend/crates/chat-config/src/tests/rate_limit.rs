use crate::{Config, ConfigSection};
use crate::tests::{EnvGuard, setup_config_dir};

use googletest::assert_that;
use googletest::prelude::{anything, eq, err};
use serial_test::serial;

#[test]
#[serial]
fn given_rate_limit_env_when_load_then_overrides_defaults() {
    let _temp = setup_config_dir();
    let _max = EnvGuard::set("CHAT_RATE_LIMIT_MAX_REQUESTS", "20");
    let _window = EnvGuard::set("CHAT_RATE_LIMIT_WINDOW_SECS", "10");

    let config = Config::load().unwrap();

    assert_that!(config.rate_limit.max_requests, eq(20));
    assert_that!(config.rate_limit.window_secs, eq(10));
}

#[test]
#[serial]
fn given_zero_max_requests_when_validate_then_error() {
    let _temp = setup_config_dir();
    let _max = EnvGuard::set("CHAT_RATE_LIMIT_MAX_REQUESTS", "0");

    let config = Config::load().unwrap();

    assert_that!(config.validate(), err(anything()));
}

#[test]
#[serial]
fn given_window_over_an_hour_when_validate_then_error() {
    let _temp = setup_config_dir();
    let _window = EnvGuard::set("CHAT_RATE_LIMIT_WINDOW_SECS", "3601");

    let config = Config::load().unwrap();

    assert_that!(config.validate(), err(anything()));
}

#[test]
#[serial]
fn given_window_out_of_range_when_validate_then_error_is_rate_limit_section() {
    // Given
    let _temp = setup_config_dir();
    let _window = EnvGuard::set("CHAT_RATE_LIMIT_WINDOW_SECS", "7200");

    // When
    let error = Config::load().unwrap().validate().unwrap_err();

    // Then
    assert_eq!(error.section(), Some(ConfigSection::RateLimit));
    assert!(error.to_string().contains("rate_limit.window_secs"));
}
