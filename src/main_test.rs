use super::*;

fn config() -> ClientConfig {
    ClientConfig::new("http://127.0.0.1:8000", "").unwrap()
}

#[test]
fn flags_override_env_config() {
    let cli = Cli::parse_from([
        "gym-client",
        "--base-url",
        "https://gym.example/",
        "--api-prefix",
        "api",
        "--request-timeout-secs",
        "30",
        "routes",
    ]);
    let cfg = apply_overrides(config(), &cli).unwrap();
    assert_eq!(cfg.base_url, "https://gym.example");
    assert_eq!(cfg.api_prefix, "/api");
    assert_eq!(cfg.timeouts, Timeouts { request_secs: 30, connect_secs: config().timeouts.connect_secs });
}

#[test]
fn absent_flags_keep_env_config() {
    let cli = Cli::parse_from(["gym-client", "routes"]);
    assert_eq!(apply_overrides(config(), &cli).unwrap(), config());
}

#[test]
fn zero_timeout_flag_is_rejected() {
    let parsed = Cli::try_parse_from(["gym-client", "--connect-timeout-secs", "0", "routes"]);
    assert!(parsed.is_err());
}

#[test]
fn param_requires_key_value() {
    assert_eq!(parse_param("page=2").unwrap(), ("page".to_owned(), "2".to_owned()));
    assert!(parse_param("page").is_err());
}
