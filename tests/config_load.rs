use broadq::config::load_config;
use broadq::Config;

#[test]
fn load_config_matches_toml() {
    let cfg: Config = load_config("broadq.toml").expect("failed to load config");

    assert_eq!(cfg.server.bind_addr, "127.0.0.1:8080");
    assert_eq!(cfg.server.request_timeout_ms, 5000);

    assert_eq!(cfg.queues.len(), 2);
    assert_eq!(cfg.queues[0].name, "orders");
    assert_eq!(cfg.queues[0].max_length, 100);
    assert_eq!(cfg.queues[0].max_subscribers, 10);
    assert_eq!(cfg.queues[1].name, "notifications");
    assert_eq!(cfg.queues[1].max_length, 500);
    assert_eq!(cfg.queues[1].max_subscribers, 25);
}

#[test]
fn queues_section_is_optional() {
    let cfg: Config = toml::from_str(
        r#"
        [server]
        bind_addr = "127.0.0.1:0"
        request_timeout_ms = 1000
        "#,
    )
    .expect("failed to parse config");

    assert!(cfg.queues.is_empty());
}
