use std::env;
use std::sync::{Mutex, OnceLock};

use rosrustext_tf2::config::{
    BufferClientConfig, DEFAULT_ACTION_NAMESPACE, ENV_ACTION_NAMESPACE, ENV_DEFAULT_TIMEOUT,
};
use rosrustext_tf2::Duration;

fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    LOCK.get_or_init(|| Mutex::new(())).lock().expect("lock")
}

#[test]
fn env_overrides_namespace_and_timeout() {
    let _guard = env_lock();
    env::set_var(ENV_ACTION_NAMESPACE, "/robot2/tf2_buffer_server");
    env::set_var(ENV_DEFAULT_TIMEOUT, "1.5");

    let config = BufferClientConfig::from_env();
    assert_eq!(config.action_namespace, "/robot2/tf2_buffer_server");
    assert_eq!(config.default_timeout, Duration::new(1, 500_000_000));

    env::remove_var(ENV_ACTION_NAMESPACE);
    env::remove_var(ENV_DEFAULT_TIMEOUT);
}

#[test]
fn unset_env_keeps_defaults() {
    let _guard = env_lock();
    env::remove_var(ENV_ACTION_NAMESPACE);
    env::remove_var(ENV_DEFAULT_TIMEOUT);

    let config = BufferClientConfig::from_env();
    assert_eq!(config.action_namespace, DEFAULT_ACTION_NAMESPACE);
    assert!(config.default_timeout.is_zero());
}
