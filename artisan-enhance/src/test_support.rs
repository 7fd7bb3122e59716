use std::sync::Mutex;

use crate::client::{ApiClient, ClientConfig, ClientInner, HttpOptions};

static ENV_LOCK: Mutex<()> = Mutex::new(());

pub fn with_env(vars: &[(&str, Option<&str>)], f: impl FnOnce()) {
    let _guard = ENV_LOCK
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner);
    let backup: Vec<(String, Option<String>)> = vars
        .iter()
        .map(|(key, _)| ((*key).to_string(), std::env::var(key).ok()))
        .collect();
    for (key, value) in vars {
        match value {
            Some(value) => std::env::set_var(key, value),
            None => std::env::remove_var(key),
        }
    }
    f();
    for (key, value) in backup {
        match value {
            Some(value) => std::env::set_var(key, value),
            None => std::env::remove_var(key),
        }
    }
}

pub fn test_client_inner_with_base(base_url: &str, api_version: &str) -> ClientInner {
    let config = ClientConfig {
        api_key: "test-key".into(),
        http_options: HttpOptions {
            base_url: Some(base_url.to_string()),
            api_version: Some(api_version.to_string()),
            ..Default::default()
        },
    };
    let api_client = ApiClient::new(&config);
    ClientInner {
        http: reqwest::Client::new(),
        config,
        api_client,
    }
}
