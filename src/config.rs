use dotenvy::dotenv;
use once_cell::sync::Lazy;
use std::env;
use std::str::FromStr;
use std::time::Duration;

pub static CONFIG: Lazy<Config> = Lazy::new(|| {
    dotenv().ok(); // Load .env file if present
    Config {
        elasticsearch_host: get_env_or_default("ELASTICSEARCH_HOST", "http://elasticsearch:9200"),
        elasticsearch_index: get_env_or_default("ELASTICSEARCH_INDEX", "korea-policy-news-*"),
        port: get_env_parsed_or_default("PORT", 3000),
        engine_timeout: Duration::from_secs(get_env_parsed_or_default("ENGINE_TIMEOUT_SECS", 10)),
        static_dir: get_env_or_default("STATIC_DIR", "static"),
    }
});

#[derive(Debug, Clone)]
pub struct Config {
    pub elasticsearch_host: String,
    pub elasticsearch_index: String,
    pub port: u16,
    /// Upper bound on a single engine round trip.
    pub engine_timeout: Duration,
    pub static_dir: String,
}

fn get_env_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn get_env_parsed_or_default<T>(key: &str, default: T) -> T
where
    T: FromStr + Copy + std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => parse_or_default(key, &raw, default),
        Err(_) => default,
    }
}

fn parse_or_default<T>(key: &str, raw: &str, default: T) -> T
where
    T: FromStr + Copy + std::fmt::Display,
{
    raw.trim().parse().unwrap_or_else(|_| {
        log::warn!("Invalid value {raw:?} for {key}, falling back to {default}");
        default
    })
}
