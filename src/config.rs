use dotenvy::dotenv;
use once_cell::sync::Lazy;
use std::env;

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_TEXT_WIDTH: usize = 80;
const MIN_TEXT_WIDTH: usize = 20;

pub static CONFIG: Lazy<Config> = Lazy::new(|| {
    dotenv().ok(); // Load .env file if present
    Config {
        api_url: get_env_or_default("HEADLINES_API_URL", DEFAULT_API_URL),
        text_width: parse_text_width(env::var("HEADLINES_TEXT_WIDTH").ok().as_deref()),
    }
});

#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    pub text_width: usize,
}

fn get_env_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_text_width(raw: Option<&str>) -> usize {
    match raw.map(str::trim).map(str::parse::<usize>) {
        Some(Ok(width)) => width.max(MIN_TEXT_WIDTH),
        Some(Err(_)) => {
            log::warn!("ignoring invalid HEADLINES_TEXT_WIDTH, using {DEFAULT_TEXT_WIDTH}");
            DEFAULT_TEXT_WIDTH
        }
        None => DEFAULT_TEXT_WIDTH,
    }
}
