use std::net::SocketAddr;

/// Application-level constants
pub const APP_NAME: &str = "Cardiolens";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Environment variable holding the prediction service credential.
/// Absence surfaces as a prediction failure at call time, not at startup.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Optional endpoint override, mainly for tests against a local stub.
pub const BASE_URL_ENV: &str = "GEMINI_BASE_URL";

/// Optional bind address override for the local HTTP surface.
pub const ADDR_ENV: &str = "CARDIOLENS_ADDR";

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_ADDR: &str = "127.0.0.1:8787";

/// Log filter used when RUST_LOG is not set.
pub fn default_log_filter() -> String {
    format!("info,{}=debug", env!("CARGO_PKG_NAME"))
}

/// The address to bind the local HTTP surface to.
pub fn bind_addr() -> SocketAddr {
    std::env::var(ADDR_ENV)
        .ok()
        .and_then(|raw| raw.parse().ok())
        .unwrap_or_else(|| {
            DEFAULT_ADDR
                .parse()
                .expect("default bind address is well-formed")
        })
}
