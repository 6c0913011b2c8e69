// config.rs - Command line and environment configuration for the services

use clap::{Parser, ValueEnum};
use store::TokenSettings;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Service {
    Users,
    Orders,
    All,
}

impl Service {
    pub fn runs_users(self) -> bool {
        matches!(self, Service::Users | Service::All)
    }

    pub fn runs_orders(self) -> bool {
        matches!(self, Service::Orders | Service::All)
    }
}

#[derive(Parser, Debug, Clone)]
#[command(name = "mock-services", about = "Mock Users and Orders services with bearer token auth")]
pub struct Args {
    /// Which service(s) to run
    #[arg(long, env = "SERVICE", value_enum, default_value = "all")]
    pub service: Service,
    /// Address both services bind to
    #[arg(long, env = "HOST", default_value = "127.0.0.1")]
    pub host: String,
    #[arg(long, env = "USERS_PORT", default_value_t = 3001)]
    pub users_port: u16,
    #[arg(long, env = "ORDERS_PORT", default_value_t = 3002)]
    pub orders_port: u16,
    /// Lifetime reported for issued access tokens, in seconds
    #[arg(long, env = "TOKEN_TTL_SECONDS", default_value_t = store::tokens::model::DEFAULT_TTL_SECONDS)]
    pub token_ttl: u64,
    #[arg(long, env = "ACCESS_TOKEN_PREFIX", default_value = store::tokens::model::DEFAULT_ACCESS_PREFIX)]
    pub access_prefix: String,
    #[arg(long, env = "REFRESH_TOKEN_PREFIX", default_value = store::tokens::model::DEFAULT_REFRESH_PREFIX)]
    pub refresh_prefix: String,
}

impl Args {
    // Each service builds its own token service from these, they never share pairs
    pub fn token_settings(&self) -> TokenSettings {
        TokenSettings {
            ttl_seconds: self.token_ttl,
            access_prefix: self.access_prefix.clone(),
            refresh_prefix: self.refresh_prefix.clone(),
        }
    }
}
