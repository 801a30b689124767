use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use crate::services::routing::RouteClientConfig;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_port")]
    pub port: u16,

    // Local CSV with NAME, LATITUDE and LONGITUDE columns
    #[serde(default = "default_hospital_file")]
    pub hospital_file: PathBuf,

    // OpenRouteService API key
    #[serde(default)]
    pub api_key: String,

    #[serde(default = "default_routing_url")]
    pub routing_url: String,

    #[serde(default = "default_routing_profile")]
    pub routing_profile: String,

    #[serde(default = "default_routing_timeout_secs")]
    pub routing_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self, envy::Error> {
        envy::from_env::<Config>()
    }

    pub fn route_client_config(&self) -> RouteClientConfig {
        RouteClientConfig {
            base_url: self.routing_url.clone(),
            api_key: self.api_key.clone(),
            profile: self.routing_profile.clone(),
            timeout: Duration::from_secs(self.routing_timeout_secs),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: default_port(),
            hospital_file: default_hospital_file(),
            api_key: String::new(), // Must be provided via environment
            routing_url: default_routing_url(),
            routing_profile: default_routing_profile(),
            routing_timeout_secs: default_routing_timeout_secs(),
        }
    }
}

fn default_port() -> u16 {
    3000
}

fn default_hospital_file() -> PathBuf {
    PathBuf::from("data/us_hospital_locations.csv")
}

fn default_routing_url() -> String {
    "https://api.openrouteservice.org".to_string()
}

fn default_routing_profile() -> String {
    "driving-car".to_string()
}

fn default_routing_timeout_secs() -> u64 {
    15
}
