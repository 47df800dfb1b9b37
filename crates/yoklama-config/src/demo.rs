use std::time::Duration;

use crate::env::{flag_or, parsed_or, string_or};

/// Demo-mode authentication and simulated backend latencies.
#[derive(Clone, Debug)]
pub struct DemoConfig {
    /// Unknown emails are provisioned as demo teachers on first login
    pub demo_mode: bool,
    /// Delay applied to login and registration
    pub latency: Duration,
    /// Delay before a report job starts producing its result
    pub report_delay: Duration,
    pub demo_email: String,
    pub demo_password: String,
    /// bcrypt cost for stored passwords
    pub bcrypt_cost: u32,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            demo_mode: true,
            latency: Duration::from_millis(800),
            report_delay: Duration::from_millis(1500),
            demo_email: "ogretmen@okul.edu.tr".to_string(),
            demo_password: "demo123".to_string(),
            bcrypt_cost: 10,
        }
    }
}

impl DemoConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            demo_mode: flag_or("DEMO_MODE", defaults.demo_mode),
            latency: Duration::from_millis(parsed_or("DEMO_LATENCY_MS", 800)),
            report_delay: Duration::from_millis(parsed_or("REPORT_DELAY_MS", 1500)),
            demo_email: string_or("DEMO_EMAIL", &defaults.demo_email),
            demo_password: string_or("DEMO_PASSWORD", &defaults.demo_password),
            bcrypt_cost: parsed_or("BCRYPT_COST", defaults.bcrypt_cost),
        }
    }
}
