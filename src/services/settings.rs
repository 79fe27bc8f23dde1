use crate::constants::{env, network};
use std::time::Duration;

/// Runtime knobs read from the environment once per invocation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    pub connect_timeout: Duration,
    pub keepalive_secs: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_millis(network::TIMEOUT_SSH_READY_MS),
            keepalive_secs: network::KEEPALIVE_INTERVAL_SECS,
        }
    }
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let connect_timeout = read_positive_u64(lookup(env::CONNECT_TIMEOUT_MS))
            .map(Duration::from_millis)
            .unwrap_or(defaults.connect_timeout);
        let keepalive_secs = read_positive_u64(lookup(env::KEEPALIVE_SECS))
            .and_then(|v| u32::try_from(v).ok())
            .unwrap_or(defaults.keepalive_secs);
        Self {
            connect_timeout,
            keepalive_secs,
        }
    }
}

fn read_positive_u64(raw: Option<String>) -> Option<u64> {
    raw?.trim().parse::<u64>().ok().filter(|v| *v > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn overrides_from_lookup() {
        let vars = HashMap::from([
            (env::CONNECT_TIMEOUT_MS, "2500"),
            (env::KEEPALIVE_SECS, "5"),
        ]);
        let settings = Settings::from_lookup(|key| vars.get(key).map(|v| v.to_string()));
        assert_eq!(settings.connect_timeout, Duration::from_millis(2500));
        assert_eq!(settings.keepalive_secs, 5);
    }

    #[test]
    fn invalid_values_fall_back() {
        let vars = HashMap::from([(env::CONNECT_TIMEOUT_MS, "0"), (env::KEEPALIVE_SECS, "soon")]);
        let settings = Settings::from_lookup(|key| vars.get(key).map(|v| v.to_string()));
        assert_eq!(settings, Settings::default());
    }
}
