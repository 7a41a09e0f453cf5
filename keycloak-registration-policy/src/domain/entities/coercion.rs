//! Conversion between declarative single-valued config and the admin API's
//! multi-valued config.
//!
//! Only [`TRUSTED_HOSTS_KEY`] carries more than one value. Its declarative form
//! is a comma separated string, so a single host that itself contains a comma
//! cannot survive a round trip. That ambiguity is accepted.

use super::common::{ConfigValues, FlatConfig};

/// Config key whose declarative value is a comma separated list
pub const TRUSTED_HOSTS_KEY: &str = "trusted-hosts";

/// Expand declarative config into the admin API representation.
///
/// `trusted-hosts` values containing a comma are split and each piece is
/// trimmed. Every other entry becomes a one-element sequence, commas included.
pub fn expand(config: &FlatConfig) -> ConfigValues {
    config
        .iter()
        .map(|(key, value)| {
            let values = if key == TRUSTED_HOSTS_KEY && value.contains(',') {
                value.split(',').map(|v| v.trim().to_string()).collect()
            } else {
                vec![value.clone()]
            };
            (key.clone(), values)
        })
        .collect()
}

/// Collapse admin API config into the declarative representation.
///
/// `trusted-hosts` with several values is joined with `,`; otherwise the first
/// value wins. Keys with no values are dropped.
pub fn collapse(config: &ConfigValues) -> FlatConfig {
    config
        .iter()
        .filter_map(|(key, values)| {
            let first = values.first()?;
            let value = if key == TRUSTED_HOSTS_KEY && values.len() > 1 {
                values.join(",")
            } else {
                first.clone()
            };
            Some((key.clone(), value))
        })
        .collect()
}
