use crate::models::{Metadata, OutResponse, Version};
use chrono::{DateTime, SecondsFormat, Utc};

/// Stamps a completed run. Nanosecond precision keeps back-to-back runs
/// distinct.
pub fn build_version(completed_at: DateTime<Utc>) -> Version {
    Version {
        timestamp: completed_at.to_rfc3339_opts(SecondsFormat::Nanos, true),
    }
}

pub fn build_out_response(completed_at: DateTime<Utc>) -> OutResponse {
    OutResponse {
        version: build_version(completed_at),
        metadata: Vec::<Metadata>::new(),
    }
}
