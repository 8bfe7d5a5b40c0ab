use chrono::{DateTime, SecondsFormat, Utc};
use rand::Rng;
use serde::Serialize;
use serde_json::{Map, Value};
use std::net::IpAddr;

use crate::validation::ValidatedSubmission;

const ID_PREFIX: &str = "APP";
const ID_SUFFIX_LEN: usize = 9;
const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Builds an id like `APP-1718000000000-k3j9x0qzt`.
///
/// Good enough to correlate log lines; not a secret and not globally unique.
pub fn generate_application_id(at: DateTime<Utc>) -> String {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..ID_SUFFIX_LEN)
        .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
        .collect();
    format!("{}-{}-{}", ID_PREFIX, at.timestamp_millis(), suffix)
}

/// What we know about an accepted application while the request is alive.
/// Nothing stores it.
#[derive(Debug, Clone)]
pub struct SubmissionRecord {
    pub id: String,
    pub data: Map<String, Value>,
    pub status: &'static str,
    pub processed_at: DateTime<Utc>,
    pub ip_address: String,
}

impl SubmissionRecord {
    pub fn received(submission: &ValidatedSubmission, peer: Option<IpAddr>) -> Self {
        let processed_at = Utc::now();
        Self {
            id: generate_application_id(processed_at),
            data: submission.raw.clone(),
            status: "received",
            processed_at,
            ip_address: peer.map_or_else(|| "unknown".to_string(), |ip| ip.to_string()),
        }
    }

    /// The subset of the record that is safe to write to logs.
    pub fn summary(&self, submission: &ValidatedSubmission) -> ApplicationSummary {
        ApplicationSummary {
            id: self.id.clone(),
            name: submission.full_name(),
            form_type: submission.form_type.clone(),
            email: submission.email.clone(),
            timestamp: self.processed_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationSummary {
    pub id: String,
    pub name: String,
    pub form_type: String,
    pub email: String,
    pub timestamp: String,
}
