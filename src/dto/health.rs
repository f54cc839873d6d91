use serde::Serialize;
use utoipa::ToSchema;

/// Whether the service can currently save and load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum StorageStatus {
    /// The SQLite file is installed and answered a count query.
    Ok,
    /// No store is installed, or the installed one failed to answer.
    Degraded,
}

/// Body of `GET /healthcheck`.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Storage status; saves and loads answer 503 while degraded.
    pub status: StorageStatus,
    /// Number of snapshots stored so far, present only when storage answered.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub records: Option<u64>,
}

impl HealthResponse {
    /// Storage answered with `records` stored snapshots.
    pub fn ok(records: u64) -> Self {
        Self {
            status: StorageStatus::Ok,
            records: Some(records),
        }
    }

    /// Storage is missing or unreachable.
    pub fn degraded() -> Self {
        Self {
            status: StorageStatus::Degraded,
            records: None,
        }
    }
}
