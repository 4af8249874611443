//! Items pushed to the platform repositories.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Repository that receives normalized users.
pub const USERS_ITEM_TYPE: &str = "users";
/// Repository that receives normalized tasks.
pub const TASKS_ITEM_TYPE: &str = "tasks";
/// Repository that receives the External Metadata Document.
pub const METADATA_ITEM_TYPE: &str = "external_domain_metadata";

/// A source record in the platform's normalized envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedItem {
    /// Source identifier.
    pub id: String,
    /// Creation time, when the source reported a parsable one.
    pub created_date: Option<DateTime<Utc>>,
    /// Last modification time, when the source reported a parsable one.
    pub modified_date: Option<DateTime<Utc>>,
    /// Field values keyed by external field name.
    pub data: Value,
}

/// One sync unit offered to the platform after discovery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalSyncUnit {
    /// Project identifier.
    pub id: String,
    /// Project title.
    pub name: String,
    /// Project description.
    pub description: String,
    /// Number of tasks in the project.
    pub item_count: usize,
    /// Record type extracted from the unit.
    pub item_type: String,
}
