//! Records as returned by the source work-management API.
//!
//! Everything except identifiers is optional; defaults are applied by the
//! normalizers, not here.

use serde::{Deserialize, Serialize};

/// A project (sync unit) in a space.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceProject {
    /// Project identifier.
    pub id: String,
    /// Project title.
    #[serde(default)]
    pub title: Option<String>,
    /// Free-form description.
    #[serde(default)]
    pub description: Option<String>,
    /// Project status.
    #[serde(default)]
    pub status: Option<String>,
    /// Creation timestamp as sent by the API.
    #[serde(default)]
    pub created_date: Option<String>,
    /// Last update timestamp as sent by the API.
    #[serde(default)]
    pub updated_date: Option<String>,
}

/// A task inside a project.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceTask {
    /// Task identifier.
    pub id: String,
    /// Task title.
    #[serde(default)]
    pub title: Option<String>,
    /// Plain-text description.
    #[serde(default)]
    pub description: Option<String>,
    /// Task status.
    #[serde(default)]
    pub status: Option<String>,
    /// Task importance.
    #[serde(default)]
    pub importance: Option<String>,
    /// Contact identifiers of the assignees.
    #[serde(default)]
    pub responsible_ids: Option<Vec<String>>,
    /// Link to the task in the source UI.
    #[serde(default)]
    pub permalink: Option<String>,
    /// Creation timestamp as sent by the API.
    #[serde(default)]
    pub created_date: Option<String>,
    /// Last update timestamp as sent by the API.
    #[serde(default)]
    pub updated_date: Option<String>,
}

/// Membership of a contact in a space.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpaceMember {
    /// Contact identifier of the member.
    pub id: String,
    /// Role inside the space.
    #[serde(default)]
    pub role: Option<String>,
}

/// A person known to the source system.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceContact {
    /// Contact identifier.
    pub id: String,
    /// Given name.
    #[serde(default)]
    pub first_name: Option<String>,
    /// Family name.
    #[serde(default)]
    pub last_name: Option<String>,
    /// Primary e-mail address.
    #[serde(default)]
    pub email: Option<String>,
    /// Creation timestamp as sent by the API.
    #[serde(default)]
    pub created_date: Option<String>,
    /// Last update timestamp as sent by the API.
    #[serde(default)]
    pub updated_date: Option<String>,
}
