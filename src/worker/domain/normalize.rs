//! Conversion of source records into [`NormalizedItem`]s.

use super::{NormalizedItem, SourceContact, SourceProject, SourceTask};
use chrono::{DateTime, Utc};
use serde_json::json;

const DEFAULT_STATUS: &str = "Active";
const DEFAULT_IMPORTANCE: &str = "Normal";

/// Parses an RFC 3339 timestamp; anything unparsable is dropped.
#[must_use]
pub fn parse_timestamp(raw: Option<&str>) -> Option<DateTime<Utc>> {
    raw.and_then(|value| DateTime::parse_from_rfc3339(value.trim()).ok())
        .map(|timestamp| timestamp.with_timezone(&Utc))
}

/// Normalizes a project.
#[must_use]
pub fn normalize_project(project: &SourceProject) -> NormalizedItem {
    NormalizedItem {
        id: project.id.clone(),
        created_date: parse_timestamp(project.created_date.as_deref()),
        modified_date: parse_timestamp(project.updated_date.as_deref()),
        data: json!({
            "title": project.title.as_deref().unwrap_or_default(),
            "description": project.description.as_deref().unwrap_or_default(),
            "status": project.status.as_deref().unwrap_or("active"),
        }),
    }
}

/// Normalizes a task. The description becomes a rich-text array.
#[must_use]
pub fn normalize_task(task: &SourceTask) -> NormalizedItem {
    NormalizedItem {
        id: task.id.clone(),
        created_date: parse_timestamp(task.created_date.as_deref()),
        modified_date: parse_timestamp(task.updated_date.as_deref()),
        data: json!({
            "title": task.title.as_deref().unwrap_or_default(),
            "description": [task.description.as_deref().unwrap_or_default()],
            "status": task.status.as_deref().unwrap_or(DEFAULT_STATUS),
            "importance": task.importance.as_deref().unwrap_or(DEFAULT_IMPORTANCE),
            "responsible_ids": task.responsible_ids.clone().unwrap_or_default(),
            "item_url_field": task.permalink,
        }),
    }
}

/// Normalizes a contact into a user record.
#[must_use]
pub fn normalize_contact(contact: &SourceContact) -> NormalizedItem {
    let full_name = [contact.first_name.as_deref(), contact.last_name.as_deref()]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    NormalizedItem {
        id: contact.id.clone(),
        created_date: parse_timestamp(contact.created_date.as_deref()),
        modified_date: parse_timestamp(contact.updated_date.as_deref()),
        data: json!({
            "full_name": full_name,
            "email": contact.email,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::Value;

    #[rstest]
    #[case(Some("2024-03-01T10:00:00Z"), true)]
    #[case(Some("2024-03-01T12:00:00+02:00"), true)]
    #[case(Some("yesterday"), false)]
    #[case(Some(""), false)]
    #[case(None, false)]
    fn timestamps_parse_as_rfc3339(#[case] raw: Option<&str>, #[case] parsed: bool) {
        assert_eq!(parse_timestamp(raw).is_some(), parsed);
    }

    #[rstest]
    fn offsets_are_converted_to_utc() {
        let parsed = parse_timestamp(Some("2024-03-01T12:00:00+02:00"));
        assert_eq!(
            parsed.map(|timestamp| timestamp.to_rfc3339()),
            Some("2024-03-01T10:00:00+00:00".to_owned())
        );
    }

    #[rstest]
    fn bare_task_gets_defaults() {
        let item = normalize_task(&SourceTask {
            id: "T1".to_owned(),
            ..SourceTask::default()
        });

        assert_eq!(item.id, "T1");
        assert_eq!(item.created_date, None);
        assert_eq!(
            item.data,
            json!({
                "title": "",
                "description": [""],
                "status": "Active",
                "importance": "Normal",
                "responsible_ids": [],
                "item_url_field": Value::Null,
            })
        );
    }

    #[rstest]
    fn task_fields_are_carried() {
        let item = normalize_task(&SourceTask {
            id: "T2".to_owned(),
            title: Some("Ship it".to_owned()),
            description: Some("Release notes".to_owned()),
            status: Some("Completed".to_owned()),
            importance: Some("High".to_owned()),
            responsible_ids: Some(vec!["C1".to_owned(), "C2".to_owned()]),
            permalink: Some("https://example.test/T2".to_owned()),
            created_date: Some("2024-01-01T00:00:00Z".to_owned()),
            updated_date: Some("not a date".to_owned()),
        });

        assert_eq!(item.data["description"], json!(["Release notes"]));
        assert_eq!(item.data["responsible_ids"], json!(["C1", "C2"]));
        assert_eq!(item.data["status"], "Completed");
        assert!(item.created_date.is_some());
        assert_eq!(item.modified_date, None);
    }

    #[rstest]
    fn project_defaults_status_and_description() {
        let item = normalize_project(&SourceProject {
            id: "P1".to_owned(),
            title: Some("Roadmap".to_owned()),
            ..SourceProject::default()
        });
        assert_eq!(
            item.data,
            json!({"title": "Roadmap", "description": "", "status": "active"})
        );
    }

    #[rstest]
    #[case(Some("Ada"), Some("Lovelace"), "Ada Lovelace")]
    #[case(Some("Ada"), None, "Ada")]
    #[case(None, Some(" Lovelace "), "Lovelace")]
    #[case(None, None, "")]
    fn contact_full_name_joins_present_parts(
        #[case] first_name: Option<&str>,
        #[case] last_name: Option<&str>,
        #[case] expected: &str,
    ) {
        let item = normalize_contact(&SourceContact {
            id: "C1".to_owned(),
            first_name: first_name.map(str::to_owned),
            last_name: last_name.map(str::to_owned),
            ..SourceContact::default()
        });
        assert_eq!(item.data["full_name"], expected);
        assert_eq!(item.data["email"], Value::Null);
    }
}
