//! In-memory source API serving fixtures.

use crate::extraction::domain::SourceCredentials;
use crate::worker::{
    domain::{SourceContact, SourceProject, SourceTask, SpaceMember},
    ports::{SourceApiClient, SourceApiError, SourceApiResult},
};
use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, RwLock};

/// Source API operations, used to inject failures and inspect calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SourceCall {
    /// [`SourceApiClient::list_projects`].
    ListProjects,
    /// [`SourceApiClient::list_tasks`].
    ListTasks,
    /// [`SourceApiClient::list_space_members`].
    ListSpaceMembers,
    /// [`SourceApiClient::list_contacts`].
    ListContacts,
}

/// Fixture-backed source API for one space.
#[derive(Debug, Clone)]
pub struct InMemorySourceApi {
    space_id: String,
    api_key: String,
    projects: Vec<SourceProject>,
    tasks: HashMap<String, Vec<SourceTask>>,
    members: Vec<SpaceMember>,
    contacts: HashMap<String, SourceContact>,
    failures: BTreeMap<SourceCall, SourceApiError>,
    calls: Arc<RwLock<Vec<SourceCall>>>,
}

impl InMemorySourceApi {
    /// Creates an empty space reachable with `api_key`.
    #[must_use]
    pub fn new(space_id: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            space_id: space_id.into(),
            api_key: api_key.into(),
            projects: Vec::new(),
            tasks: HashMap::new(),
            members: Vec::new(),
            contacts: HashMap::new(),
            failures: BTreeMap::new(),
            calls: Arc::default(),
        }
    }

    /// Adds a project and its tasks.
    #[must_use]
    pub fn with_project(mut self, project: SourceProject, tasks: Vec<SourceTask>) -> Self {
        self.tasks.insert(project.id.clone(), tasks);
        self.projects.push(project);
        self
    }

    /// Adds a contact as a member of the space.
    #[must_use]
    pub fn with_member(mut self, contact: SourceContact) -> Self {
        self.members.push(SpaceMember {
            id: contact.id.clone(),
            role: None,
        });
        self.contacts.insert(contact.id.clone(), contact);
        self
    }

    /// Makes every later `call` fail with `error`.
    #[must_use]
    pub fn failing(mut self, call: SourceCall, error: SourceApiError) -> Self {
        self.failures.insert(call, error);
        self
    }

    /// Returns the calls made so far, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<SourceCall> {
        self.calls
            .read()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }

    fn begin(&self, call: SourceCall, credentials: &SourceCredentials) -> SourceApiResult<()> {
        self.calls
            .write()
            .map_err(|err| SourceApiError::network(std::io::Error::other(err.to_string())))?
            .push(call);
        if let Some(err) = self.failures.get(&call) {
            return Err(err.clone());
        }
        if credentials.api_key() != self.api_key {
            return Err(SourceApiError::from_status(401, "invalid API key"));
        }
        if credentials.space_id() != self.space_id {
            return Err(SourceApiError::from_status(
                404,
                format!("space {} not found", credentials.space_id()),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl SourceApiClient for InMemorySourceApi {
    async fn list_projects(
        &self,
        credentials: &SourceCredentials,
    ) -> SourceApiResult<Vec<SourceProject>> {
        self.begin(SourceCall::ListProjects, credentials)?;
        Ok(self.projects.clone())
    }

    async fn list_tasks(
        &self,
        credentials: &SourceCredentials,
        project_id: &str,
    ) -> SourceApiResult<Vec<SourceTask>> {
        self.begin(SourceCall::ListTasks, credentials)?;
        self.tasks
            .get(project_id)
            .cloned()
            .ok_or_else(|| SourceApiError::from_status(404, format!("project {project_id} not found")))
    }

    async fn list_space_members(
        &self,
        credentials: &SourceCredentials,
    ) -> SourceApiResult<Vec<SpaceMember>> {
        self.begin(SourceCall::ListSpaceMembers, credentials)?;
        Ok(self.members.clone())
    }

    async fn list_contacts(
        &self,
        credentials: &SourceCredentials,
        contact_ids: &[String],
    ) -> SourceApiResult<Vec<SourceContact>> {
        self.begin(SourceCall::ListContacts, credentials)?;
        Ok(contact_ids
            .iter()
            .filter_map(|id| self.contacts.get(id).cloned())
            .collect())
    }
}
