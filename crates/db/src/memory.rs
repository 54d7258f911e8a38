//! In-memory [`Store`] for tests.
//!
//! Mirrors the PostgreSQL behaviour the rest of the system relies on:
//! archived rows are invisible, email and phone are unique among live
//! clients, and listing order matches the SQL `ORDER BY` clauses.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;
use clientdesk_core::status::{ClientStatus, ProjectStatus, TaskStatus};
use clientdesk_core::types::DbId;

use crate::models::client::{Client, NewClient};
use crate::models::project::{NewProject, Project};
use crate::models::task::{NewTask, Task};
use crate::store::{Store, StoreError, StoreResult};

#[derive(Debug, Default)]
struct Tables {
    next_id: DbId,
    clients: Vec<Client>,
    projects: Vec<Project>,
    tasks: Vec<Task>,
}

impl Tables {
    fn next_id(&mut self) -> DbId {
        self.next_id += 1;
        self.next_id
    }

    fn live_client(&mut self, id: DbId) -> Option<&mut Client> {
        self.clients
            .iter_mut()
            .find(|c| c.id == id && c.archived_at.is_none())
    }

    fn live_project(&mut self, id: DbId) -> Option<&mut Project> {
        self.projects
            .iter_mut()
            .find(|p| p.id == id && p.archived_at.is_none())
    }

    fn live_task(&mut self, id: DbId) -> Option<&mut Task> {
        self.tasks
            .iter_mut()
            .find(|t| t.id == id && t.archived_at.is_none())
    }

    /// Reject `input` if another live client already owns its email or phone.
    fn check_unique(&self, input: &NewClient, except: Option<DbId>) -> StoreResult<()> {
        let others = self
            .clients
            .iter()
            .filter(|c| c.archived_at.is_none() && Some(c.id) != except);
        for other in others {
            if other.email == input.email {
                return Err(StoreError::UniqueViolation {
                    field: "email".to_string(),
                });
            }
            if other.phone == input.phone {
                return Err(StoreError::UniqueViolation {
                    field: "phone".to_string(),
                });
            }
        }
        Ok(())
    }
}

/// Thread-safe in-memory store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
    outage: Mutex<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail with [`StoreError::Unavailable`]
    /// (or succeed again with `None`).
    pub fn set_outage(&self, message: Option<&str>) {
        *lock(&self.outage) = message.map(str::to_string);
    }

    /// Lock the tables, failing first if an outage is configured.
    fn tables(&self) -> StoreResult<MutexGuard<'_, Tables>> {
        if let Some(message) = lock(&self.outage).clone() {
            return Err(StoreError::Unavailable(message));
        }
        Ok(lock(&self.tables))
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    // A panicking test must not poison the store for the rest of the suite.
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Stamp `archived_at` on every live row whose id is in `ids`.
fn archive<T>(
    rows: &mut [T],
    ids: &[DbId],
    id_of: impl Fn(&T) -> DbId,
    archived_at: impl Fn(&mut T) -> &mut Option<chrono::DateTime<Utc>>,
) -> u64 {
    let now = Utc::now();
    let mut count = 0;
    for row in rows.iter_mut() {
        if ids.contains(&id_of(row)) {
            let slot = archived_at(row);
            if slot.is_none() {
                *slot = Some(now);
                count += 1;
            }
        }
    }
    count
}

#[async_trait]
impl Store for MemoryStore {
    async fn health_check(&self) -> StoreResult<()> {
        self.tables().map(|_| ())
    }

    // -- clients --

    async fn list_clients(&self) -> StoreResult<Vec<Client>> {
        let tables = self.tables()?;
        let mut clients: Vec<Client> = tables
            .clients
            .iter()
            .filter(|c| c.archived_at.is_none())
            .cloned()
            .collect();
        clients.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(clients)
    }

    async fn find_client(&self, id: DbId) -> StoreResult<Option<Client>> {
        Ok(self.tables()?.live_client(id).cloned())
    }

    async fn create_client(&self, input: &NewClient) -> StoreResult<Client> {
        let mut tables = self.tables()?;
        tables.check_unique(input, None)?;
        let now = Utc::now();
        let client = Client {
            id: tables.next_id(),
            name: input.name.clone(),
            email: input.email.clone(),
            phone: input.phone.clone(),
            website: input.website.clone(),
            status: input.status,
            notes: input.notes.clone(),
            created_at: now,
            updated_at: now,
            archived_at: None,
        };
        tables.clients.push(client.clone());
        Ok(client)
    }

    async fn update_client(&self, id: DbId, input: &NewClient) -> StoreResult<Option<Client>> {
        let mut tables = self.tables()?;
        if tables.live_client(id).is_none() {
            return Ok(None);
        }
        tables.check_unique(input, Some(id))?;
        let Some(client) = tables.live_client(id) else {
            return Ok(None);
        };
        client.name = input.name.clone();
        client.email = input.email.clone();
        client.phone = input.phone.clone();
        client.website = input.website.clone();
        client.status = input.status;
        client.notes = input.notes.clone();
        client.updated_at = Utc::now();
        Ok(Some(client.clone()))
    }

    async fn set_client_status(
        &self,
        id: DbId,
        status: ClientStatus,
    ) -> StoreResult<Option<Client>> {
        let mut tables = self.tables()?;
        Ok(tables.live_client(id).map(|client| {
            client.status = status;
            client.updated_at = Utc::now();
            client.clone()
        }))
    }

    async fn archive_clients(&self, ids: &[DbId]) -> StoreResult<u64> {
        let mut tables = self.tables()?;
        Ok(archive(
            &mut tables.clients,
            ids,
            |c| c.id,
            |c| &mut c.archived_at,
        ))
    }

    // -- projects --

    async fn list_projects(&self, client_id: DbId) -> StoreResult<Vec<Project>> {
        self.list_projects_for_clients(&[client_id]).await
    }

    async fn list_projects_for_clients(&self, client_ids: &[DbId]) -> StoreResult<Vec<Project>> {
        let tables = self.tables()?;
        let mut projects: Vec<Project> = tables
            .projects
            .iter()
            .filter(|p| p.archived_at.is_none() && client_ids.contains(&p.client_id))
            .cloned()
            .collect();
        projects.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(projects)
    }

    async fn find_project(&self, id: DbId) -> StoreResult<Option<Project>> {
        Ok(self.tables()?.live_project(id).cloned())
    }

    async fn create_project(&self, client_id: DbId, input: &NewProject) -> StoreResult<Project> {
        let mut tables = self.tables()?;
        let now = Utc::now();
        let project = Project {
            id: tables.next_id(),
            client_id,
            name: input.name.clone(),
            description: input.description.clone(),
            budget: input.budget,
            currency: Some(input.currency.clone()),
            status: input.status,
            start_date: input.start_date,
            end_date: input.end_date,
            created_at: now,
            updated_at: now,
            archived_at: None,
        };
        tables.projects.push(project.clone());
        Ok(project)
    }

    async fn update_project(
        &self,
        id: DbId,
        input: &NewProject,
    ) -> StoreResult<Option<Project>> {
        let mut tables = self.tables()?;
        Ok(tables.live_project(id).map(|project| {
            project.name = input.name.clone();
            project.description = input.description.clone();
            project.budget = input.budget;
            project.currency = Some(input.currency.clone());
            project.status = input.status;
            project.start_date = input.start_date;
            project.end_date = input.end_date;
            project.updated_at = Utc::now();
            project.clone()
        }))
    }

    async fn set_project_status(
        &self,
        id: DbId,
        status: ProjectStatus,
    ) -> StoreResult<Option<Project>> {
        let mut tables = self.tables()?;
        Ok(tables.live_project(id).map(|project| {
            project.status = status;
            project.updated_at = Utc::now();
            project.clone()
        }))
    }

    async fn archive_projects(&self, ids: &[DbId]) -> StoreResult<u64> {
        let mut tables = self.tables()?;
        Ok(archive(
            &mut tables.projects,
            ids,
            |p| p.id,
            |p| &mut p.archived_at,
        ))
    }

    // -- tasks --

    async fn list_tasks(&self, project_id: DbId) -> StoreResult<Vec<Task>> {
        let tables = self.tables()?;
        let mut tasks: Vec<Task> = tables
            .tasks
            .iter()
            .filter(|t| t.archived_at.is_none() && t.project_id == project_id)
            .cloned()
            .collect();
        tasks.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(tasks)
    }

    async fn find_task(&self, id: DbId) -> StoreResult<Option<Task>> {
        Ok(self.tables()?.live_task(id).cloned())
    }

    async fn create_task(&self, project_id: DbId, input: &NewTask) -> StoreResult<Task> {
        let mut tables = self.tables()?;
        let now = Utc::now();
        let task = Task {
            id: tables.next_id(),
            project_id,
            name: input.name.clone(),
            description: input.description.clone(),
            status: input.status,
            priority: input.priority,
            start_date: input.start_date,
            end_date: input.end_date,
            estimated_hours: input.estimated_hours,
            actual_hours: input.actual_hours,
            assignee_id: input.assignee_id,
            created_at: now,
            updated_at: now,
            archived_at: None,
        };
        tables.tasks.push(task.clone());
        Ok(task)
    }

    async fn update_task(&self, id: DbId, input: &NewTask) -> StoreResult<Option<Task>> {
        let mut tables = self.tables()?;
        Ok(tables.live_task(id).map(|task| {
            task.name = input.name.clone();
            task.description = input.description.clone();
            task.status = input.status;
            task.priority = input.priority;
            task.start_date = input.start_date;
            task.end_date = input.end_date;
            task.estimated_hours = input.estimated_hours;
            task.actual_hours = input.actual_hours;
            task.assignee_id = input.assignee_id;
            task.updated_at = Utc::now();
            task.clone()
        }))
    }

    async fn set_task_status(&self, id: DbId, status: TaskStatus) -> StoreResult<Option<Task>> {
        let mut tables = self.tables()?;
        Ok(tables.live_task(id).map(|task| {
            task.status = status;
            task.updated_at = Utc::now();
            task.clone()
        }))
    }

    async fn archive_tasks(&self, ids: &[DbId]) -> StoreResult<u64> {
        let mut tables = self.tables()?;
        Ok(archive(&mut tables.tasks, ids, |t| t.id, |t| &mut t.archived_at))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn new_client(email: &str, phone: &str) -> NewClient {
        NewClient {
            name: "Acme".to_string(),
            email: email.to_string(),
            phone: phone.to_string(),
            website: None,
            status: ClientStatus::Active,
            notes: None,
        }
    }

    #[tokio::test]
    async fn duplicate_email_is_a_unique_violation() {
        let store = MemoryStore::new();
        store.create_client(&new_client("a@x.test", "1")).await.unwrap();
        let err = store
            .create_client(&new_client("a@x.test", "2"))
            .await
            .unwrap_err();
        assert_matches!(err, StoreError::UniqueViolation { field } if field == "email");
    }

    #[tokio::test]
    async fn archived_clients_free_their_email_and_disappear() {
        let store = MemoryStore::new();
        let first = store.create_client(&new_client("a@x.test", "1")).await.unwrap();
        assert_eq!(store.archive_clients(&[first.id]).await.unwrap(), 1);

        assert!(store.find_client(first.id).await.unwrap().is_none());
        assert!(store.list_clients().await.unwrap().is_empty());
        store.create_client(&new_client("a@x.test", "1")).await.unwrap();
    }

    #[tokio::test]
    async fn update_may_keep_its_own_email() {
        let store = MemoryStore::new();
        let client = store.create_client(&new_client("a@x.test", "1")).await.unwrap();
        let mut input = new_client("a@x.test", "1");
        input.name = "Renamed".to_string();
        let updated = store.update_client(client.id, &input).await.unwrap().unwrap();
        assert_eq!(updated.name, "Renamed");
    }

    #[tokio::test]
    async fn outage_fails_every_call() {
        let store = MemoryStore::new();
        store.set_outage(Some("connection refused"));
        let err = store.list_clients().await.unwrap_err();
        assert_eq!(err.to_string(), "Store unavailable: connection refused");
        store.set_outage(None);
        assert!(store.list_clients().await.is_ok());
    }

    #[tokio::test]
    async fn clients_list_newest_first() {
        let store = MemoryStore::new();
        let a = store.create_client(&new_client("a@x.test", "1")).await.unwrap();
        let b = store.create_client(&new_client("b@x.test", "2")).await.unwrap();
        let ids: Vec<DbId> = store.list_clients().await.unwrap().iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![b.id, a.id]);
    }
}
