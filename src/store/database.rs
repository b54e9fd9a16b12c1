//! Dashboard database and its operations
//!
//! Persisted to LocalStorage as a single JSON document.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::records::{Project, QuickLink, Task, Writeup};
use super::repository::{MemoryRepository, RecordId, Repository};
use super::{StoreError, StoreResult};
use crate::platform::storage;

/// Reserved project holding the Quick Todo list
pub const QUICK_TODO_PROJECT_ID: RecordId = -1;
const QUICK_TODO_TITLE: &str = "Quick Todo";

/// Derived view made stale by a write
#[must_use = "pass to AppState::reload so the view reflects the write"]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reload {
    Projects,
    Writeups,
    QuickLinks,
}

/// Project joined with its tasks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectWithTasks {
    pub project: Project,
    pub tasks: Vec<Task>,
}

/// All dashboard tables
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Database {
    pub projects: MemoryRepository<Project>,
    pub tasks: MemoryRepository<Task>,
    pub quick_links: MemoryRepository<QuickLink>,
    pub writeups: MemoryRepository<Writeup>,
}

impl Database {
    /// LocalStorage key
    const STORAGE_KEY: &'static str = "my_app_db";

    /// Empty database with the Quick Todo project in place
    pub fn new(now_ms: f64) -> Self {
        let mut db = Self::default();
        db.ensure_quick_todo_project(now_ms);
        db
    }

    /// Create the reserved Quick Todo project if it is missing
    pub fn ensure_quick_todo_project(&mut self, now_ms: f64) -> RecordId {
        if self.projects.get(QUICK_TODO_PROJECT_ID).is_none() {
            self.projects.insert_at(
                QUICK_TODO_PROJECT_ID,
                Project {
                    id: None,
                    title: QUICK_TODO_TITLE.to_string(),
                    created_at: now_ms,
                },
            );
            log::info!("Created Quick Todo project");
        }
        QUICK_TODO_PROJECT_ID
    }

    // === Projects ===

    pub fn add_project(&mut self, title: &str, now_ms: f64) -> StoreResult<(RecordId, Reload)> {
        let id = self.projects.add(Project {
            id: None,
            title: title.to_string(),
            created_at: now_ms,
        })?;
        Ok((id, Reload::Projects))
    }

    pub fn update_project(&mut self, id: RecordId, title: &str) -> StoreResult<Reload> {
        self.projects
            .update(id, &mut |p: &mut Project| p.title = title.to_string())?;
        Ok(Reload::Projects)
    }

    /// Delete a project and its tasks. The Quick Todo project cannot be deleted.
    pub fn delete_project(&mut self, id: RecordId) -> StoreResult<Reload> {
        if id == QUICK_TODO_PROJECT_ID {
            return Err(StoreError::ReservedId(id));
        }
        self.projects.delete(id)?;
        let removed = self.tasks.delete_where(|t| t.project_id == id);
        log::debug!("Deleted project #{id} with {removed} tasks");
        Ok(Reload::Projects)
    }

    // === Tasks ===

    pub fn add_task(
        &mut self,
        project_id: RecordId,
        text: &str,
        now_ms: f64,
    ) -> StoreResult<(RecordId, Reload)> {
        if self.projects.get(project_id).is_none() {
            return Err(StoreError::NotFound {
                table: "projects",
                id: project_id,
            });
        }
        let id = self.tasks.add(Task {
            id: None,
            project_id,
            text: text.to_string(),
            completed: false,
            created_at: now_ms,
        })?;
        Ok((id, Reload::Projects))
    }

    pub fn update_task(&mut self, id: RecordId, text: &str, completed: bool) -> StoreResult<Reload> {
        self.tasks.update(id, &mut |t: &mut Task| {
            t.text = text.to_string();
            t.completed = completed;
        })?;
        Ok(Reload::Projects)
    }

    pub fn delete_task(&mut self, id: RecordId) -> StoreResult<Reload> {
        self.tasks.delete(id)?;
        Ok(Reload::Projects)
    }

    // === Writeups ===

    pub fn add_writeup(&mut self, content: &str, now_ms: f64) -> StoreResult<(RecordId, Reload)> {
        let id = self.writeups.add(Writeup {
            id: None,
            content: content.to_string(),
            updated_at: now_ms,
        })?;
        Ok((id, Reload::Writeups))
    }

    pub fn update_writeup(&mut self, id: RecordId, content: &str, now_ms: f64) -> StoreResult<Reload> {
        self.writeups.update(id, &mut |w: &mut Writeup| {
            w.content = content.to_string();
            w.updated_at = now_ms;
        })?;
        Ok(Reload::Writeups)
    }

    pub fn delete_writeup(&mut self, id: RecordId) -> StoreResult<Reload> {
        self.writeups.delete(id)?;
        Ok(Reload::Writeups)
    }

    pub fn get_writeup(&self, id: RecordId) -> Option<Writeup> {
        self.writeups.get(id)
    }

    // === Quick links ===

    pub fn add_quick_link(
        &mut self,
        category: &str,
        name: &str,
        url: &str,
    ) -> StoreResult<(RecordId, Reload)> {
        let id = self.quick_links.add(QuickLink {
            id: None,
            category: category.to_string(),
            name: name.to_string(),
            url: url.to_string(),
        })?;
        Ok((id, Reload::QuickLinks))
    }

    pub fn delete_quick_link(&mut self, id: RecordId) -> StoreResult<Reload> {
        self.quick_links.delete(id)?;
        Ok(Reload::QuickLinks)
    }

    // === Derived views ===

    /// User projects (Quick Todo excluded) with their tasks, in id order
    pub fn projects_with_tasks(&self) -> Vec<ProjectWithTasks> {
        self.projects
            .iter()
            .filter(|p| p.id != Some(QUICK_TODO_PROJECT_ID))
            .map(|p| ProjectWithTasks {
                project: p.clone(),
                tasks: self.tasks_for(p.id),
            })
            .collect()
    }

    /// Tasks of the Quick Todo project
    pub fn quick_todos(&self) -> Vec<Task> {
        self.tasks_for(Some(QUICK_TODO_PROJECT_ID))
    }

    /// Writeups, most recently updated first
    pub fn writeups_by_recency(&self) -> Vec<Writeup> {
        let mut writeups = self.writeups.list();
        writeups.sort_by(|a, b| b.updated_at.total_cmp(&a.updated_at));
        writeups
    }

    /// Quick links grouped by category, categories sorted by name
    pub fn quick_links_by_category(&self) -> BTreeMap<String, Vec<QuickLink>> {
        let mut groups: BTreeMap<String, Vec<QuickLink>> = BTreeMap::new();
        for link in self.quick_links.iter() {
            groups.entry(link.category.clone()).or_default().push(link.clone());
        }
        groups
    }

    fn tasks_for(&self, project_id: Option<RecordId>) -> Vec<Task> {
        self.tasks
            .iter()
            .filter(|t| Some(t.project_id) == project_id)
            .cloned()
            .collect()
    }

    // === Persistence ===

    pub fn to_json(&self) -> StoreResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse a snapshot, restoring the Quick Todo project if it went missing
    pub fn from_json(json: &str, now_ms: f64) -> StoreResult<Self> {
        let mut db: Self = serde_json::from_str(json)?;
        db.ensure_quick_todo_project(now_ms);
        Ok(db)
    }

    /// Load from LocalStorage, falling back to a fresh database
    pub fn load(now_ms: f64) -> Self {
        match storage::load_raw(Self::STORAGE_KEY).map(|json| Self::from_json(&json, now_ms)) {
            Some(Ok(db)) => {
                log::info!(
                    "Loaded database ({} projects, {} tasks, {} writeups)",
                    db.projects.len(),
                    db.tasks.len(),
                    db.writeups.len()
                );
                db
            }
            Some(Err(e)) => {
                log::warn!("Discarding unreadable database: {e}");
                Self::new(now_ms)
            }
            None => Self::new(now_ms),
        }
    }

    /// Save to LocalStorage
    pub fn save(&self) -> StoreResult<()> {
        let json = self.to_json()?;
        storage::save_raw(Self::STORAGE_KEY, &json);
        Ok(())
    }
}
