//! Application state
//!
//! One owned container for everything the dashboard views read. Components
//! get it by reference; all writes go through the methods here.

use std::collections::BTreeMap;

use crate::notify::{NotificationKind, Notifications};
use crate::settings::{DashboardView, Settings};
use crate::store::{Database, ProjectWithTasks, QuickLink, Reload, StoreResult, Task, Writeup};

/// Which dashboard panel is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivePanel {
    Dashboard(DashboardView),
    Settings,
}

#[derive(Debug)]
pub struct AppState {
    pub db: Database,
    pub settings: Settings,
    pub notifications: Notifications,
    /// Project view expanded (vs. the compact quick-todo list)
    project_view: bool,
    panel: ActivePanel,
    projects: Vec<ProjectWithTasks>,
    quick_todos: Vec<Task>,
    writeups: Vec<Writeup>,
    quick_links: BTreeMap<String, Vec<QuickLink>>,
}

impl AppState {
    /// Build state over `db`, with every derived view loaded
    pub fn new(db: Database, settings: Settings) -> Self {
        let panel = ActivePanel::Dashboard(settings.default_view);
        let mut state = Self {
            db,
            settings,
            notifications: Notifications::new(),
            project_view: false,
            panel,
            projects: Vec::new(),
            quick_todos: Vec::new(),
            writeups: Vec::new(),
            quick_links: BTreeMap::new(),
        };
        state.reload_all();
        state
    }

    /// Load database and settings from local storage
    pub fn load(now_ms: f64) -> Self {
        Self::new(Database::load(now_ms), Settings::load())
    }

    /// Rebuild the view a write made stale
    pub fn reload(&mut self, reload: Reload) {
        match reload {
            Reload::Projects => {
                self.projects = self.db.projects_with_tasks();
                self.quick_todos = self.db.quick_todos();
            }
            Reload::Writeups => self.writeups = self.db.writeups_by_recency(),
            Reload::QuickLinks => self.quick_links = self.db.quick_links_by_category(),
        }
    }

    pub fn reload_all(&mut self) {
        for reload in [Reload::Projects, Reload::Writeups, Reload::QuickLinks] {
            self.reload(reload);
        }
    }

    /// Run a store write, reload what it touched and toast on failure
    ///
    /// Returns the write's value on success.
    pub fn apply<T>(
        &mut self,
        now_ms: f64,
        write: impl FnOnce(&mut Database) -> StoreResult<(T, Reload)>,
    ) -> Option<T> {
        match write(&mut self.db) {
            Ok((value, reload)) => {
                self.reload(reload);
                Some(value)
            }
            Err(e) => {
                log::warn!("Store write failed: {e}");
                self.notifications.notify(
                    e.to_string(),
                    NotificationKind::Error,
                    self.settings.toast_duration_ms(),
                    now_ms,
                );
                None
            }
        }
    }

    pub fn projects(&self) -> &[ProjectWithTasks] {
        &self.projects
    }

    pub fn quick_todos(&self) -> &[Task] {
        &self.quick_todos
    }

    pub fn writeups(&self) -> &[Writeup] {
        &self.writeups
    }

    pub fn quick_links(&self) -> &BTreeMap<String, Vec<QuickLink>> {
        &self.quick_links
    }

    pub fn project_view(&self) -> bool {
        self.project_view
    }

    pub fn toggle_project_view(&mut self) -> bool {
        self.project_view = !self.project_view;
        self.project_view
    }

    pub fn panel(&self) -> ActivePanel {
        self.panel
    }

    pub fn show_panel(&mut self, panel: ActivePanel) {
        self.panel = panel;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::QUICK_TODO_PROJECT_ID;

    fn state() -> AppState {
        AppState::new(Database::new(0.0), Settings::default())
    }

    #[test]
    fn test_view_stale_until_reload() {
        let mut app = state();
        let (id, reload) = app.db.add_project("Taxes", 1.0).unwrap();
        assert!(app.projects().is_empty());

        app.reload(reload);
        assert_eq!(app.projects().len(), 1);
        assert_eq!(app.projects()[0].project.id, Some(id));
    }

    #[test]
    fn test_apply_reloads() {
        let mut app = state();
        let id = app
            .apply(0.0, |db| db.add_task(QUICK_TODO_PROJECT_ID, "Milk", 1.0))
            .unwrap();
        assert_eq!(app.quick_todos().len(), 1);
        assert_eq!(app.quick_todos()[0].id, Some(id));

        let _ = app.apply(0.0, |db| db.add_writeup("Notes", 2.0)).unwrap();
        assert_eq!(app.writeups().len(), 1);
    }

    #[test]
    fn test_apply_failure_notifies() {
        let mut app = state();
        let result = app.apply(10.0, |db| db.delete_task(404).map(|r| ((), r)));
        assert!(result.is_none());
        assert_eq!(app.notifications.len(), 1);
        assert!(
            app.notifications
                .iter()
                .next()
                .unwrap()
                .message
                .contains("404")
        );
    }

    #[test]
    fn test_failure_toast_uses_configured_duration() {
        let settings = Settings {
            toast_duration_ms: 10_000,
            ..Settings::default()
        };
        let mut app = AppState::new(Database::new(0.0), settings);
        let _ = app.apply(0.0, |db| db.delete_task(404).map(|r| ((), r)));

        // Past the 3 s default, still inside the configured 10 s
        assert_eq!(app.notifications.expire(5_000.0), 0);
        assert_eq!(app.notifications.len(), 1);
        assert_eq!(app.notifications.expire(10_000.0), 1);
    }

    #[test]
    fn test_panels() {
        let mut app = state();
        assert_eq!(
            app.panel(),
            ActivePanel::Dashboard(Settings::default().default_view)
        );
        app.show_panel(ActivePanel::Settings);
        assert_eq!(app.panel(), ActivePanel::Settings);
        assert!(app.toggle_project_view());
        assert!(!app.toggle_project_view());
    }
}
