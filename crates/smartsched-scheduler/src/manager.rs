//! Task manager — owns the task list and answers every query against it.
//! Operations return the text to show rather than printing it.

use chrono::{NaiveDate, NaiveDateTime};

use smartsched_core::{Result, SchedError};

use crate::dates;
use crate::store::TaskStore;
use crate::tasks::{RecurrenceType, Task};

const NO_TASKS: &str = "No Tasks available";

/// The task collection plus optional file persistence.
pub struct TaskManager {
    tasks: Vec<Task>,
    store: Option<TaskStore>,
}

impl TaskManager {
    /// In-memory manager over a preloaded list.
    pub fn new(tasks: Vec<Task>) -> Self {
        Self { tasks, store: None }
    }

    /// Load from `store` and save back to it after every change.
    pub fn with_store(store: TaskStore) -> Self {
        let tasks = store.load();
        tracing::info!("📂 {} tasks loaded from {}", tasks.len(), store.path().display());
        Self {
            tasks,
            store: Some(store),
        }
    }

    /// Create and append a task. Returns the new task.
    pub fn add_task(
        &mut self,
        name: &str,
        due_date_time: NaiveDateTime,
        recurrence: RecurrenceType,
        now: NaiveDateTime,
    ) -> &Task {
        let task = Task::new(name, due_date_time, recurrence, now);
        tracing::info!("📅 Task added: '{}' ({})", task.name, task.id());
        self.tasks.push(task);
        self.save();
        let idx = self.tasks.len() - 1;
        &self.tasks[idx]
    }

    /// Remove the task with `id`. Returns false if there was none.
    pub fn delete_task(&mut self, id: &str) -> bool {
        let Some(pos) = self.tasks.iter().position(|t| t.id() == id) else {
            return false;
        };
        let task = self.tasks.remove(pos);
        tracing::info!("🗑️ Task deleted: '{}' ({})", task.name, task.id());
        self.save();
        true
    }

    /// Mark as done. False if not found or already done.
    pub fn mark_task_as_done(&mut self, id: &str) -> bool {
        match self.tasks.iter_mut().find(|t| t.id() == id) {
            Some(task) if !task.done => {
                task.done = true;
                tracing::info!("✅ Task done: '{}' ({})", task.name, task.id());
                self.save();
                true
            }
            _ => false,
        }
    }

    pub fn list_all_tasks(&self, now: NaiveDateTime) -> String {
        if self.tasks.is_empty() {
            return NO_TASKS.to_string();
        }
        self.tasks
            .iter()
            .map(|task| {
                let label = task.due_soon_label(now);
                if label.is_empty() {
                    format!("{}\n---", task.render(now))
                } else {
                    format!("{}\n--- {label}", task.render(now))
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Tasks whose raw deadline has passed. Recurring tasks are not
    /// projected here, unlike the calendar listings.
    pub fn list_overdue_tasks(&self, now: NaiveDateTime) -> String {
        if self.tasks.is_empty() {
            return NO_TASKS.to_string();
        }
        let overdue: Vec<String> = self
            .tasks
            .iter()
            .filter(|t| t.is_past_due(now))
            .map(|t| t.render(now))
            .collect();
        if overdue.is_empty() {
            "No overdue tasks".to_string()
        } else {
            overdue.join("\n\n")
        }
    }

    pub fn list_tasks_due_today(&self, now: NaiveDateTime) -> String {
        let today = now.date();
        self.list_window(today, today, "No Tasks due today", |task, date| {
            format!("{} → Due Today ({date}) [Recurs: {}]", task.name, task.recurrence)
        })
    }

    pub fn list_tasks_due_this_week(&self, now: NaiveDateTime) -> String {
        let today = now.date();
        self.list_window(
            dates::start_of_week(today),
            dates::end_of_week(today),
            "No Tasks due this week",
            due_on_line,
        )
    }

    pub fn list_tasks_due_this_month(&self, now: NaiveDateTime) -> String {
        let today = now.date();
        self.list_window(
            dates::start_of_month(today),
            dates::end_of_month(today),
            "No Tasks due this month",
            due_on_line,
        )
    }

    /// One line per task whose effective due date lies in `[start, end]`.
    /// Recurring dates are rolled forward to `start` before the check.
    fn list_window<F>(&self, start: NaiveDate, end: NaiveDate, none_found: &str, line: F) -> String
    where
        F: Fn(&Task, NaiveDate) -> String,
    {
        if self.tasks.is_empty() {
            return NO_TASKS.to_string();
        }
        let lines: Vec<String> = self
            .tasks
            .iter()
            .filter_map(|task| {
                let effective =
                    dates::project_date(task.due_date_time.date(), task.recurrence, start);
                (start <= effective && effective <= end).then(|| line(task, effective))
            })
            .collect();
        if lines.is_empty() {
            none_found.to_string()
        } else {
            lines.join("\n")
        }
    }

    pub fn get_time_remaining(&self, id: &str, now: NaiveDateTime) -> String {
        match self.find(id) {
            Ok(task) => task.time_remaining(now),
            Err(_) => "Task not found".to_string(),
        }
    }

    /// Stable sort by raw deadline; returns the reordered list.
    pub fn sort_tasks_by_deadline(&mut self, now: NaiveDateTime) -> String {
        self.tasks.sort_by_key(|t| t.due_date_time);
        self.save();
        if self.tasks.is_empty() {
            return NO_TASKS.to_string();
        }
        self.tasks
            .iter()
            .map(|t| t.render(now))
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Look up a task by ID.
    pub fn find(&self, id: &str) -> Result<&Task> {
        self.tasks
            .iter()
            .find(|t| t.id() == id)
            .ok_or_else(|| SchedError::TaskNotFound(id.to_string()))
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Save now, surfacing the error. No-op without a store.
    pub fn flush(&self) -> Result<()> {
        match &self.store {
            Some(store) => store.save(&self.tasks),
            None => Ok(()),
        }
    }

    /// Save after a change; failures are logged and the session goes on.
    fn save(&self) {
        if let Err(e) = self.flush() {
            tracing::warn!("⚠️ Failed to save tasks: {e}");
        }
    }
}

fn due_on_line(task: &Task, date: NaiveDate) -> String {
    format!("{} → Due on {date} [Recurs: {}]", task.name, task.recurrence)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    /// Wednesday 14 Oct 2026, noon.
    fn now() -> NaiveDateTime {
        at(2026, 10, 14, 12, 0)
    }

    fn ids(manager: &TaskManager) -> Vec<String> {
        manager.tasks().iter().map(|t| t.id().to_string()).collect()
    }

    #[test]
    fn test_add_and_list() {
        let mut manager = TaskManager::new(Vec::new());
        assert_eq!(manager.list_all_tasks(now()), "No Tasks available");
        let id = manager
            .add_task("groceries", at(2026, 10, 20, 18, 0), RecurrenceType::None, now())
            .id()
            .to_string();
        assert_eq!(manager.len(), 1);
        let listing = manager.list_all_tasks(now());
        assert!(listing.contains(&format!("[{id}] groceries")));
        assert!(listing.ends_with("---"));
    }

    #[test]
    fn test_list_all_appends_due_soon_label() {
        let mut manager = TaskManager::new(Vec::new());
        manager.add_task("call", now() + Duration::minutes(20), RecurrenceType::None, now());
        assert!(manager.list_all_tasks(now()).ends_with("--- Due in Less than 1 Hour"));
    }

    #[test]
    fn test_delete() {
        let mut manager = TaskManager::new(Vec::new());
        manager.add_task("a", at(2026, 10, 20, 9, 0), RecurrenceType::None, now());
        let b = manager
            .add_task("b", at(2026, 10, 21, 9, 0), RecurrenceType::None, now())
            .id()
            .to_string();
        manager.add_task("c", at(2026, 10, 22, 9, 0), RecurrenceType::None, now());

        let before = ids(&manager);
        assert!(!manager.delete_task("no-such-id"));
        assert_eq!(ids(&manager), before);

        assert!(manager.delete_task(&b));
        assert_eq!(manager.len(), 2);
        assert!(manager.find(&b).is_err());
        assert!(!manager.delete_task(&b));
    }

    #[test]
    fn test_mark_done() {
        let mut manager = TaskManager::new(Vec::new());
        let id = manager
            .add_task("a", at(2026, 10, 20, 9, 0), RecurrenceType::None, now())
            .id()
            .to_string();
        assert!(manager.mark_task_as_done(&id));
        assert!(manager.find(&id).unwrap().done);
        assert!(!manager.mark_task_as_done(&id));
        assert!(!manager.mark_task_as_done("missing"));
    }

    #[test]
    fn test_overdue_listing_uses_raw_deadline() {
        let mut manager = TaskManager::new(Vec::new());
        // Weekly, three weeks behind
        let weekly = manager
            .add_task("review", at(2026, 9, 23, 10, 0), RecurrenceType::Weekly, now())
            .id()
            .to_string();
        manager.add_task("future", at(2026, 12, 1, 10, 0), RecurrenceType::None, now());

        let overdue = manager.list_overdue_tasks(now());
        assert!(overdue.contains("review"));
        assert!(!overdue.contains("future"));

        let week = manager.list_tasks_due_this_week(now());
        assert_eq!(week, "review → Due on 2026-10-14 [Recurs: WEEKLY]");
        assert!(!manager.find(&weekly).unwrap().is_overdue(now()));
    }

    #[test]
    fn test_overdue_listing_messages() {
        let manager = TaskManager::new(Vec::new());
        assert_eq!(manager.list_overdue_tasks(now()), "No Tasks available");
        let mut manager = TaskManager::new(Vec::new());
        manager.add_task("later", at(2026, 10, 30, 9, 0), RecurrenceType::None, now());
        assert_eq!(manager.list_overdue_tasks(now()), "No overdue tasks");
    }

    #[test]
    fn test_due_today() {
        let mut manager = TaskManager::new(Vec::new());
        assert_eq!(manager.list_tasks_due_today(now()), "No Tasks available");
        manager.add_task("standup", at(2026, 10, 1, 9, 30), RecurrenceType::Daily, now());
        // Due earlier today, still listed
        manager.add_task("early", at(2026, 10, 14, 7, 0), RecurrenceType::None, now());
        manager.add_task("tomorrow", at(2026, 10, 15, 7, 0), RecurrenceType::None, now());
        manager.add_task("weekly-off-day", at(2026, 10, 1, 9, 0), RecurrenceType::Weekly, now());
        assert_eq!(
            manager.list_tasks_due_today(now()),
            "standup → Due Today (2026-10-14) [Recurs: DAILY]\n\
             early → Due Today (2026-10-14) [Recurs: NONE]"
        );

        let mut none_today = TaskManager::new(Vec::new());
        none_today.add_task("tomorrow", at(2026, 10, 15, 7, 0), RecurrenceType::None, now());
        assert_eq!(none_today.list_tasks_due_today(now()), "No Tasks due today");
    }

    #[test]
    fn test_due_this_week() {
        let mut manager = TaskManager::new(Vec::new());
        manager.add_task("monday", at(2026, 10, 12, 9, 0), RecurrenceType::None, now());
        manager.add_task("sunday", at(2026, 10, 18, 23, 59), RecurrenceType::None, now());
        manager.add_task("next-monday", at(2026, 10, 19, 0, 0), RecurrenceType::None, now());
        manager.add_task("last-week", at(2026, 10, 11, 9, 0), RecurrenceType::None, now());
        manager.add_task("monthly", at(2026, 8, 16, 9, 0), RecurrenceType::Monthly, now());
        assert_eq!(
            manager.list_tasks_due_this_week(now()),
            "monday → Due on 2026-10-12 [Recurs: NONE]\n\
             sunday → Due on 2026-10-18 [Recurs: NONE]\n\
             monthly → Due on 2026-10-16 [Recurs: MONTHLY]"
        );
    }

    #[test]
    fn test_due_this_month() {
        let mut manager = TaskManager::new(Vec::new());
        manager.add_task("rent", at(2025, 1, 31, 9, 0), RecurrenceType::Monthly, now());
        manager.add_task("november", at(2026, 11, 1, 9, 0), RecurrenceType::None, now());
        assert_eq!(
            manager.list_tasks_due_this_month(now()),
            "rent → Due on 2026-10-28 [Recurs: MONTHLY]"
        );

        let mut nothing = TaskManager::new(Vec::new());
        nothing.add_task("november", at(2026, 11, 1, 9, 0), RecurrenceType::None, now());
        assert_eq!(nothing.list_tasks_due_this_month(now()), "No Tasks due this month");
    }

    #[test]
    fn test_time_remaining_by_id() {
        let mut manager = TaskManager::new(Vec::new());
        let id = manager
            .add_task(
                "x",
                now() + Duration::days(2) + Duration::hours(3),
                RecurrenceType::None,
                now(),
            )
            .id()
            .to_string();
        assert_eq!(manager.get_time_remaining(&id, now()), "2 days, 3 hours, 0 minutes left");
        assert_eq!(manager.get_time_remaining("nope", now()), "Task not found");
    }

    #[test]
    fn test_sort_by_deadline() {
        let mut manager = TaskManager::new(Vec::new());
        manager.add_task("c", at(2026, 12, 1, 9, 0), RecurrenceType::None, now());
        manager.add_task("a", at(2026, 10, 1, 9, 0), RecurrenceType::Daily, now());
        manager.add_task("b1", at(2026, 11, 1, 9, 0), RecurrenceType::None, now());
        manager.add_task("b2", at(2026, 11, 1, 9, 0), RecurrenceType::None, now());

        let mut before = ids(&manager);
        let output = manager.sort_tasks_by_deadline(now());
        let names: Vec<&str> = manager.tasks().iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["a", "b1", "b2", "c"]);
        assert!(manager.tasks().windows(2).all(|w| w[0].due_date_time <= w[1].due_date_time));

        let mut after = ids(&manager);
        before.sort();
        after.sort();
        assert_eq!(before, after);
        assert!(output.find("] a\n").unwrap() < output.find("] c\n").unwrap());
    }

    #[test]
    fn test_store_backed_manager_persists_mutations() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tasks.json");

        let mut manager = TaskManager::with_store(TaskStore::new(&path));
        assert!(manager.is_empty());
        let keep = manager
            .add_task("keep", at(2026, 10, 20, 9, 0), RecurrenceType::None, now())
            .id()
            .to_string();
        let gone = manager
            .add_task("drop", at(2026, 10, 21, 9, 0), RecurrenceType::None, now())
            .id()
            .to_string();
        assert!(manager.delete_task(&gone));
        assert!(manager.mark_task_as_done(&keep));

        let reloaded = TaskManager::with_store(TaskStore::new(&path));
        assert_eq!(reloaded.len(), 1);
        assert_eq!(reloaded.tasks(), manager.tasks());
        assert!(reloaded.find(&keep).unwrap().done);
    }

    #[test]
    fn test_failed_save_keeps_session_going() {
        let dir = tempfile::tempdir().unwrap();
        // The store path is a directory, so every save fails
        let mut manager = TaskManager::with_store(TaskStore::new(dir.path()));
        assert!(manager.is_empty());

        let keep = manager
            .add_task("keep", at(2026, 10, 20, 9, 0), RecurrenceType::None, now())
            .id()
            .to_string();
        let gone = manager
            .add_task("drop", at(2026, 10, 21, 9, 0), RecurrenceType::None, now())
            .id()
            .to_string();
        assert!(manager.delete_task(&gone));
        assert!(manager.mark_task_as_done(&keep));
        assert_eq!(manager.sort_tasks_by_deadline(now()).lines().count(), 7);

        assert_eq!(manager.len(), 1);
        assert!(manager.find(&keep).unwrap().done);
        assert!(matches!(manager.flush(), Err(SchedError::Persistence(_))));
    }
}
