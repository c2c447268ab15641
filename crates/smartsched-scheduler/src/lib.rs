//! # SmartSched Scheduler
//!
//! Task model, recurrence math and file-based persistence for a personal
//! task tracker.
//!
//! ## Architecture
//! ```text
//! TaskManager (owns Vec<Task>)
//!   ├── add / delete / mark done   → TaskStore::save (whole-file JSON)
//!   ├── list all / overdue         → raw deadlines
//!   ├── list today / week / month  → dates::project_date into the window
//!   └── time remaining / sort      → Task::next_due_date
//! ```
//!
//! Nothing here reads the clock: every time-relative call takes `now`.

pub mod dates;
pub mod manager;
pub mod store;
pub mod tasks;

pub use manager::TaskManager;
pub use store::TaskStore;
pub use tasks::{RecurrenceType, Task};
