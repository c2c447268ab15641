//! Interactive menu loop. Reads one command at a time, runs it to completion
//! and prints the result before prompting again.

use std::io::{self, BufRead, Write};

use chrono::NaiveDateTime;
use smartsched_scheduler::{RecurrenceType, TaskManager, dates};

const MENU: &str = "\n=== Smart Task Scheduler ===
1. Add Task
2. Delete Task
3. View All Tasks
4. View Overdue Tasks
5. View Today's Tasks
6. View This Week's Tasks
7. View This Month's Tasks
8. View Time Remaining (by ID)
9. Sort Tasks by Deadline
10. Mark Task as Done
0. Exit";

/// Console session over any line source and sink.
pub struct Console<'a, R, W, C> {
    manager: &'a mut TaskManager,
    input: R,
    out: W,
    clock: C,
}

impl<'a, R, W, C> Console<'a, R, W, C>
where
    R: BufRead,
    W: Write,
    C: Fn() -> NaiveDateTime,
{
    pub fn new(manager: &'a mut TaskManager, input: R, out: W, clock: C) -> Self {
        Self {
            manager,
            input,
            out,
            clock,
        }
    }

    /// Run until `0` or end of input. The task list is flushed on the way out.
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            writeln!(self.out, "{MENU}")?;
            let Some(choice) = self.prompt("Select an option: ")? else {
                break;
            };
            let now = (self.clock)();
            match choice.trim() {
                "1" => self.add(now)?,
                "2" => self.delete()?,
                "3" => writeln!(self.out, "{}", self.manager.list_all_tasks(now))?,
                "4" => writeln!(self.out, "{}", self.manager.list_overdue_tasks(now))?,
                "5" => writeln!(self.out, "{}", self.manager.list_tasks_due_today(now))?,
                "6" => writeln!(self.out, "{}", self.manager.list_tasks_due_this_week(now))?,
                "7" => writeln!(self.out, "{}", self.manager.list_tasks_due_this_month(now))?,
                "8" => {
                    if let Some(id) = self.prompt("Enter task ID: ")? {
                        let text = self.manager.get_time_remaining(id.trim(), now);
                        writeln!(self.out, "{text}")?;
                    }
                }
                "9" => {
                    let sorted = self.manager.sort_tasks_by_deadline(now);
                    writeln!(self.out, "{sorted}")?;
                }
                "10" => self.mark_done()?,
                "0" => break,
                _ => writeln!(self.out, "Invalid input. Please try again.")?,
            }
        }

        if let Err(e) = self.manager.flush() {
            tracing::warn!("⚠️ Failed to save tasks on exit: {e}");
            writeln!(self.out, "Failed to save Tasks: {e}")?;
        }
        writeln!(self.out, "Exiting Smart Task Scheduler...")?;
        self.out.flush()
    }

    fn add(&mut self, now: NaiveDateTime) -> io::Result<()> {
        let Some(name) = self.prompt("Enter task name: ")? else {
            return Ok(());
        };
        let Some(due) = self.prompt("Enter due date and time (dd-MM-yyyy HH:mm): ")? else {
            return Ok(());
        };
        let Some(recurrence) =
            self.prompt("Choose the recurrence type (NONE / DAILY / WEEKLY / MONTHLY): ")?
        else {
            return Ok(());
        };

        let parsed = dates::parse_date_time(&due)
            .and_then(|due| recurrence.parse::<RecurrenceType>().map(|r| (due, r)));
        match parsed {
            Ok((due, recurrence)) => {
                let task = self.manager.add_task(&name, due, recurrence, now);
                writeln!(self.out, "Added Task: {}", task.name)
            }
            Err(e) => writeln!(self.out, "Error: {e}"),
        }
    }

    fn delete(&mut self) -> io::Result<()> {
        let Some(id) = self.prompt("Enter task ID to delete: ")? else {
            return Ok(());
        };
        if self.manager.delete_task(id.trim()) {
            writeln!(self.out, "Task deleted successfully")
        } else {
            writeln!(self.out, "Task not found")
        }
    }

    fn mark_done(&mut self) -> io::Result<()> {
        let Some(id) = self.prompt("Enter task ID to mark as done: ")? else {
            return Ok(());
        };
        if self.manager.mark_task_as_done(id.trim()) {
            writeln!(self.out, "Task marked as completed.")
        } else {
            writeln!(self.out, "Task not found or already completed.")
        }
    }

    /// Print `label` and read one line. `None` at end of input.
    fn prompt(&mut self, label: &str) -> io::Result<Option<String>> {
        write!(self.out, "{label}")?;
        self.out.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed_len = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(trimmed_len);
        Ok(Some(line))
    }
}
