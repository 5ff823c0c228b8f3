/// Local task list state
///
/// The in-memory view a frontend keeps between API calls: the full task
/// list plus the active filters and sort. The list is reconciled only
/// from response payloads: a successful create prepends the returned
/// task and an update replaces the matching record in place. Nothing
/// here talks to the network.
///
/// Filtering happens in a fixed order: completion filter, then
/// priority filter, then priority sort. The board view groups the
/// filtered result into one column per workflow status.

use taskdeck_shared::models::task::{Priority, Status, Task};
use uuid::Uuid;

/// Completion filter over the visible list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CompletionFilter {
    /// Show everything
    #[default]
    All,

    /// Only tasks not yet completed
    Active,

    /// Only completed tasks
    Completed,
}

/// Priority sort direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PrioritySort {
    /// Keep storage order
    #[default]
    None,

    /// Low to high
    Ascending,

    /// High to low
    Descending,
}

/// In-memory task list with view filters
#[derive(Debug, Default)]
pub struct TaskList {
    tasks: Vec<Task>,

    /// Completion filter applied first
    pub filter: CompletionFilter,

    /// Priority filter applied second; `None` shows all priorities
    pub priority_filter: Option<Priority>,

    /// Priority sort applied last
    pub sort: PrioritySort,
}

impl TaskList {
    /// Creates an empty list with default filters
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole list from a server response
    pub fn set_tasks(&mut self, tasks: Vec<Task>) {
        self.tasks = tasks;
    }

    /// Prepends a newly created task, so it shows first
    pub fn add(&mut self, task: Task) {
        self.tasks.insert(0, task);
    }

    /// Replaces the record with the same id, if present
    pub fn apply(&mut self, updated: Task) {
        if let Some(task) = self.tasks.iter_mut().find(|t| t.id == updated.id) {
            *task = updated;
        }
    }

    /// Removes a task by id
    pub fn remove(&mut self, id: Uuid) {
        self.tasks.retain(|t| t.id != id);
    }

    /// Drops every completed task, mirroring a successful clear call
    pub fn clear_completed(&mut self) {
        self.tasks.retain(|t| !t.completed);
    }

    /// All tasks regardless of filters
    pub fn all(&self) -> &[Task] {
        &self.tasks
    }

    /// Number of not-yet-completed tasks
    pub fn active_count(&self) -> usize {
        self.tasks.iter().filter(|t| !t.completed).count()
    }

    /// Whether any task is completed (enables the clear button)
    pub fn has_completed(&self) -> bool {
        self.tasks.iter().any(|t| t.completed)
    }

    /// The visible tasks after filters and sort
    pub fn visible(&self) -> Vec<&Task> {
        let mut visible: Vec<&Task> = self
            .tasks
            .iter()
            .filter(|t| match self.filter {
                CompletionFilter::All => true,
                CompletionFilter::Active => !t.completed,
                CompletionFilter::Completed => t.completed,
            })
            .filter(|t| match self.priority_filter {
                None => true,
                Some(p) => t.priority == p,
            })
            .collect();

        match self.sort {
            PrioritySort::None => {}
            PrioritySort::Ascending => visible.sort_by_key(|t| t.priority),
            PrioritySort::Descending => {
                visible.sort_by_key(|t| std::cmp::Reverse(t.priority))
            }
        }

        visible
    }

    /// The visible tasks belonging to one board column
    ///
    /// A completed task shows in the done column regardless of its
    /// status, so nothing checked off ever lingers in an earlier column.
    /// Its status is untouched, so it also still shows in the column
    /// that status names.
    pub fn in_column(&self, column: Status) -> Vec<&Task> {
        self.visible()
            .into_iter()
            .filter(|t| t.status == column || (column == Status::Done && t.completed))
            .collect()
    }

    /// The visible tasks grouped into the three board columns, in order
    pub fn columns(&self) -> [(Status, Vec<&Task>); 3] {
        [Status::Todo, Status::InProgress, Status::Done]
            .map(|status| (status, self.in_column(status)))
    }
}
