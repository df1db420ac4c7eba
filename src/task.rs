//! To-do tasks

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;
use chrono::{DateTime, Utc};


/// The status of a task.
///
/// Any status may follow any other one, there is no enforced workflow.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskStatus {
    Pending,
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
    Cancelled,
}

impl TaskStatus {
    /// Every status, in their "sort by status" order
    pub const ALL: [TaskStatus; 4] = [
        TaskStatus::Pending,
        TaskStatus::InProgress,
        TaskStatus::Completed,
        TaskStatus::Cancelled,
    ];

    /// The string this status is serialized as
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "Pending",
            TaskStatus::InProgress => "In Progress",
            TaskStatus::Completed => "Completed",
            TaskStatus::Cancelled => "Cancelled",
        }
    }

    /// The rank of this status when a list is sorted by status (lower comes first)
    pub fn priority(&self) -> u8 {
        match self {
            TaskStatus::Pending => 1,
            TaskStatus::InProgress => 2,
            TaskStatus::Completed => 3,
            TaskStatus::Cancelled => 4,
        }
    }
}

impl Default for TaskStatus {
    fn default() -> Self {
        TaskStatus::Pending
    }
}

impl Display for TaskStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TaskStatus::ALL.iter()
            .find(|status| status.as_str() == s)
            .copied()
            .ok_or_else(|| format!("Unknown task status {:?}", s))
    }
}



/// The identifier of a task.
///
/// This is opaque: tasks created by this crate use a random UUID, but any string read from the storage is accepted.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TaskId {
    content: String,
}

impl TaskId {
    /// Generate a random TaskId
    pub fn random() -> Self {
        let random = Uuid::new_v4().to_hyphenated().to_string();
        Self { content: random }
    }

    pub fn as_str(&self) -> &str {
        &self.content
    }
}

impl From<String> for TaskId {
    fn from(s: String) -> Self {
        Self { content: s }
    }
}
impl From<&str> for TaskId {
    fn from(s: &str) -> Self {
        Self { content: s.to_string() }
    }
}

impl Display for TaskId {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        write!(f, "{}", self.content)
    }
}

/// Used to support serde
impl Serialize for TaskId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.content)
    }
}
/// Used to support serde
impl<'de> Deserialize<'de> for TaskId {
    fn deserialize<D>(deserializer: D) -> Result<TaskId, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(TaskId{ content: s })
    }
}



/// A to-do task
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique identifier, that never changes once the task is created
    id: TaskId,
    title: String,
    /// Tasks written by older clients may have no description at all
    #[serde(default)]
    description: String,
    /// The scheduled moment of this task
    date_time: DateTime<Utc>,
    location: String,
    status: TaskStatus,
    /// The time this task was created. Only used to sort tasks
    created_at: DateTime<Utc>,
}

impl Task {
    /// Create a brand new Task from user input.
    /// This will pick a new (random) task ID, trim the text fields and force the `Pending` status.
    pub fn new(new_task: NewTask) -> Self {
        let description = new_task.description
            .map(|d| d.trim().to_string())
            .unwrap_or_default();

        Self::new_with_parameters(
            TaskId::random(),
            new_task.title.trim().to_string(),
            description,
            new_task.date_time,
            new_task.location.trim().to_string(),
            TaskStatus::Pending,
            Utc::now(),
        )
    }

    /// Create a new Task instance, with every field already known (e.g. restored from a backup)
    pub fn new_with_parameters(id: TaskId, title: String, description: String,
                               date_time: DateTime<Utc>, location: String,
                               status: TaskStatus, created_at: DateTime<Utc>,
                            ) -> Self
    {
        Self {
            id,
            title,
            description,
            date_time,
            location,
            status,
            created_at,
        }
    }

    pub fn id(&self) -> &TaskId         { &self.id          }
    pub fn title(&self) -> &str         { &self.title       }
    pub fn description(&self) -> &str   { &self.description }
    pub fn location(&self) -> &str      { &self.location    }
    pub fn status(&self) -> TaskStatus  { self.status       }
    pub fn date_time(&self) -> &DateTime<Utc>  { &self.date_time  }
    pub fn created_at(&self) -> &DateTime<Utc> { &self.created_at }

    /// Set the status. Every other field is left untouched
    pub fn set_status(&mut self, new_status: TaskStatus) {
        self.status = new_status;
    }
}



/// The user input needed to create a [`Task`]
///
/// There is intentionally no status here: every new task starts as `Pending`.
#[derive(Clone, Debug, PartialEq)]
pub struct NewTask {
    pub title: String,
    pub description: Option<String>,
    pub date_time: DateTime<Utc>,
    pub location: String,
}

impl NewTask {
    pub fn new(title: String, description: Option<String>, date_time: DateTime<Utc>, location: String) -> Self {
        Self { title, description, date_time, location }
    }

    /// Checks that the required text fields are not blank.
    ///
    /// The [`TaskStore`](crate::store::TaskStore) does not call this: it is up to the caller (typically a form) to reject invalid input before creating a task.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut missing_fields = Vec::new();
        if self.title.trim().is_empty() {
            missing_fields.push("title");
        }
        if self.location.trim().is_empty() {
            missing_fields.push("location");
        }

        if missing_fields.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { missing_fields })
        }
    }
}

/// Some required fields of a [`NewTask`] are blank
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidationError {
    missing_fields: Vec<&'static str>,
}

impl ValidationError {
    /// The names of the blank fields
    pub fn missing_fields(&self) -> &[&'static str] {
        &self.missing_fields
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        write!(f, "Missing fields: please fill in {}", self.missing_fields.join(" and "))
    }
}

impl std::error::Error for ValidationError {}
