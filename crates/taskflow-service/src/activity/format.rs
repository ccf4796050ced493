//! Notification title and message rendering.

use taskflow_entity::activity::TaskStatus;

/// Longest chat excerpt quoted in a notification, in characters.
const PREVIEW_CHARS: usize = 100;

/// Rendered title and message pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    /// Short heading.
    pub title: String,
    /// Full sentence shown in the inbox.
    pub message: String,
}

impl Rendered {
    fn new(title: &str, message: String) -> Self {
        Self {
            title: title.to_string(),
            message,
        }
    }
}

/// Formats notification text for the activity kinds.
pub struct NotificationFormatter;

impl NotificationFormatter {
    /// General notice that a task was created.
    pub fn task_created(actor: &str, title: &str) -> Rendered {
        Rendered::new("New Task", format!("{actor} created a new task: \"{title}\""))
    }

    /// The recipient was given a task with no previous assignee.
    pub fn task_assigned(actor: &str, title: &str) -> Rendered {
        Rendered::new(
            "New Task Assigned",
            format!("{actor} assigned you to \"{title}\""),
        )
    }

    /// The recipient took over a task from someone else.
    pub fn task_reassigned(actor: &str, title: &str) -> Rendered {
        Rendered::new(
            "Task Reassigned",
            format!("{actor} reassigned \"{title}\" to you"),
        )
    }

    /// General notice that a task was edited.
    pub fn task_updated(actor: &str, title: &str) -> Rendered {
        Rendered::new("Task Updated", format!("{actor} updated \"{title}\""))
    }

    /// General notice that a task changed column.
    pub fn task_moved(actor: &str, title: &str, from: TaskStatus, to: TaskStatus) -> Rendered {
        Rendered::new(
            "Task Moved",
            format!(
                "{actor} moved \"{title}\" from {} to {}",
                from.label(),
                to.label()
            ),
        )
    }

    /// The recipient's own task changed column.
    pub fn your_task_moved(actor: &str, title: &str, from: TaskStatus, to: TaskStatus) -> Rendered {
        Rendered::new(
            "Your Task Moved",
            format!(
                "{actor} moved your task \"{title}\" from {} to {}",
                from.label(),
                to.label()
            ),
        )
    }

    /// A chat message was posted in a project the recipient belongs to.
    pub fn chat_message(actor: &str, content: &str) -> Rendered {
        Rendered::new("New Message", format!("{actor}: {}", preview(content)))
    }

    /// The recipient was mentioned in a chat message.
    pub fn chat_mention(actor: &str, content: &str) -> Rendered {
        Rendered::new(
            "You Were Mentioned",
            format!("{actor} mentioned you: {}", preview(content)),
        )
    }
}

/// Trims chat content to a short single-line excerpt.
fn preview(content: &str) -> String {
    let flat = content.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= PREVIEW_CHARS {
        return flat;
    }
    let mut cut: String = flat.chars().take(PREVIEW_CHARS).collect();
    cut.push_str("...");
    cut
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_moved_uses_status_labels() {
        let rendered =
            NotificationFormatter::task_moved("Alice", "Ship it", TaskStatus::Todo, TaskStatus::Done);
        assert_eq!(rendered.title, "Task Moved");
        assert_eq!(rendered.message, "Alice moved \"Ship it\" from To Do to Done");

        let personal = NotificationFormatter::your_task_moved(
            "Alice",
            "Ship it",
            TaskStatus::InProgress,
            TaskStatus::Done,
        );
        assert_eq!(personal.title, "Your Task Moved");
        assert!(personal.message.contains("from In Progress to Done"));
    }

    #[test]
    fn test_preview_is_truncated_on_char_boundary() {
        let long = "é".repeat(150);
        let rendered = NotificationFormatter::chat_message("Bob", &long);
        let body = rendered.message.trim_start_matches("Bob: ");
        assert_eq!(body.chars().count(), PREVIEW_CHARS + 3);
        assert!(body.ends_with("..."));
    }

    #[test]
    fn test_preview_flattens_whitespace() {
        let rendered = NotificationFormatter::chat_mention("Bob", "hey\n\n@Mike   look");
        assert_eq!(rendered.message, "Bob mentioned you: hey @Mike look");
    }
}
