use crate::model::task::Task;
use crate::parse::{FALSE_TOKEN, SEPARATOR, TRUE_TOKEN};

/// Serialize tasks to the flat store format.
///
/// One record per task, `name 0x06 True|False`, joined with `\n` and no
/// trailing newline. An empty list serializes to the empty string.
pub fn serialize_tasks(tasks: &[Task]) -> String {
    tasks
        .iter()
        .map(serialize_task)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Serialize a single record (no line terminator)
pub fn serialize_task(task: &Task) -> String {
    let flag = if task.done { TRUE_TOKEN } else { FALSE_TOKEN };
    format!("{}{}{}", task.name, SEPARATOR, flag)
}

/// Whether a name survives a write/read cycle.
///
/// The format has no escaping: a separator byte or a line break inside a
/// name splits the record. Such names are still stored as given.
pub fn name_is_encodable(name: &str) -> bool {
    !name.contains(SEPARATOR) && !name.contains('\n') && !name.contains('\r')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_list_is_empty_string() {
        assert_eq!(serialize_tasks(&[]), "");
    }

    #[test]
    fn single_record_has_no_newline() {
        let tasks = vec![Task::new("B", false)];
        assert_eq!(serialize_tasks(&tasks), "B\u{6}False");
    }

    #[test]
    fn records_joined_by_newline() {
        let tasks = vec![Task::new("Buy milk", true), Task::new("Walk dog", false)];
        assert_eq!(
            serialize_tasks(&tasks),
            "Buy milk\u{6}True\nWalk dog\u{6}False"
        );
    }

    #[test]
    fn flag_tokens_are_capitalized() {
        assert!(serialize_task(&Task::new("x", true)).ends_with("True"));
        assert!(serialize_task(&Task::new("x", false)).ends_with("False"));
    }

    #[test]
    fn encodable_names() {
        assert!(name_is_encodable("Buy milk"));
        assert!(name_is_encodable("emoji 🎉 and tabs\tok"));
        assert!(!name_is_encodable("two\nlines"));
        assert!(!name_is_encodable("bad\u{6}name"));
        assert!(!name_is_encodable("crlf\r"));
    }
}
