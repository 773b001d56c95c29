//! List Filtering
//!
//! Status filter and text search are combined with AND.

use crate::cache::CachedTodo;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum StatusFilter {
    #[default]
    All,
    Active,
    Completed,
}

impl StatusFilter {
    pub const ALL: [StatusFilter; 3] =
        [StatusFilter::All, StatusFilter::Active, StatusFilter::Completed];

    pub fn label(self) -> &'static str {
        match self {
            StatusFilter::All => "All",
            StatusFilter::Active => "Active",
            StatusFilter::Completed => "Completed",
        }
    }

    pub fn matches(self, completed: bool) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Active => !completed,
            StatusFilter::Completed => completed,
        }
    }
}

/// Case-insensitive substring match; a blank query matches everything
pub fn matches_search(content: &str, query: &str) -> bool {
    let query = query.trim();
    query.is_empty() || content.to_lowercase().contains(&query.to_lowercase())
}

pub fn visible_todos(entries: &[CachedTodo], filter: StatusFilter, query: &str) -> Vec<CachedTodo> {
    entries
        .iter()
        .filter(|t| filter.matches(t.completed) && matches_search(&t.content, query))
        .cloned()
        .collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub completed: usize,
    pub total: usize,
}

pub fn summarize(entries: &[CachedTodo]) -> Summary {
    Summary {
        completed: entries.iter().filter(|t| t.completed).count(),
        total: entries.len(),
    }
}

/// Server ids of completed entries that the backend already knows about
pub fn completed_ids(entries: &[CachedTodo]) -> Vec<i64> {
    entries
        .iter()
        .filter(|t| t.completed)
        .filter_map(|t| t.id.server_id())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::EntryId;
    use chrono::Utc;

    fn entry(id: EntryId, content: &str, completed: bool) -> CachedTodo {
        let now = Utc::now();
        CachedTodo {
            id,
            content: content.to_string(),
            completed,
            created_at: now,
            updated_at: now,
        }
    }

    fn sample() -> Vec<CachedTodo> {
        vec![
            entry(EntryId::Confirmed(1), "buy milk", false),
            entry(EntryId::Confirmed(2), "buy milk", true),
            entry(EntryId::Confirmed(3), "walk dog", false),
        ]
    }

    #[test]
    fn test_active_and_search_compose() {
        let visible = visible_todos(&sample(), StatusFilter::Active, "milk");
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].content, "buy milk");
        assert!(!visible[0].completed);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let visible = visible_todos(&sample(), StatusFilter::All, "  MiLK ");
        assert_eq!(visible.len(), 2);
    }

    #[test]
    fn test_filters() {
        let items = sample();
        assert_eq!(visible_todos(&items, StatusFilter::All, "").len(), 3);
        assert_eq!(visible_todos(&items, StatusFilter::Active, "").len(), 2);
        assert_eq!(visible_todos(&items, StatusFilter::Completed, "").len(), 1);
        assert!(visible_todos(&items, StatusFilter::Completed, "dog").is_empty());
    }

    #[test]
    fn test_summary_and_completed_ids() {
        let mut items = sample();
        items.push(entry(EntryId::Pending(1), "pending", true));

        assert_eq!(summarize(&items), Summary { completed: 2, total: 4 });
        assert_eq!(completed_ids(&items), vec![2]);
    }
}
