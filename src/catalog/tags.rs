//! Tag pills for any tagged content list

use std::collections::BTreeSet;

use super::collation_key;
use crate::domain::Tagged;

/// Sorted unique tags across `items`
pub fn collect_tags<T: Tagged>(items: &[T]) -> Vec<String> {
    let mut tags = items
        .iter()
        .flat_map(|item| item.tags().iter().cloned())
        .filter(|tag| !tag.trim().is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect::<Vec<_>>();
    tags.sort_by_cached_key(|t| collation_key(t));
    tags
}

/// Items carrying `tag`; `None` keeps everything
pub fn filter_by_tag<'a, T: Tagged>(items: &'a [T], tag: Option<&str>) -> Vec<&'a T> {
    items
        .iter()
        .filter(|item| tag.map(|t| item.has_tag(t)).unwrap_or(true))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Expression;

    fn expression(id: u64, tags: &[&str]) -> Expression {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "phrase": format!("uttrykk {}", id),
            "tags": tags,
        }))
        .unwrap()
    }

    #[test]
    fn test_collect_tags_sorted_unique() {
        let items = vec![
            expression(1, &["mat", "hverdag"]),
            expression(2, &["hverdag", ""]),
            expression(3, &[]),
        ];
        assert_eq!(collect_tags(&items), vec!["hverdag", "mat"]);
    }

    #[test]
    fn test_filter_by_tag() {
        let items = vec![expression(1, &["mat"]), expression(2, &["jobb"])];
        let ids: Vec<u64> = filter_by_tag(&items, Some("jobb")).iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![2]);
        assert_eq!(filter_by_tag(&items, None).len(), 2);
    }
}
