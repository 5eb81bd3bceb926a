use super::todo_item::TodoItemResponse;
use super::todo_list::TodoListResponse;
use crate::search::SearchHit;
use serde::{Deserialize, Serialize};

/// Query string of the cross-entity search.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub query: String,
}

/// Query string of the flat item search.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ItemSearchParams {
    #[serde(default)]
    pub query_params: String,
}

/// One element of a cross-entity search response, tagged by `kind`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SearchResult {
    List(TodoListResponse),
    Item(TodoItemResponse),
}

impl From<SearchHit> for SearchResult {
    fn from(value: SearchHit) -> Self {
        match value {
            SearchHit::List(list) => Self::List(list.into()),
            SearchHit::Item(item) => Self::Item(item.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::SearchResult;
    use crate::model::todo_item::TodoItem;
    use crate::search::SearchHit;
    use chrono::DateTime;

    #[test]
    fn item_hit_is_tagged() {
        let created_at = DateTime::from_timestamp_millis(0).unwrap().naive_utc();
        let hit = SearchHit::Item(TodoItem {
            id: 2,
            list_id: 1,
            name: "Buy Milk".to_string(),
            description: None,
            deadline: None,
            created_at,
        });
        let json = serde_json::to_value(SearchResult::from(hit)).unwrap();
        assert_eq!(json["kind"], "item");
        assert_eq!(json["name"], "Buy Milk");
        assert_eq!(json["list_id"], 1);
    }
}
