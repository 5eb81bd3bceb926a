use chrono::NaiveDate;
use rusqlite::Connection;
use todo_core::db::open_db_in_memory;
use todo_core::{
    ItemKey, ListId, RepoError, SearchQuery, ServiceError, SqliteTodoItemRepository,
    SqliteTodoListRepository, SqliteUserRepository, TodoItemDraft, TodoItemPatch,
    TodoItemRepository, TodoItemService, TodoListDraft, TodoListRepository, UserDraft,
    UserRepository,
};

type Items<'conn> = TodoItemService<SqliteTodoItemRepository<'conn>, SqliteTodoListRepository<'conn>>;

fn item_service(conn: &Connection) -> Items<'_> {
    TodoItemService::new(
        SqliteTodoItemRepository::try_new(conn).unwrap(),
        SqliteTodoListRepository::try_new(conn).unwrap(),
    )
}

fn seed_list(conn: &Connection, name: &str) -> ListId {
    let users = SqliteUserRepository::try_new(conn).unwrap();
    let user_id = match users.find_by_username("owner").unwrap() {
        Some(user) => user.id,
        None => users
            .create_user(&UserDraft::new("owner", "hash").unwrap())
            .unwrap()
            .id,
    };
    SqliteTodoListRepository::try_new(conn)
        .unwrap()
        .create_list(&TodoListDraft::new(user_id, name).unwrap())
        .unwrap()
        .id
}

#[test]
fn create_item_in_existing_list() {
    let conn = open_db_in_memory().unwrap();
    let list_id = seed_list(&conn, "Groceries");
    let deadline = NaiveDate::from_ymd_opt(2023, 12, 31)
        .unwrap()
        .and_hms_opt(23, 59, 59)
        .unwrap();

    let item = item_service(&conn)
        .create_item(
            &TodoItemDraft::new(list_id, "Milk")
                .unwrap()
                .with_description("2 litres")
                .with_deadline(deadline),
        )
        .unwrap();

    assert_eq!(item.id, 1);
    assert_eq!(item.list_id, list_id);
    assert_eq!(item.description.as_deref(), Some("2 litres"));
    assert_eq!(item.deadline, Some(deadline));
}

#[test]
fn create_item_in_missing_list_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    let err = item_service(&conn)
        .create_item(&TodoItemDraft::new(42, "Milk").unwrap())
        .unwrap_err();
    assert!(
        matches!(&err, ServiceError::NotFound(detail) if detail == "The to-do list does not exist.")
    );
}

#[test]
fn repository_reports_missing_list_as_missing_reference() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTodoItemRepository::try_new(&conn).unwrap();
    let err = repo
        .create_item(&TodoItemDraft::new(42, "Milk").unwrap())
        .unwrap_err();
    assert!(matches!(err, RepoError::MissingReference { id: 42, .. }));
}

#[test]
fn compound_key_requires_matching_list() {
    let conn = open_db_in_memory().unwrap();
    let groceries = seed_list(&conn, "Groceries");
    let chores = seed_list(&conn, "Chores");
    let service = item_service(&conn);
    let milk = service
        .create_item(&TodoItemDraft::new(groceries, "Milk").unwrap())
        .unwrap();

    assert_eq!(
        service.get_item(ItemKey::in_list(groceries, milk.id)).unwrap(),
        milk
    );
    assert_eq!(service.get_item(ItemKey::by_id(milk.id)).unwrap(), milk);

    let err = service
        .get_item(ItemKey::in_list(chores, milk.id))
        .unwrap_err();
    assert!(matches!(&err, ServiceError::NotFound(detail) if detail == "To-do item not found"));

    let patch = TodoItemPatch {
        name: Some("Oat milk".to_string()),
        ..TodoItemPatch::default()
    };
    assert!(service
        .update_item(ItemKey::in_list(chores, milk.id), &patch)
        .is_err());
    assert!(service.delete_item(ItemKey::in_list(chores, milk.id)).is_err());
    assert_eq!(service.get_item(ItemKey::by_id(milk.id)).unwrap().name, "Milk");
}

#[test]
fn partial_update_sets_and_clears_optional_fields() {
    let conn = open_db_in_memory().unwrap();
    let list_id = seed_list(&conn, "Groceries");
    let service = item_service(&conn);
    let item = service
        .create_item(
            &TodoItemDraft::new(list_id, "Milk")
                .unwrap()
                .with_description("2 litres"),
        )
        .unwrap();
    let deadline = NaiveDate::from_ymd_opt(2024, 1, 2)
        .unwrap()
        .and_hms_opt(8, 0, 0)
        .unwrap();

    let with_deadline = service
        .update_item(
            ItemKey::by_id(item.id),
            &TodoItemPatch {
                deadline: Some(Some(deadline)),
                ..TodoItemPatch::default()
            },
        )
        .unwrap();
    assert_eq!(with_deadline.deadline, Some(deadline));
    assert_eq!(with_deadline.description.as_deref(), Some("2 litres"));

    let cleared = service
        .update_item(
            ItemKey::in_list(list_id, item.id),
            &TodoItemPatch {
                description: Some(None),
                ..TodoItemPatch::default()
            },
        )
        .unwrap();
    assert!(cleared.description.is_none());
    assert_eq!(cleared.deadline, Some(deadline));
    assert_eq!(cleared.created_at, item.created_at);
    assert_eq!(service.get_item(ItemKey::by_id(item.id)).unwrap(), cleared);
}

#[test]
fn items_in_list_and_all_items() {
    let conn = open_db_in_memory().unwrap();
    let groceries = seed_list(&conn, "Groceries");
    let chores = seed_list(&conn, "Chores");
    let empty = seed_list(&conn, "Empty");
    let service = item_service(&conn);
    for (list_id, name) in [(groceries, "Milk"), (chores, "Dishes"), (groceries, "Eggs")] {
        service
            .create_item(&TodoItemDraft::new(list_id, name).unwrap())
            .unwrap();
    }

    let in_groceries: Vec<_> = service
        .items_in_list(groceries)
        .unwrap()
        .into_iter()
        .map(|item| item.name)
        .collect();
    assert_eq!(in_groceries, ["Milk", "Eggs"]);
    assert!(service.items_in_list(empty).unwrap().is_empty());
    assert_eq!(service.all_items().unwrap().len(), 3);

    let err = service.items_in_list(999).unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));
}

#[test]
fn delete_by_id_and_by_compound_key() {
    let conn = open_db_in_memory().unwrap();
    let list_id = seed_list(&conn, "Groceries");
    let service = item_service(&conn);
    let milk = service
        .create_item(&TodoItemDraft::new(list_id, "Milk").unwrap())
        .unwrap();
    let eggs = service
        .create_item(&TodoItemDraft::new(list_id, "Eggs").unwrap())
        .unwrap();

    service.delete_item(ItemKey::by_id(milk.id)).unwrap();
    service.delete_item(ItemKey::in_list(list_id, eggs.id)).unwrap();

    assert!(service.items_in_list(list_id).unwrap().is_empty());
    let err = service.delete_item(ItemKey::by_id(milk.id)).unwrap_err();
    assert!(matches!(&err, ServiceError::NotFound(detail) if detail == "ToDoItem not found"));
    assert!(SqliteTodoListRepository::try_new(&conn)
        .unwrap()
        .list_exists(list_id)
        .unwrap());
}

#[test]
fn item_search_matches_name_or_description() {
    let conn = open_db_in_memory().unwrap();
    let list_id = seed_list(&conn, "Groceries");
    let service = item_service(&conn);
    service
        .create_item(&TodoItemDraft::new(list_id, "Buy Milk").unwrap())
        .unwrap();
    service
        .create_item(
            &TodoItemDraft::new(list_id, "Breakfast")
                .unwrap()
                .with_description("cereal with MILK"),
        )
        .unwrap();
    service
        .create_item(&TodoItemDraft::new(list_id, "Bread").unwrap())
        .unwrap();

    let query = SearchQuery::new("milk").unwrap();
    let names: Vec<_> = service
        .search_items(&query)
        .unwrap()
        .into_iter()
        .map(|item| item.name)
        .collect();
    assert_eq!(names, ["Buy Milk", "Breakfast"]);

    let none = SearchQuery::new("tofu").unwrap();
    assert!(service.search_items(&none).unwrap().is_empty());
}

#[test]
fn item_search_folds_case_of_non_ascii_text() {
    let conn = open_db_in_memory().unwrap();
    let list_id = seed_list(&conn, "Épicerie");
    let service = item_service(&conn);
    service
        .create_item(&TodoItemDraft::new(list_id, "CRÈME fraîche").unwrap())
        .unwrap();
    service
        .create_item(
            &TodoItemDraft::new(list_id, "Bread")
                .unwrap()
                .with_description("from the Bäckerei"),
        )
        .unwrap();

    let by_name = SearchQuery::new("crème").unwrap();
    let names: Vec<_> = service
        .search_items(&by_name)
        .unwrap()
        .into_iter()
        .map(|item| item.name)
        .collect();
    assert_eq!(names, ["CRÈME fraîche"]);

    let by_description = SearchQuery::new("BÄCKEREI").unwrap();
    let found = service.search_items(&by_description).unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name, "Bread");
}
