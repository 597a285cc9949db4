use rusqlite::Connection;
use todolist_core::db::open_db_in_memory;
use todolist_core::{
    sqlite_service, ItemRepository, ListPage, ListTarget, ListView, ReadyConnection, RepoError,
    SqliteItemRepository, DEFAULT_ITEM_NAMES, HOME_LIST_NAME,
};

fn rendered(view: ListView) -> ListPage {
    match view {
        ListView::Render(page) => page,
        ListView::Redirect(target) => panic!("expected a page, got redirect to {target:?}"),
    }
}

fn item_names(page: &ListPage) -> Vec<&str> {
    page.items.iter().map(|item| item.name.as_str()).collect()
}

#[test]
fn home_view_seeds_then_renders_defaults() {
    let conn = open_db_in_memory().expect("in-memory store should open");
    let service = sqlite_service(&conn).expect("service should accept migrated connection");

    assert_eq!(
        service.home_view().expect("home_view should succeed"),
        ListView::Redirect(ListTarget::Home)
    );

    let page = rendered(service.home_view().expect("home_view should succeed"));
    assert_eq!(page.list_name, HOME_LIST_NAME);
    assert_eq!(item_names(&page), DEFAULT_ITEM_NAMES);

    let again = rendered(service.home_view().expect("home_view should succeed"));
    assert_eq!(again.items, page.items);
}

#[test]
fn home_view_reseeds_after_every_item_is_deleted() {
    let conn = open_db_in_memory().expect("in-memory store should open");
    let service = sqlite_service(&conn).expect("service should accept migrated connection");
    service.home_view().expect("home_view should succeed");

    for item in rendered(service.home_view().expect("home_view should succeed")).items {
        service.delete_item(item.id, HOME_LIST_NAME).expect("delete_item should succeed");
    }

    assert_eq!(
        service.home_view().expect("home_view should succeed"),
        ListView::Redirect(ListTarget::Home)
    );
    assert_eq!(
        rendered(service.home_view().expect("home_view should succeed")).items.len(),
        DEFAULT_ITEM_NAMES.len()
    );
}

#[test]
fn named_list_view_creates_then_renders_capitalized_list() {
    let conn = open_db_in_memory().expect("in-memory store should open");
    let service = sqlite_service(&conn).expect("service should accept migrated connection");

    assert_eq!(
        service.named_list_view("newlist").expect("named_list_view should succeed"),
        ListView::Redirect(ListTarget::Named("Newlist".to_string()))
    );

    let lower = rendered(service.named_list_view("newlist")
        .expect("named_list_view should succeed"));
    let upper = rendered(service.named_list_view("NEWLIST")
        .expect("named_list_view should succeed"));
    assert_eq!(lower.list_name, "Newlist");
    assert_eq!(item_names(&lower), DEFAULT_ITEM_NAMES);
    assert_eq!(lower, upper);
}

#[test]
fn add_item_to_home_list_uses_flat_collection() {
    let conn = open_db_in_memory().expect("in-memory store should open");
    let service = sqlite_service(&conn).expect("service should accept migrated connection");

    let target = service.add_item("Buy milk", HOME_LIST_NAME).expect("add_item should succeed");
    assert_eq!(target, ListTarget::Home);

    let home = SqliteItemRepository::try_new(&conn)
        .expect("item repo should accept migrated connection");
    let names: Vec<String> = home.list_items()
        .expect("list_items should succeed").into_iter().map(|i| i.name).collect();
    assert_eq!(names, vec!["Buy milk".to_string()]);
}

#[test]
fn add_item_to_named_list_appends_embedded_item() {
    let conn = open_db_in_memory().expect("in-memory store should open");
    let service = sqlite_service(&conn).expect("service should accept migrated connection");
    service.named_list_view("newlist").expect("named_list_view should succeed");

    let target = service.add_item("X", "Newlist").expect("add_item should succeed");
    assert_eq!(target, ListTarget::Named("Newlist".to_string()));

    let page = rendered(service.named_list_view("Newlist")
        .expect("named_list_view should succeed"));
    assert_eq!(item_names(&page).last(), Some(&"X"));

    let home = SqliteItemRepository::try_new(&conn)
        .expect("item repo should accept migrated connection");
    assert!(home.list_items().expect("list_items should succeed").is_empty());
}

#[test]
fn add_item_to_missing_list_fails_without_side_effects() {
    let conn = open_db_in_memory().expect("in-memory store should open");
    let service = sqlite_service(&conn).expect("service should accept migrated connection");

    let err = service
        .add_item("X", "Ghost")
        .expect_err("adding to a missing list should fail");
    assert!(matches!(err, RepoError::ListNotFound(name) if name == "Ghost"));
}

#[test]
fn add_blank_item_is_rejected() {
    let conn = open_db_in_memory().expect("in-memory store should open");
    let service = sqlite_service(&conn).expect("service should accept migrated connection");

    let err = service
        .add_item("   ", HOME_LIST_NAME)
        .expect_err("blank item should be rejected");
    assert!(matches!(err, RepoError::Validation(_)));
}

#[test]
fn delete_item_removes_exactly_that_home_item() {
    let conn = open_db_in_memory().expect("in-memory store should open");
    let service = sqlite_service(&conn).expect("service should accept migrated connection");
    service.home_view().expect("home_view should succeed");
    let before = rendered(service.home_view().expect("home_view should succeed")).items;

    let target = service.delete_item(before[1].id, HOME_LIST_NAME)
        .expect("delete_item should succeed");
    assert_eq!(target, ListTarget::Home);

    let after = rendered(service.home_view().expect("home_view should succeed")).items;
    assert_eq!(after, vec![before[0].clone(), before[2].clone()]);
}

#[test]
fn delete_item_from_named_list_leaves_it_empty_but_present() {
    let conn = open_db_in_memory().expect("in-memory store should open");
    let service = sqlite_service(&conn).expect("service should accept migrated connection");
    service.named_list_view("work").expect("named_list_view should succeed");

    for item in rendered(service.named_list_view("work")
        .expect("named_list_view should succeed")).items {
        let target = service.delete_item(item.id, "Work").expect("delete_item should succeed");
        assert_eq!(target, ListTarget::Named("Work".to_string()));
    }

    let page = rendered(service.named_list_view("work").expect("named_list_view should succeed"));
    assert!(page.items.is_empty());
}

#[test]
fn ready_connection_checks_schema_once_and_serves_repeatedly() {
    let raw = Connection::open_in_memory().expect("raw sqlite connection should open");
    let err = ReadyConnection::try_new(raw).expect_err("unmigrated connection should be rejected");
    assert!(matches!(err, RepoError::UninitializedConnection { .. }));

    let ready = ReadyConnection::try_new(open_db_in_memory().expect("in-memory store should open"))
        .expect("migrated connection should be ready");
    ready
        .service()
        .named_list_view("work")
        .expect("named_list_view should succeed");

    let page = rendered(
        ready
            .service()
            .named_list_view("Work")
            .expect("named_list_view should succeed"),
    );
    assert_eq!(item_names(&page), DEFAULT_ITEM_NAMES);
}
