//! Scenarios that check the task store behaves correctly over a real storage

use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use pocket_tasks::TaskStore;
use pocket_tasks::{NewTask, Task, TaskId, TaskStatus};
use pocket_tasks::SortOrder;
use pocket_tasks::sort::sorted;
use pocket_tasks::traits::KeyValueStorage;
use pocket_tasks::storage::{FolderStorage, MemoryStorage};
use pocket_tasks::mock_behaviour::MockBehaviour;
use pocket_tasks::config::DEFAULT_TASKS_KEY;


fn new_task(title: &str, location: &str, date_time: &str) -> NewTask {
    NewTask::new(
        title.to_string(),
        None,
        date_time.parse().unwrap(),
        location.to_string(),
    )
}

fn temp_folder(name: &str) -> PathBuf {
    let random = uuid::Uuid::new_v4().to_hyphenated().to_string();
    std::env::temp_dir().join(format!("pocket-tasks-{}-{}", name, random))
}


#[tokio::test]
async fn test_create_update_delete_scenario() {
    let _ = env_logger::builder().is_test(true).try_init();

    let store = TaskStore::new(MemoryStorage::new());

    let created = store.create(new_task("Buy milk", "Store", "2024-01-01T10:00:00Z")).await.unwrap();
    assert_eq!(created.status(), TaskStatus::Pending);
    assert!(created.id().as_str().is_empty() == false);
    assert_eq!(created.description(), "");
    assert_eq!(created.date_time(), &"2024-01-01T10:00:00Z".parse::<chrono::DateTime<chrono::Utc>>().unwrap());

    let id = created.id().clone();
    assert_eq!(store.get_by_id(&id).await, Some(created.clone()));

    store.update_status(&id, TaskStatus::Completed).await.unwrap();
    assert_eq!(store.get_by_id(&id).await.unwrap().status(), TaskStatus::Completed);

    store.delete(&id).await.unwrap();
    assert_eq!(store.get_by_id(&id).await, None);
    assert!(store.list().await.iter().all(|task| task.id() != &id));
}

#[tokio::test]
async fn test_every_create_gets_a_distinct_id() {
    let _ = env_logger::builder().is_test(true).try_init();

    let store = TaskStore::new(MemoryStorage::new());
    let n_tasks = 50;
    for _ in 0..n_tasks {
        // Identical input every time
        store.create(new_task("Water plants", "Balcony", "2024-05-05T07:00:00Z")).await.unwrap();
    }

    let tasks = store.list().await;
    assert_eq!(tasks.len(), n_tasks);
    let ids: HashSet<&TaskId> = tasks.iter().map(|task| task.id()).collect();
    assert_eq!(ids.len(), n_tasks);
    assert!(tasks.iter().all(|task| task.status() == TaskStatus::Pending));
}

#[tokio::test]
async fn test_update_status_only_changes_status() {
    let _ = env_logger::builder().is_test(true).try_init();

    let store = TaskStore::new(MemoryStorage::new());
    let mut input = new_task(" Dentist ", " Main street ", "2024-02-02T14:30:00Z");
    input.description = Some(String::from(" yearly check-up "));
    let before = store.create(input).await.unwrap();
    let other = store.create(new_task("Gym", "Gym", "2024-02-03T18:00:00Z")).await.unwrap();

    for status in TaskStatus::ALL.iter().rev() {
        store.update_status(before.id(), *status).await.unwrap();

        let after = store.get_by_id(before.id()).await.unwrap();
        assert_eq!(after.status(), *status);
        assert_eq!(after.id(), before.id());
        assert_eq!(after.title(), "Dentist");
        assert_eq!(after.description(), "yearly check-up");
        assert_eq!(after.location(), "Main street");
        assert_eq!(after.date_time(), before.date_time());
        assert_eq!(after.created_at(), before.created_at());
    }

    // The other task is untouched
    assert_eq!(store.get_by_id(other.id()).await, Some(other));
}

#[tokio::test]
async fn test_unknown_ids_are_no_ops() {
    let _ = env_logger::builder().is_test(true).try_init();

    let store = TaskStore::new(MemoryStorage::new());
    store.create(new_task("A", "Here", "2024-01-01T10:00:00Z")).await.unwrap();
    store.create(new_task("B", "There", "2024-01-01T11:00:00Z")).await.unwrap();
    let before = store.list().await;

    let unknown = TaskId::from("this-id-does-not-exist");
    store.update_status(&unknown, TaskStatus::Cancelled).await.unwrap();
    assert_eq!(store.list().await, before);

    store.delete(&unknown).await.unwrap();
    assert_eq!(store.list().await, before);
}

#[tokio::test]
async fn test_delete_removes_exactly_one_task() {
    let _ = env_logger::builder().is_test(true).try_init();

    let store = TaskStore::new(MemoryStorage::new());
    let mut created = Vec::new();
    for title in &["A", "B", "C"] {
        created.push(store.create(new_task(title, "Here", "2024-01-01T10:00:00Z")).await.unwrap());
    }

    store.delete(created[1].id()).await.unwrap();
    let remaining = store.list().await;
    assert_eq!(remaining, vec![created[0].clone(), created[2].clone()]);
}

#[tokio::test]
async fn test_clear() {
    let _ = env_logger::builder().is_test(true).try_init();

    let storage = MemoryStorage::new();
    let store = TaskStore::new(storage.clone());
    store.create(new_task("A", "Here", "2024-01-01T10:00:00Z")).await.unwrap();

    store.clear().await.unwrap();
    assert!(store.list().await.is_empty());
    assert_eq!(storage.get(DEFAULT_TASKS_KEY).await.unwrap(), None);

    // Clearing an empty store is fine
    store.clear().await.unwrap();
}

#[tokio::test]
async fn test_corrupt_data_reads_as_empty() {
    let _ = env_logger::builder().is_test(true).try_init();

    let storage = MemoryStorage::new();
    let store = TaskStore::new(storage.clone());

    for corrupt in &["not json at all", "{\"id\": \"1\"}", "[{\"id\": \"1\", \"status\": \"Done\"}]"] {
        storage.set(DEFAULT_TASKS_KEY, corrupt).await.unwrap();
        assert!(store.list().await.is_empty());
        assert_eq!(store.get_by_id(&TaskId::from("1")).await, None);
    }

    // The next write replaces the corrupt data
    let task = store.create(new_task("A", "Here", "2024-01-01T10:00:00Z")).await.unwrap();
    assert_eq!(store.list().await, vec![task]);
}

#[tokio::test]
async fn test_data_from_older_clients_loads() {
    let _ = env_logger::builder().is_test(true).try_init();

    let storage = MemoryStorage::new();
    let legacy = r#"[
        {"id":"1704103200000123","title":"Buy milk","description":"","dateTime":"2024-01-01T10:00:00.000Z","location":"Store","status":"In Progress","createdAt":"2023-12-31T08:30:00.000Z"},
        {"id":"1704103200001777","title":"Call mom","dateTime":"2024-01-02T19:00:00.000Z","location":"Home","status":"Pending","createdAt":"2023-12-31T09:00:00.000Z"}
    ]"#;
    storage.set(DEFAULT_TASKS_KEY, legacy).await.unwrap();

    let store = TaskStore::new(storage);
    let tasks = store.list().await;
    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[0].status(), TaskStatus::InProgress);
    assert_eq!(tasks[1].description(), "");

    store.update_status(&TaskId::from("1704103200001777"), TaskStatus::Completed).await.unwrap();
    let updated = store.get_by_id(&TaskId::from("1704103200001777")).await.unwrap();
    assert_eq!(updated.status(), TaskStatus::Completed);
    assert_eq!(updated.title(), "Call mom");
}

#[tokio::test]
async fn test_failed_create_keeps_previous_tasks() {
    let _ = env_logger::builder().is_test(true).try_init();

    let behaviour = Arc::new(Mutex::new(MockBehaviour::new()));
    let store = TaskStore::new(MemoryStorage::with_mock_behaviour(Arc::clone(&behaviour)));
    let first = store.create(new_task("A", "Here", "2024-01-01T10:00:00Z")).await.unwrap();

    *behaviour.lock().unwrap() = MockBehaviour::fail_writes(1);
    let input = new_task("B", "There", "2024-01-01T11:00:00Z");
    assert!(store.create(input.clone()).await.is_err());
    assert_eq!(store.list().await, vec![first.clone()]);

    // Retrying with the same input works
    let second = store.create(input).await.unwrap();
    assert_eq!(store.list().await, vec![first, second]);
}

#[tokio::test]
async fn test_round_trip_through_folder_storage() {
    let _ = env_logger::builder().is_test(true).try_init();

    let folder = temp_folder("round-trip");
    let store = TaskStore::new(FolderStorage::new(&folder));
    let a = store.create(new_task("A", "Here", "2024-01-01T10:00:00Z")).await.unwrap();
    let b = store.create(new_task("B", "There", "2024-01-01T11:00:00Z")).await.unwrap();
    store.update_status(b.id(), TaskStatus::InProgress).await.unwrap();
    let expected = store.list().await;
    drop(store);

    // A brand new store on the same folder reads the same content
    let reopened = TaskStore::new(FolderStorage::new(&folder));
    let tasks = reopened.list().await;
    assert_eq!(tasks, expected);
    assert_eq!(tasks[0], a);
    assert_eq!(tasks[1].status(), TaskStatus::InProgress);

    reopened.clear().await.unwrap();
    assert!(reopened.list().await.is_empty());
    std::fs::remove_dir_all(&folder).ok();
}

#[tokio::test]
async fn test_concurrent_mutations_are_serialized() {
    let _ = env_logger::builder().is_test(true).try_init();

    let folder = temp_folder("concurrent");
    let store = TaskStore::new(FolderStorage::new(&folder));
    let seed = store.create(new_task("Seed", "Here", "2024-01-01T10:00:00Z")).await.unwrap();

    let (r1, r2, r3, r4) = tokio::join!(
        store.create(new_task("A", "Here", "2024-01-01T10:00:00Z")),
        store.create(new_task("B", "Here", "2024-01-01T10:00:00Z")),
        store.update_status(seed.id(), TaskStatus::Completed),
        store.create(new_task("C", "Here", "2024-01-01T10:00:00Z")),
    );
    r1.unwrap();
    r2.unwrap();
    r3.unwrap();
    r4.unwrap();

    let tasks = store.list().await;
    assert_eq!(tasks.len(), 4);
    assert_eq!(store.get_by_id(seed.id()).await.unwrap().status(), TaskStatus::Completed);
    std::fs::remove_dir_all(&folder).ok();
}

#[tokio::test]
async fn test_sorted_listing() {
    let _ = env_logger::builder().is_test(true).try_init();

    let store = TaskStore::new(MemoryStorage::new());
    let mut created: Vec<Task> = Vec::new();
    for title in &["first", "second", "third"] {
        created.push(store.create(new_task(title, "Here", "2024-01-01T10:00:00Z")).await.unwrap());
        // Make sure creation dates differ
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    }
    store.update_status(created[0].id(), TaskStatus::InProgress).await.unwrap();
    store.update_status(created[2].id(), TaskStatus::Cancelled).await.unwrap();

    let tasks = store.list().await;
    let titles = |tasks: &[Task]| tasks.iter().map(|t| t.title().to_string()).collect::<Vec<_>>();
    assert_eq!(titles(&sorted(&tasks, SortOrder::Date)), vec!["third", "second", "first"]);
    assert_eq!(titles(&sorted(&tasks, SortOrder::Status)), vec!["second", "first", "third"]);
}

#[tokio::test]
async fn test_listing_while_updating_on_folder_storage() {
    let _ = env_logger::builder().is_test(true).try_init();

    let folder = temp_folder("list-while-updating");
    let store = TaskStore::new(FolderStorage::new(&folder));
    let mut created = Vec::new();
    for i in 0..300 {
        let title = format!("Task {}", i);
        created.push(store.create(new_task(&title, "Here", "2024-01-01T10:00:00Z")).await.unwrap());
    }

    let writer = async {
        for (i, task) in created.iter().enumerate().take(60) {
            let status = TaskStatus::ALL[i % TaskStatus::ALL.len()];
            store.update_status(task.id(), status).await.unwrap();
        }
    };
    let reader = async {
        for _ in 0..100 {
            assert_eq!(store.list().await.len(), created.len());
            tokio::task::yield_now().await;
        }
    };
    tokio::join!(writer, reader);

    std::fs::remove_dir_all(&folder).ok();
}

#[tokio::test]
async fn test_similar_keys_on_folder_storage() {
    let _ = env_logger::builder().is_test(true).try_init();

    let folder = temp_folder("similar-keys");
    let work = TaskStore::with_key(FolderStorage::new(&folder), "work/tasks");
    let home = TaskStore::with_key(FolderStorage::new(&folder), "worktasks");

    assert!(work.create(new_task("Report", "Office", "2024-01-01T10:00:00Z")).await.is_err());
    let chore = home.create(new_task("Dishes", "Kitchen", "2024-01-01T10:00:00Z")).await.unwrap();
    assert!(work.list().await.is_empty());
    assert_eq!(home.list().await, vec![chore]);

    std::fs::remove_dir_all(&folder).ok();
}
