use pocket_tasks::{NewTask, TaskStatus, TaskStore, SortOrder};
use pocket_tasks::config::StoreConfig;
use pocket_tasks::sort::sorted;
use pocket_tasks::storage::FolderStorage;


#[tokio::main]
async fn main() {
    env_logger::init();

    let config = StoreConfig::from_env();
    let store = TaskStore::with_key(FolderStorage::new(&config.folder), &config.tasks_key);

    println!("---- before -----");
    pocket_tasks::utils::print_task_list(&store.list().await);

    let input = NewTask::new(
        String::from("Buy milk"),
        Some(String::from("Semi-skimmed")),
        chrono::Utc::now() + chrono::Duration::hours(2),
        String::from("Store"),
    );
    if let Err(err) = input.validate() {
        log::error!("{}", err);
        return;
    }

    let task = match store.create(input).await {
        Ok(task) => task,
        Err(err) => {
            log::error!("Unable to save the task: {}", err);
            return;
        }
    };
    if let Err(err) = store.update_status(task.id(), TaskStatus::InProgress).await {
        log::error!("Unable to update task {}: {}", task.id(), err);
    }

    let tasks = store.list().await;
    println!("---- by date -----");
    pocket_tasks::utils::print_task_list(&sorted(&tasks, SortOrder::Date));
    println!("---- by status -----");
    pocket_tasks::utils::print_task_list(&sorted(&tasks, SortOrder::Status));
}
