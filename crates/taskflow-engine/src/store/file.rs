//! Durable task store backed by JSON documents on disk.
//!
//! Layout under the root directory:
//! - `tasks/<task_id>.json`
//! - `executions/<execution_id>.json`
//!
//! Each write lands in a temporary file first and is then renamed over the
//! target, so readers never observe a half-written document.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

use taskflow_core::{ExecutionId, Task, TaskExecution, TaskId};

use super::{sort_newest_first, sort_tasks_newest_first, StoreError, TaskStore};

const TASKS_DIR: &str = "tasks";
const EXECUTIONS_DIR: &str = "executions";

/// Task store persisting each record as a JSON file.
pub struct FileTaskStore {
    root: PathBuf,
}

impl FileTaskStore {
    /// Open (and create if missing) a store rooted at `root`.
    pub async fn open(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        fs::create_dir_all(root.join(TASKS_DIR)).await?;
        fs::create_dir_all(root.join(EXECUTIONS_DIR)).await?;
        debug!(root = %root.display(), "Opened file task store");
        Ok(Self { root })
    }

    /// Root directory of this store.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn document_path(&self, collection: &str, id: &str) -> Option<PathBuf> {
        // Ids arrive from callers; refuse anything that could escape the collection.
        if id.is_empty() || id.contains(['/', '\\']) || id.starts_with('.') {
            return None;
        }
        Some(self.root.join(collection).join(format!("{id}.json")))
    }

    async fn write_document<T: Serialize>(
        &self,
        collection: &str,
        id: &str,
        value: &T,
    ) -> Result<(), StoreError> {
        let path = self
            .document_path(collection, id)
            .ok_or_else(|| StoreError::Backend(format!("invalid document id: {id}")))?;
        let bytes = serde_json::to_vec_pretty(value)?;

        let tmp_path = path.with_extension(format!("json.{}.tmp", uuid::Uuid::new_v4()));
        let mut file = fs::File::create(&tmp_path).await?;
        file.write_all(&bytes).await?;
        file.sync_all().await?;
        drop(file);

        if let Err(e) = fs::rename(&tmp_path, &path).await {
            let _ = fs::remove_file(&tmp_path).await;
            return Err(e.into());
        }
        Ok(())
    }

    async fn read_document<T: DeserializeOwned>(
        &self,
        collection: &str,
        id: &str,
    ) -> Result<Option<T>, StoreError> {
        let Some(path) = self.document_path(collection, id) else {
            return Ok(None);
        };
        match fs::read(&path).await {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn read_collection<T: DeserializeOwned>(
        &self,
        collection: &str,
    ) -> Result<Vec<T>, StoreError> {
        let mut entries = fs::read_dir(self.root.join(collection)).await?;
        let mut documents = Vec::new();

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            let bytes = match fs::read(&path).await {
                Ok(bytes) => bytes,
                // Removed between listing and reading.
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => continue,
                Err(e) => return Err(e.into()),
            };
            match serde_json::from_slice(&bytes) {
                Ok(doc) => documents.push(doc),
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Skipping unreadable document");
                }
            }
        }

        Ok(documents)
    }

    async fn remove_document(&self, collection: &str, id: &str) -> Result<bool, StoreError> {
        let Some(path) = self.document_path(collection, id) else {
            return Ok(false);
        };
        match fs::remove_file(&path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait]
impl TaskStore for FileTaskStore {
    async fn save_task(&self, task: &Task) -> Result<(), StoreError> {
        self.write_document(TASKS_DIR, task.id.as_str(), task).await
    }

    async fn get_task(&self, id: &TaskId) -> Result<Option<Task>, StoreError> {
        self.read_document(TASKS_DIR, id.as_str()).await
    }

    async fn list_tasks(&self) -> Result<Vec<Task>, StoreError> {
        let mut tasks: Vec<Task> = self.read_collection(TASKS_DIR).await?;
        sort_tasks_newest_first(&mut tasks);
        Ok(tasks)
    }

    async fn delete_task(&self, id: &TaskId) -> Result<bool, StoreError> {
        let removed = self.remove_document(TASKS_DIR, id.as_str()).await?;
        if removed {
            for exec in self.list_executions_for_task(id).await? {
                self.remove_document(EXECUTIONS_DIR, exec.id.as_str())
                    .await?;
            }
        }
        Ok(removed)
    }

    async fn save_execution(&self, execution: &TaskExecution) -> Result<(), StoreError> {
        self.write_document(EXECUTIONS_DIR, execution.id.as_str(), execution)
            .await
    }

    async fn get_execution(&self, id: &ExecutionId) -> Result<Option<TaskExecution>, StoreError> {
        self.read_document(EXECUTIONS_DIR, id.as_str()).await
    }

    async fn list_executions(&self) -> Result<Vec<TaskExecution>, StoreError> {
        let mut executions: Vec<TaskExecution> = self.read_collection(EXECUTIONS_DIR).await?;
        sort_newest_first(&mut executions);
        Ok(executions)
    }

    async fn list_executions_for_task(
        &self,
        task_id: &TaskId,
    ) -> Result<Vec<TaskExecution>, StoreError> {
        let mut executions: Vec<TaskExecution> = self
            .read_collection::<TaskExecution>(EXECUTIONS_DIR)
            .await?
            .into_iter()
            .filter(|exec| &exec.task_id == task_id)
            .collect();
        sort_newest_first(&mut executions);
        Ok(executions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use serde_json::{json, Value};
    use taskflow_core::{ExecutionStatus, TaskMetadata, TaskType};

    fn sample_task() -> Task {
        Task::new(
            "nightly report",
            TaskType::EmailSend,
            json!({ "to": "ops@example.com" }),
            TaskMetadata::default(),
        )
    }

    #[tokio::test]
    async fn test_task_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let task = sample_task();

        {
            let store = FileTaskStore::open(dir.path()).await.unwrap();
            store.save_task(&task).await.unwrap();
        }

        let store = FileTaskStore::open(dir.path()).await.unwrap();
        let loaded = store.get_task(&task.id).await.unwrap();
        assert_eq!(loaded, Some(task));
    }

    #[tokio::test]
    async fn test_save_execution_overwrites_document() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTaskStore::open(dir.path()).await.unwrap();

        let mut exec = TaskExecution::start(TaskId::new("t1"), None);
        store.save_execution(&exec).await.unwrap();
        exec.complete(json!({ "sent": true })).unwrap();
        store.save_execution(&exec).await.unwrap();

        let loaded = store.get_execution(&exec.id).await.unwrap().unwrap();
        assert_eq!(loaded.status, ExecutionStatus::Completed);
        assert_eq!(loaded.output, Some(json!({ "sent": true })));
    }

    #[tokio::test]
    async fn test_executions_by_task_newest_first() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTaskStore::open(dir.path()).await.unwrap();
        let task_id = TaskId::new("t1");

        let mut first = TaskExecution::start(task_id.clone(), None);
        first.started_at = first.started_at - Duration::seconds(5);
        let second = TaskExecution::start(task_id.clone(), None);

        store.save_execution(&first).await.unwrap();
        store.save_execution(&second).await.unwrap();
        store
            .save_execution(&TaskExecution::start(TaskId::new("t2"), None))
            .await
            .unwrap();

        let listed = store.list_executions_for_task(&task_id).await.unwrap();
        let ids: Vec<_> = listed.iter().map(|e| e.id.clone()).collect();
        assert_eq!(ids, vec![second.id, first.id]);
    }

    #[tokio::test]
    async fn test_list_executions_reads_whole_collection() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTaskStore::open(dir.path()).await.unwrap();

        let mut done = TaskExecution::start(TaskId::new("t1"), None);
        done.complete(json!(null)).unwrap();
        store.save_execution(&done).await.unwrap();
        store
            .save_execution(&TaskExecution::start(TaskId::new("t2"), None))
            .await
            .unwrap();

        let all = store.list_executions().await.unwrap();
        assert_eq!(all.len(), 2);
        let loaded = all.iter().find(|e| e.id == done.id).unwrap();
        assert_eq!(loaded.output, Some(Value::Null));
    }

    #[tokio::test]
    async fn test_path_like_ids_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTaskStore::open(dir.path()).await.unwrap();

        let loaded = store.get_task(&TaskId::new("../escape")).await.unwrap();
        assert!(loaded.is_none());

        let task = sample_task().with_id(TaskId::new("a/b"));
        assert!(matches!(
            store.save_task(&task).await,
            Err(StoreError::Backend(_))
        ));
    }

    #[tokio::test]
    async fn test_delete_task_removes_documents() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTaskStore::open(dir.path()).await.unwrap();
        let task = sample_task();
        let exec = TaskExecution::start(task.id.clone(), None);

        store.save_task(&task).await.unwrap();
        store.save_execution(&exec).await.unwrap();

        assert!(store.delete_task(&task.id).await.unwrap());
        assert!(store.get_task(&task.id).await.unwrap().is_none());
        assert!(store.get_execution(&exec.id).await.unwrap().is_none());
        assert!(store.list_tasks().await.unwrap().is_empty());
    }
}
