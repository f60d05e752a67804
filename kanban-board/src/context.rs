//! BoardContext - file-backed storage for boards, lists and cards
//!
//! The context provides storage primitives only. Ordering decisions live in
//! the reorderer and the commands.

use crate::error::{BoardError, Result};
use crate::store::SiblingStore;
use crate::types::{display_order, Board, BoardId, Entity, EntityId};
use async_trait::async_trait;
use fs2::FileExt;
use kanban_position::Positioned;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, warn};
use ulid::Ulid;

/// File-backed [`SiblingStore`].
///
/// Single writes are atomic (temp file + rename) and run under a shared lock,
/// as do group reads. `persist_all` waits for the exclusive lock, stages every
/// file before renaming any, and restores the previous contents if a rename
/// fails partway, so other users of the same root see a group either before
/// or after a bulk write. A process crash between renames can still leave a
/// partially applied group; re-running the rebalance repairs it.
pub struct BoardContext {
    /// Path to the storage root
    root: PathBuf,
}

impl BoardContext {
    /// Create a new context for the given storage root
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Create a context by finding the .kanban directory from a starting path
    pub fn find(start: impl AsRef<Path>) -> Result<Self> {
        let mut current = start.as_ref().to_path_buf();

        loop {
            let kanban_dir = current.join(".kanban");
            if kanban_dir.is_dir() {
                return Ok(Self::new(kanban_dir));
            }

            if !current.pop() {
                return Err(BoardError::NotInitialized {
                    path: start.as_ref().to_path_buf(),
                });
            }
        }
    }

    // =========================================================================
    // Path helpers
    // =========================================================================

    /// Get the storage root
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path to boards directory
    pub fn boards_dir(&self) -> PathBuf {
        self.root.join("boards")
    }

    /// Path to a board's JSON file
    pub fn board_path(&self, id: &BoardId) -> PathBuf {
        self.boards_dir().join(format!("{}.json", id))
    }

    /// Directory holding every entity of one kind
    pub fn entity_dir<E: Entity>(&self) -> PathBuf {
        self.root.join(E::DIR)
    }

    /// Path to an entity's JSON file
    pub fn entity_path<E: Entity>(&self, id: &E::Id) -> PathBuf {
        self.entity_dir::<E>().join(format!("{}.json", id))
    }

    /// Path to the lock file
    pub fn lock_path(&self) -> PathBuf {
        self.root.join(".lock")
    }

    // =========================================================================
    // Directory initialization
    // =========================================================================

    /// Check if all required directories exist
    pub fn directories_exist(&self) -> bool {
        self.root.exists()
            && self.boards_dir().exists()
            && self.root.join("lists").exists()
            && self.root.join("cards").exists()
    }

    /// Create the directory structure. Idempotent.
    pub async fn create_directories(&self) -> Result<()> {
        fs::create_dir_all(&self.root).await?;
        fs::create_dir_all(self.boards_dir()).await?;
        fs::create_dir_all(self.root.join("lists")).await?;
        fs::create_dir_all(self.root.join("cards")).await?;
        Ok(())
    }

    /// Ensure directories exist, creating them if needed
    pub async fn ensure_directories(&self) -> Result<()> {
        if !self.directories_exist() {
            self.create_directories().await?;
        }
        Ok(())
    }

    // =========================================================================
    // Entity I/O
    // =========================================================================

    /// List all ids of one kind by reading its directory
    pub async fn list_ids<E: Entity>(&self) -> Result<Vec<String>> {
        let dir = self.entity_dir::<E>();
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let mut ids = Vec::new();
        let mut entries = fs::read_dir(&dir).await?;

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|s| s.to_str()) == Some("json") {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    ids.push(stem.to_string());
                }
            }
        }

        Ok(ids)
    }

    async fn read_path<E: Entity>(&self, path: &Path) -> Result<E> {
        let content = fs::read_to_string(path).await?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Write the new version of an item next to its final path
    async fn stage<E: Entity>(&self, item: &E) -> Result<Staged> {
        let path = self.entity_path::<E>(item.id());
        let temp = temp_path(&path);

        let previous = match fs::read(&path).await {
            Ok(bytes) => Some(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => return Err(e.into()),
        };

        let content = serde_json::to_string_pretty(item)?;
        if let Err(e) = fs::write(&temp, content).await {
            let _ = fs::remove_file(&temp).await;
            return Err(e.into());
        }

        Ok(Staged {
            path,
            temp,
            previous,
        })
    }

    // =========================================================================
    // Locking
    // =========================================================================

    /// Try to acquire an exclusive lock (non-blocking)
    pub async fn lock(&self) -> Result<BoardLock> {
        let file = self.open_lock_file().await?;

        match file.try_lock_exclusive() {
            Ok(()) => Ok(BoardLock { file }),
            Err(_) => Err(BoardError::LockBusy),
        }
    }

    /// Wait for the lock in the given mode
    async fn acquire(&self, access: Access) -> Result<BoardLock> {
        let file = self.open_lock_file().await?;

        let file = tokio::task::spawn_blocking(move || -> std::io::Result<std::fs::File> {
            match access {
                Access::Shared => FileExt::lock_shared(&file)?,
                Access::Exclusive => FileExt::lock_exclusive(&file)?,
            }
            Ok(file)
        })
        .await
        .map_err(std::io::Error::other)??;

        Ok(BoardLock { file })
    }

    async fn open_lock_file(&self) -> Result<std::fs::File> {
        let lock_path = self.lock_path();

        if let Some(parent) = lock_path.parent() {
            fs::create_dir_all(parent).await?;
        }

        Ok(std::fs::OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&lock_path)?)
    }
}

#[async_trait]
impl SiblingStore for BoardContext {
    async fn read_board(&self, id: &BoardId) -> Result<Board> {
        let path = self.board_path(id);
        if !path.exists() {
            return Err(BoardError::not_found("board", id));
        }

        let content = fs::read_to_string(&path).await?;
        Ok(serde_json::from_str(&content)?)
    }

    async fn write_board(&self, board: &Board) -> Result<()> {
        let content = serde_json::to_string_pretty(board)?;
        atomic_write(&self.board_path(&board.id), content.as_bytes()).await
    }

    async fn read<E: Entity>(&self, id: &E::Id) -> Result<E> {
        let path = self.entity_path::<E>(id);
        if !path.exists() {
            return Err(BoardError::not_found(E::KIND, id));
        }
        self.read_path(&path).await
    }

    async fn fetch_group<E: Entity>(&self, parent: &E::Parent) -> Result<Vec<E>> {
        let _lock = self.acquire(Access::Shared).await?;
        let dir = self.entity_dir::<E>();
        let mut group = Vec::new();

        for id in self.list_ids::<E>().await? {
            let item: E = self.read_path(&dir.join(format!("{}.json", id))).await?;
            if item.parent() == parent {
                group.push(item);
            }
        }

        display_order(&mut group);
        Ok(group)
    }

    async fn persist<E: Entity>(&self, item: &E) -> Result<()> {
        let content = serde_json::to_string_pretty(item)?;
        let _lock = self.acquire(Access::Shared).await?;
        atomic_write(&self.entity_path::<E>(item.id()), content.as_bytes()).await?;
        debug!(kind = E::KIND, id = %item.id(), position = %item.position(), "persisted");
        Ok(())
    }

    async fn persist_all<E: Entity>(&self, items: &[E]) -> Result<()> {
        if items.is_empty() {
            return Ok(());
        }

        let _lock = self.acquire(Access::Exclusive).await?;
        fs::create_dir_all(self.entity_dir::<E>()).await?;

        let mut staged = Vec::with_capacity(items.len());
        for item in items {
            match self.stage(item).await {
                Ok(file) => staged.push(file),
                Err(e) => {
                    discard(&staged).await;
                    return Err(e);
                }
            }
        }

        for (i, file) in staged.iter().enumerate() {
            if let Err(e) = fs::rename(&file.temp, &file.path).await {
                warn!(
                    kind = E::KIND,
                    path = %file.path.display(),
                    error = %e,
                    "group write failed partway, restoring previous contents"
                );
                restore(&staged[..i]).await;
                discard(&staged[i..]).await;
                return Err(e.into());
            }
        }

        debug!(kind = E::KIND, count = items.len(), "persisted group");
        Ok(())
    }

    async fn remove<E: Entity>(&self, id: &E::Id) -> Result<()> {
        let _lock = self.acquire(Access::Shared).await?;
        let path = self.entity_path::<E>(id);
        if !path.exists() {
            return Err(BoardError::not_found(E::KIND, id));
        }
        fs::remove_file(&path).await?;
        debug!(kind = E::KIND, id = id.as_str(), "removed");
        Ok(())
    }
}

/// How a storage operation holds the root lock
#[derive(Debug, Clone, Copy)]
enum Access {
    /// Group reads and single-item writes
    Shared,
    /// Bulk group writes
    Exclusive,
}

/// RAII lock guard - releases on drop
pub struct BoardLock {
    file: std::fs::File,
}

impl Drop for BoardLock {
    fn drop(&mut self) {
        let _ = FileExt::unlock(&self.file);
    }
}

/// A group member written to its temp path but not yet renamed into place
struct Staged {
    path: PathBuf,
    temp: PathBuf,
    previous: Option<Vec<u8>>,
}

/// Remove temp files that will never be committed
async fn discard(staged: &[Staged]) {
    for file in staged {
        let _ = fs::remove_file(&file.temp).await;
    }
}

/// Put committed files back the way they were
async fn restore(committed: &[Staged]) {
    for file in committed {
        let result = match &file.previous {
            Some(bytes) => atomic_write(&file.path, bytes).await,
            None => fs::remove_file(&file.path).await.map_err(Into::into),
        };
        if let Err(e) = result {
            warn!(path = %file.path.display(), error = %e, "failed to restore file");
        }
    }
}

/// Staging path unique to one write, e.g. `{id}.{ulid}.tmp`
fn temp_path(path: &Path) -> PathBuf {
    path.with_extension(format!("{}.tmp", Ulid::new()))
}

/// Atomic write via temp file and rename
async fn atomic_write(path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await?;
    }

    let temp = temp_path(path);
    if let Err(e) = fs::write(&temp, content).await {
        let _ = fs::remove_file(&temp).await;
        return Err(e.into());
    }
    if let Err(e) = fs::rename(&temp, path).await {
        let _ = fs::remove_file(&temp).await;
        return Err(e.into());
    }

    Ok(())
}
