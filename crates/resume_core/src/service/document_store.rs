//! Document store use-case service.
//!
//! # Responsibility
//! - Own the single live `ResumeDocument`.
//! - Expose field, list, and bullet mutations plus import/export.
//! - Mirror every committed mutation to local storage.
//!
//! # Invariants
//! - Mutations run against a copy of the current snapshot; the copy becomes
//!   the live document only after it has been persisted. A failed edit or a
//!   failed write leaves both memory and storage at the prior snapshot.
//! - Indices always refer to the snapshot the edit is applied to. Entries
//!   have no stable identity.
//! - Loading never fails: absent or unreadable storage yields the sample
//!   document.
//! - Logs carry list names, indices and byte counts only, never field text.

use crate::config::STORAGE_KEY;
use crate::model::address::{FieldPath, ListItem, ListName, NEW_BULLET_TEXT};
use crate::model::resume::ResumeDocument;
use crate::repo::storage_repo::{RepoError, StorageRepository};
use crate::transfer::json::{self as transfer, TransferError};
use log::{debug, error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub type StoreResult<T> = Result<T, StoreError>;

/// Document store error.
#[derive(Debug)]
pub enum StoreError {
    /// A field path does not resolve against the current document.
    InvalidPath(String),
    /// A list or bullet index is outside `[0, len)`.
    IndexOutOfRange {
        target: String,
        index: usize,
        len: usize,
    },
    /// An updater returned an item belonging to another list.
    ItemShapeMismatch { expected: ListName, found: ListName },
    /// Local storage rejected the write.
    Storage(RepoError),
    /// Import/export failure.
    Transfer(TransferError),
}

impl StoreError {
    fn code(&self) -> &'static str {
        match self {
            Self::InvalidPath(_) => "invalid_path",
            Self::IndexOutOfRange { .. } => "index_out_of_range",
            Self::ItemShapeMismatch { .. } => "item_shape_mismatch",
            Self::Storage(_) => "storage_failed",
            Self::Transfer(err) => transfer::error_code(err),
        }
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidPath(path) => write!(f, "path does not resolve: `{path}`"),
            Self::IndexOutOfRange { target, index, len } => {
                write!(f, "index {index} out of range for `{target}` (len {len})")
            }
            Self::ItemShapeMismatch { expected, found } => {
                write!(f, "expected a `{expected}` item, got a `{found}` item")
            }
            Self::Storage(err) => write!(f, "{err}"),
            Self::Transfer(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            Self::Transfer(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for StoreError {
    fn from(value: RepoError) -> Self {
        Self::Storage(value)
    }
}

impl From<TransferError> for StoreError {
    fn from(value: TransferError) -> Self {
        Self::Transfer(value)
    }
}

/// One document mutation, addressed against the snapshot it is applied to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentEdit {
    SetField {
        path: FieldPath,
        value: String,
    },
    AppendItem(ListItem),
    RemoveItem {
        list: ListName,
        index: usize,
    },
    /// Replaces the element at `index` of the list `item` belongs to.
    ReplaceItem {
        index: usize,
        item: ListItem,
    },
    AppendBullet {
        list: ListName,
        entry: usize,
        text: String,
    },
    RemoveBullet {
        list: ListName,
        entry: usize,
        bullet: usize,
    },
    UpdateBullet {
        list: ListName,
        entry: usize,
        bullet: usize,
        text: String,
    },
}

impl DocumentEdit {
    fn op(&self) -> &'static str {
        match self {
            Self::SetField { .. } => "set_field",
            Self::AppendItem(_) => "append_item",
            Self::RemoveItem { .. } => "remove_item",
            Self::ReplaceItem { .. } => "replace_item",
            Self::AppendBullet { .. } => "append_bullet",
            Self::RemoveBullet { .. } => "remove_bullet",
            Self::UpdateBullet { .. } => "update_bullet",
        }
    }

    /// Applies the edit in place.
    ///
    /// # Contract
    /// - On error `document` is left untouched.
    pub fn apply_to(self, document: &mut ResumeDocument) -> StoreResult<()> {
        match self {
            Self::SetField { path, value } => {
                let slot = document
                    .field_mut(&path)
                    .ok_or_else(|| StoreError::InvalidPath(path.to_string()))?;
                *slot = value;
            }
            Self::AppendItem(item) => document.push_item(item),
            Self::RemoveItem { list, index } => {
                let len = document.list_len(list);
                document
                    .remove_item(list, index)
                    .ok_or_else(|| out_of_range(list.as_str(), index, len))?;
            }
            Self::ReplaceItem { index, item } => {
                let list = item.list();
                let len = document.list_len(list);
                document
                    .replace_item(index, item)
                    .map_err(|_| out_of_range(list.as_str(), index, len))?;
            }
            Self::AppendBullet { list, entry, text } => {
                bullets_of(document, list, entry)?.push(text);
            }
            Self::RemoveBullet {
                list,
                entry,
                bullet,
            } => {
                let bullets = bullets_of(document, list, entry)?;
                if bullet >= bullets.len() {
                    return Err(out_of_range(
                        &format!("{list}.{entry}.bullets"),
                        bullet,
                        bullets.len(),
                    ));
                }
                bullets.remove(bullet);
            }
            Self::UpdateBullet {
                list,
                entry,
                bullet,
                text,
            } => {
                let bullets = bullets_of(document, list, entry)?;
                let len = bullets.len();
                let slot = bullets
                    .get_mut(bullet)
                    .ok_or_else(|| out_of_range(&format!("{list}.{entry}.bullets"), bullet, len))?;
                *slot = text;
            }
        }
        Ok(())
    }
}

fn bullets_of(
    document: &mut ResumeDocument,
    list: ListName,
    entry: usize,
) -> StoreResult<&mut Vec<String>> {
    if !list.has_bullets() {
        return Err(StoreError::InvalidPath(format!("{list}.{entry}.bullets")));
    }
    let len = document.list_len(list);
    document
        .bullets_mut(list, entry)
        .ok_or_else(|| out_of_range(list.as_str(), entry, len))
}

fn out_of_range(target: &str, index: usize, len: usize) -> StoreError {
    StoreError::IndexOutOfRange {
        target: target.to_string(),
        index,
        len,
    }
}

/// Reads the stored document, degrading to the sample document.
///
/// Absent keys, storage failures, and values that do not import (including
/// a stored `null`) all yield [`ResumeDocument::sample`].
pub fn load_document<R: StorageRepository + ?Sized>(repo: &R, key: &str) -> ResumeDocument {
    let stored = match repo.get_item(key) {
        Ok(Some(value)) => value,
        Ok(None) => {
            info!("event=document_load module=store status=ok source=default reason=absent");
            return ResumeDocument::sample();
        }
        Err(err) => {
            warn!(
                "event=document_load module=store status=degraded source=default reason=storage_error error={err}"
            );
            return ResumeDocument::sample();
        }
    };

    match transfer::import_document(stored.as_bytes()) {
        Ok(document) => {
            info!(
                "event=document_load module=store status=ok source=storage bytes={}",
                stored.len()
            );
            document
        }
        Err(err) => {
            warn!(
                "event=document_load module=store status=degraded source=default reason={} bytes={}",
                transfer::error_code(&err),
                stored.len()
            );
            ResumeDocument::sample()
        }
    }
}

/// Owner of the live document and its storage mirror.
pub struct DocumentStore<R: StorageRepository> {
    repo: R,
    storage_key: String,
    document: ResumeDocument,
}

impl<R: StorageRepository> DocumentStore<R> {
    /// Loads the document stored under [`STORAGE_KEY`].
    pub fn load(repo: R) -> Self {
        Self::load_with_key(repo, STORAGE_KEY)
    }

    /// Loads the document stored under `storage_key`.
    pub fn load_with_key(repo: R, storage_key: impl Into<String>) -> Self {
        let storage_key = storage_key.into();
        let document = load_document(&repo, &storage_key);
        Self {
            repo,
            storage_key,
            document,
        }
    }

    pub fn document(&self) -> &ResumeDocument {
        &self.document
    }

    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Applies one edit and persists the result.
    pub fn apply(&mut self, edit: DocumentEdit) -> StoreResult<()> {
        let op = edit.op();
        self.commit_with(op, |next| edit.apply_to(next))
    }

    /// Applies `edits` in order against one snapshot and persists once.
    ///
    /// # Contract
    /// - All-or-nothing: the first failing edit aborts the batch.
    /// - Later edits see the effect of earlier ones, so two updates of the
    ///   same field resolve last-write-wins.
    pub fn apply_all<I>(&mut self, edits: I) -> StoreResult<()>
    where
        I: IntoIterator<Item = DocumentEdit>,
    {
        self.commit_with("apply_all", |next| {
            edits
                .into_iter()
                .try_for_each(|edit| edit.apply_to(next))
        })
    }

    /// Sets a scalar field addressed by a dotted path such as `basics.email`.
    ///
    /// # Errors
    /// - `InvalidPath` when the path is malformed or any segment (including
    ///   a list index) does not exist in the current document.
    pub fn set_field(&mut self, path: &str, value: impl Into<String>) -> StoreResult<()> {
        let Some(parsed) = FieldPath::parse(path) else {
            warn!("event=document_edit module=store status=error op=set_field error_code=invalid_path");
            return Err(StoreError::InvalidPath(path.to_string()));
        };
        self.set(parsed, value)
    }

    /// Typed counterpart of [`DocumentStore::set_field`].
    pub fn set(&mut self, path: FieldPath, value: impl Into<String>) -> StoreResult<()> {
        self.apply(DocumentEdit::SetField {
            path,
            value: value.into(),
        })
    }

    /// Appends `item` at the tail of its list.
    pub fn append_item(&mut self, item: ListItem) -> StoreResult<()> {
        self.apply(DocumentEdit::AppendItem(item))
    }

    /// Appends the placeholder item of `list`.
    pub fn append_template(&mut self, list: ListName) -> StoreResult<()> {
        self.append_item(ListItem::template(list))
    }

    /// Removes the element at `index`; later elements shift down by one.
    pub fn remove_item(&mut self, list: ListName, index: usize) -> StoreResult<()> {
        self.apply(DocumentEdit::RemoveItem { list, index })
    }

    /// Replaces the element at `index` with `updater(current)`.
    ///
    /// # Errors
    /// - `IndexOutOfRange` when `index` is not in the list.
    /// - `ItemShapeMismatch` when the updater returns another list's item.
    pub fn update_list_element<F>(
        &mut self,
        list: ListName,
        index: usize,
        updater: F,
    ) -> StoreResult<()>
    where
        F: FnOnce(ListItem) -> ListItem,
    {
        self.commit_with("update_list_element", |next| {
            let current = next
                .item(list, index)
                .ok_or_else(|| out_of_range(list.as_str(), index, next.list_len(list)))?;
            let updated = updater(current);
            if updated.list() != list {
                return Err(StoreError::ItemShapeMismatch {
                    expected: list,
                    found: updated.list(),
                });
            }
            DocumentEdit::ReplaceItem {
                index,
                item: updated,
            }
            .apply_to(next)
        })
    }

    /// Replaces the skill at `index`.
    pub fn update_skill(&mut self, index: usize, text: impl Into<String>) -> StoreResult<()> {
        self.apply(DocumentEdit::ReplaceItem {
            index,
            item: ListItem::Skill(text.into()),
        })
    }

    pub fn append_bullet(
        &mut self,
        list: ListName,
        entry: usize,
        text: impl Into<String>,
    ) -> StoreResult<()> {
        self.apply(DocumentEdit::AppendBullet {
            list,
            entry,
            text: text.into(),
        })
    }

    /// Appends the placeholder bullet to an experience/project entry.
    pub fn append_bullet_template(&mut self, list: ListName, entry: usize) -> StoreResult<()> {
        self.append_bullet(list, entry, NEW_BULLET_TEXT)
    }

    pub fn remove_bullet(&mut self, list: ListName, entry: usize, bullet: usize) -> StoreResult<()> {
        self.apply(DocumentEdit::RemoveBullet {
            list,
            entry,
            bullet,
        })
    }

    pub fn update_bullet(
        &mut self,
        list: ListName,
        entry: usize,
        bullet: usize,
        text: impl Into<String>,
    ) -> StoreResult<()> {
        self.apply(DocumentEdit::UpdateBullet {
            list,
            entry,
            bullet,
            text: text.into(),
        })
    }

    /// Replaces the whole document.
    pub fn replace_document(&mut self, document: ResumeDocument) -> StoreResult<()> {
        self.commit_with("replace_document", |next| {
            *next = document;
            Ok(())
        })
    }

    /// Imports uploaded bytes as the new document.
    ///
    /// # Contract
    /// - On any error the live document and storage are unchanged.
    pub fn import_bytes(&mut self, bytes: &[u8]) -> StoreResult<()> {
        let document = transfer::import_document(bytes).map_err(|err| {
            warn!(
                "event=document_import module=store status=error bytes={} error_code={}",
                bytes.len(),
                transfer::error_code(&err)
            );
            StoreError::from(err)
        })?;
        self.replace_document(document)?;
        info!(
            "event=document_import module=store status=ok bytes={}",
            bytes.len()
        );
        Ok(())
    }

    /// Imports a user-selected file as the new document.
    pub fn import_file(&mut self, path: impl AsRef<Path>) -> StoreResult<()> {
        let document = transfer::read_import_file(path)?;
        self.replace_document(document)
    }

    /// Serializes the live document for download.
    pub fn export_bytes(&self) -> StoreResult<Vec<u8>> {
        Ok(transfer::export_document(&self.document)?)
    }

    /// Writes the export file into `dir`.
    pub fn export_to_dir(&self, dir: impl AsRef<Path>) -> StoreResult<PathBuf> {
        Ok(transfer::write_export_file(dir, &self.document)?)
    }

    fn commit_with<F>(&mut self, op: &'static str, mutate: F) -> StoreResult<()>
    where
        F: FnOnce(&mut ResumeDocument) -> StoreResult<()>,
    {
        let mut next = self.document.clone();
        if let Err(err) = mutate(&mut next) {
            warn!(
                "event=document_edit module=store status=error op={op} error_code={}",
                err.code()
            );
            return Err(err);
        }

        let serialized = transfer::export_string(&next)?;
        if let Err(err) = self.repo.set_item(&self.storage_key, &serialized) {
            error!(
                "event=document_persist module=store status=error op={op} error_code=storage_failed error={err}"
            );
            return Err(err.into());
        }

        self.document = next;
        debug!(
            "event=document_persist module=store status=ok op={op} bytes={}",
            serialized.len()
        );
        Ok(())
    }
}
