//! Owner-scoped JSON table
//!
//! Each repository is a [`Table`] of one record type held in memory behind an
//! `RwLock` and persisted to a single JSON file. Reads always take the
//! requesting owner; a row owned by someone else looks exactly like a missing
//! row.

use std::collections::HashMap;
use std::hash::Hash;
use std::path::PathBuf;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::PlannerError;
use crate::models::UserId;

use super::file_io::{read_json, write_json_atomic};

/// A row that can live in a [`Table`]
pub trait Record: Clone + Serialize + DeserializeOwned {
    /// Identity of the row; upserting an existing key replaces the row
    type Key: Copy + Eq + Hash;

    fn key(&self) -> Self::Key;
    fn owner(&self) -> UserId;
}

pub struct Table<T: Record> {
    path: PathBuf,
    rows: RwLock<HashMap<T::Key, T>>,
}

impl<T: Record> Table<T> {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            rows: RwLock::new(HashMap::new()),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, HashMap<T::Key, T>>, PlannerError> {
        self.rows
            .read()
            .map_err(|e| PlannerError::Storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, HashMap<T::Key, T>>, PlannerError> {
        self.rows
            .write()
            .map_err(|e| PlannerError::Storage(format!("Failed to acquire write lock: {}", e)))
    }

    /// Replace the in-memory rows with the file contents
    pub fn load(&self) -> Result<(), PlannerError> {
        let file_rows: Vec<T> = read_json(&self.path)?;

        let mut rows = self.write()?;
        rows.clear();
        for row in file_rows {
            rows.insert(row.key(), row);
        }
        Ok(())
    }

    pub fn save(&self) -> Result<(), PlannerError> {
        let rows = self.read()?;
        let file_rows: Vec<&T> = rows.values().collect();
        write_json_atomic(&self.path, &file_rows)
    }

    /// The row with `key`, if it exists and belongs to `owner`
    pub fn get(&self, owner: UserId, key: T::Key) -> Result<Option<T>, PlannerError> {
        let rows = self.read()?;
        Ok(rows.get(&key).filter(|r| r.owner() == owner).cloned())
    }

    /// Every row of `owner` matching `predicate`
    pub fn select<F>(&self, owner: UserId, predicate: F) -> Result<Vec<T>, PlannerError>
    where
        F: Fn(&T) -> bool,
    {
        let rows = self.read()?;
        Ok(rows
            .values()
            .filter(|r| r.owner() == owner && predicate(r))
            .cloned()
            .collect())
    }

    pub fn all(&self, owner: UserId) -> Result<Vec<T>, PlannerError> {
        self.select(owner, |_| true)
    }

    /// First row of `owner` matching `predicate`
    pub fn find<F>(&self, owner: UserId, predicate: F) -> Result<Option<T>, PlannerError>
    where
        F: Fn(&T) -> bool,
    {
        let rows = self.read()?;
        Ok(rows
            .values()
            .find(|r| r.owner() == owner && predicate(r))
            .cloned())
    }

    /// Insert or replace a row, returning the previous version
    ///
    /// The swap happens under the write lock, so readers see either the old
    /// row or the new one.
    pub fn upsert(&self, row: T) -> Result<Option<T>, PlannerError> {
        let mut rows = self.write()?;
        let key = row.key();
        if let Some(existing) = rows.get(&key) {
            if existing.owner() != row.owner() {
                return Err(PlannerError::Storage(
                    "Refusing to overwrite a row owned by another user".into(),
                ));
            }
        }
        Ok(rows.insert(key, row))
    }

    /// Remove the row with `key` if it belongs to `owner`
    pub fn remove(&self, owner: UserId, key: T::Key) -> Result<Option<T>, PlannerError> {
        let mut rows = self.write()?;
        match rows.get(&key) {
            Some(row) if row.owner() == owner => Ok(rows.remove(&key)),
            _ => Ok(None),
        }
    }

    /// Remove every row of `owner` matching `predicate`
    pub fn remove_where<F>(&self, owner: UserId, predicate: F) -> Result<Vec<T>, PlannerError>
    where
        F: Fn(&T) -> bool,
    {
        let mut rows = self.write()?;
        let doomed: Vec<T::Key> = rows
            .values()
            .filter(|r| r.owner() == owner && predicate(r))
            .map(|r| r.key())
            .collect();

        Ok(doomed.into_iter().filter_map(|k| rows.remove(&k)).collect())
    }

    pub fn count(&self, owner: UserId) -> Result<usize, PlannerError> {
        let rows = self.read()?;
        Ok(rows.values().filter(|r| r.owner() == owner).count())
    }
}
