//! Order-preserving in-memory table shared by the memory adapters.

use std::fmt::Display;

use tokio::sync::RwLock;

use crate::infrastructure::ports::RepoError;

/// A record stored by id
pub trait Keyed: Clone + Send + Sync {
    type Key: PartialEq + Display + Copy + Send + Sync;

    /// Entity name used in `NotFound` errors
    const ENTITY: &'static str;

    fn key(&self) -> Self::Key;
}

/// Rows behind a `RwLock`, kept in insertion order.
pub struct Table<T> {
    rows: RwLock<Vec<T>>,
}

impl<T: Keyed> Table<T> {
    pub fn new(rows: Vec<T>) -> Self {
        Self {
            rows: RwLock::new(rows),
        }
    }

    pub async fn all(&self) -> Vec<T> {
        self.rows.read().await.clone()
    }

    pub async fn filter(&self, predicate: impl Fn(&T) -> bool) -> Vec<T> {
        let guard = self.rows.read().await;
        guard.iter().filter(|row| predicate(row)).cloned().collect()
    }

    pub async fn find(&self, predicate: impl Fn(&T) -> bool) -> Option<T> {
        let guard = self.rows.read().await;
        guard.iter().find(|row| predicate(row)).cloned()
    }

    pub async fn get(&self, key: T::Key) -> Option<T> {
        self.find(|row| row.key() == key).await
    }

    /// Append a row; fails if the key is taken.
    pub async fn push(&self, row: T) -> Result<(), RepoError> {
        let mut guard = self.rows.write().await;
        Self::ensure_vacant(&guard, &row)?;
        guard.push(row);
        Ok(())
    }

    /// Insert a row at the front; fails if the key is taken.
    pub async fn push_front(&self, row: T) -> Result<(), RepoError> {
        let mut guard = self.rows.write().await;
        Self::ensure_vacant(&guard, &row)?;
        guard.insert(0, row);
        Ok(())
    }

    /// Replace the stored row with the same key.
    pub async fn replace(&self, row: T) -> Result<(), RepoError> {
        self.modify(row.key(), |stored| *stored = row).await
    }

    /// Apply `f` to the row with `key` in place.
    pub async fn modify<R>(
        &self,
        key: T::Key,
        f: impl FnOnce(&mut T) -> R,
    ) -> Result<R, RepoError> {
        let mut guard = self.rows.write().await;
        let row = guard
            .iter_mut()
            .find(|row| row.key() == key)
            .ok_or_else(|| RepoError::not_found(T::ENTITY, key))?;
        Ok(f(row))
    }

    pub async fn remove(&self, key: T::Key) -> Result<T, RepoError> {
        let mut guard = self.rows.write().await;
        let index = guard
            .iter()
            .position(|row| row.key() == key)
            .ok_or_else(|| RepoError::not_found(T::ENTITY, key))?;
        Ok(guard.remove(index))
    }

    fn ensure_vacant(rows: &[T], row: &T) -> Result<(), RepoError> {
        let key = row.key();
        if rows.iter().any(|existing| existing.key() == key) {
            return Err(RepoError::constraint(format!(
                "{} {} already exists",
                T::ENTITY,
                key
            )));
        }
        Ok(())
    }
}
