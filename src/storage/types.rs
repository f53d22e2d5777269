use sqlx::{Pool, Postgres, Sqlite};

/// A handle to the backing database.
///
/// Cloning is cheap: the underlying pool is reference-counted, so every
/// clone issued by [`DataStore::connect`](super::DataStore::connect) shares
/// the same connections.
#[derive(Clone, Debug)]
pub enum StorePool {
    Sqlite(Pool<Sqlite>),
    Postgres(Pool<Postgres>),
}

impl StorePool {
    pub(crate) fn as_sqlite(&self) -> Option<&Pool<Sqlite>> {
        match self {
            StorePool::Sqlite(pool) => Some(pool),
            _ => None,
        }
    }

    pub(crate) fn as_postgres(&self) -> Option<&Pool<Postgres>> {
        match self {
            StorePool::Postgres(pool) => Some(pool),
            _ => None,
        }
    }

    pub(super) async fn close(&self) {
        match self {
            StorePool::Sqlite(pool) => pool.close().await,
            StorePool::Postgres(pool) => pool.close().await,
        }
    }
}
