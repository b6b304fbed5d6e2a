use storage::Stores;

/// Which persistence backend the server was started with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Memory,
    Postgres,
}

impl StorageBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Memory => "memory",
            Self::Postgres => "postgres",
        }
    }
}

/// Shared router state
#[derive(Clone)]
pub struct AppState {
    pub stores: Stores,
    pub backend: StorageBackend,
}

impl AppState {
    pub fn new(stores: Stores, backend: StorageBackend) -> Self {
        Self { stores, backend }
    }

    pub fn in_memory() -> Self {
        Self::new(Stores::in_memory(), StorageBackend::Memory)
    }
}
