// Adapters layer: concrete implementations for external systems (Steam Web API, local filesystem).

pub mod steam;
pub mod storage;
