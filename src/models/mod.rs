pub mod catalog;
pub mod export;
pub mod storage;

pub use catalog::{Catalog, Category, CategoryKey, Experience, ToggleOutcome, Vec3};
pub use storage::{LoadStatus, StorageManager};
