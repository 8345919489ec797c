mod services;
mod store;

pub use services::AppService;
pub use store::{AppStore, MemoryAppStore};
