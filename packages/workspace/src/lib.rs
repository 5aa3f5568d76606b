pub mod gateway;
pub mod state;

pub use gateway::{MemoryGateway, Operation, WorkspaceError, DEFAULT_PUBLISH_BASE_URL};
pub use state::WorkspaceState;
