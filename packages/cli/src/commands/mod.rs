pub mod init;
pub mod outline;
pub mod replay;
pub mod versions;

pub use init::{init, InitArgs};
pub use outline::{outline, OutlineArgs};
pub use replay::{replay, ReplayArgs};
pub use versions::{versions, VersionsArgs};
