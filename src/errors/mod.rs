mod resource_error;
mod ssh_error;

pub use resource_error::{ResourceError, ResourceErrorKind};
pub use ssh_error::SshError;
