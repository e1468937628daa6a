pub mod error;
pub mod network;
pub mod status;

pub use error::CommonError;
pub use network::NetworkIdentity;
pub use status::{AsyncStatus, FetchState};
