pub mod conf;
pub mod endpoint;
pub mod error;
pub mod rpc;

pub use conf::NodeConf;
pub use endpoint::Endpoint;
pub use error::{CoreError, RpcError};
