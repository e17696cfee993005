pub mod channel_uri;
pub mod cluster;

pub use channel_uri::*;
pub use cluster::*;
