//! HTTP transports and the synthetic response they resolve to

pub mod fetch;
pub mod response;
pub mod transport;

pub use fetch::{
    fetch_from_callback, CallbackFetch, DirectFetch, Fetch, FetchRequest, HeaderInput,
    RequestTarget,
};
pub use response::SyntheticResponse;
pub use transport::Transport;
