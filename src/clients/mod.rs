pub mod http;
pub mod traits;

pub use http::HttpAskClient;
pub use traits::AskTransport;
