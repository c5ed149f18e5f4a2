// Adapters layer: concrete providers behind the `Provider` port.

pub mod http;
pub mod mock;

pub use http::HttpProvider;
pub use mock::MockProvider;
