mod config;
mod error;

pub mod headers;
pub mod http;

pub use config::*;
pub use error::*;
pub use http::{HttpClient, Method, RequestOverride, Response, RestClient, DEFAULT_TIMEOUT};
pub use reqwest::header::HeaderMap;

#[cfg(test)]
pub(crate) mod tests {
    #[macro_export(local_inner_macros)]
    /// a macro to create a header map from lowercase names
    macro_rules! header_map {
            ( $( $name:expr => $value:expr ),* $(,)? ) => {
                {
                    let mut map = ::reqwest::header::HeaderMap::new();
                    $(
                        map.append(
                            ::reqwest::header::HeaderName::from_static($name),
                            ::reqwest::header::HeaderValue::from_static($value),
                        );
                    )*
                    map
                }
            };
        }
}
