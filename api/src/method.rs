//! HTTP methods issued by the client.

use strum::{Display, EnumString};

/// The HTTP method of a request.
///
/// ## Examples
///
/// ```rust
/// use rmkit_api::RestMethod;
///
/// assert_eq!(RestMethod::Delete.to_string(), "DELETE");
/// assert!(RestMethod::Put.carries_body());
/// assert_eq!("post".parse::<RestMethod>().unwrap(), RestMethod::Post);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum RestMethod {
    #[default]
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl RestMethod {
    /// Whether a request body is sent with this method. Bodies set on other
    /// methods are dropped by [`ApiClient::request`](crate::ApiClient::request).
    pub fn carries_body(self) -> bool {
        matches!(self, Self::Post | Self::Put | Self::Patch)
    }
}

impl From<RestMethod> for reqwest::Method {
    fn from(method: RestMethod) -> Self {
        match method {
            RestMethod::Get => reqwest::Method::GET,
            RestMethod::Post => reqwest::Method::POST,
            RestMethod::Put => reqwest::Method::PUT,
            RestMethod::Patch => reqwest::Method::PATCH,
            RestMethod::Delete => reqwest::Method::DELETE,
        }
    }
}
