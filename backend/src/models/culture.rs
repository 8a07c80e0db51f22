use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// A culture the application offers to users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, ToSchema)]
pub struct CultureOption {
    /// Language-region tag, e.g. `en-US`
    pub code: &'static str,
    pub flag: &'static str,
    pub name: &'static str,
}

impl CultureOption {
    pub const fn new(code: &'static str, flag: &'static str, name: &'static str) -> Self {
        Self { code, flag, name }
    }

    /// Primary language subtag (`ar` for `ar-SA`)
    pub fn language(&self) -> &'static str {
        self.code.split('-').next().unwrap_or(self.code)
    }
}

/// Supported cultures, in display order. Codes are unique.
pub static SUPPORTED_CULTURES: &[CultureOption] = &[
    CultureOption::new("en-US", "🇺🇸", "English"),
    CultureOption::new("ar-SA", "🇸🇦", "العربية"),
];

/// Where the active culture of a request was resolved from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum CultureSource {
    Cookie,
    AcceptLanguage,
    Default,
}

/// Culture active for the current request.
///
/// Resolved once by the locale middleware and stored in request extensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestCulture {
    pub culture: String,
    pub source: CultureSource,
}

impl RequestCulture {
    pub fn new(culture: impl Into<String>, source: CultureSource) -> Self {
        Self { culture: culture.into(), source }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SetCultureRequest {
    #[validate(length(min = 1, max = 35))]
    pub culture: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CurrentCultureResponse {
    pub culture: String,
    pub source: CultureSource,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CultureChangeResponse {
    pub applied: bool,
    pub culture: String,
    pub message: String,
}
