//! Culture cookie codec
//!
//! Writes and reads the persisted culture choice in the format understood by
//! ASP.NET Core's `CookieRequestCultureProvider`: `c=<culture>|uic=<ui-culture>`,
//! URL-encoded inside the cookie.

use axum::http::{HeaderMap, HeaderValue, header::COOKIE};
use chrono::{DateTime, Months, TimeDelta, Utc};
use thiserror::Error;

pub const DEFAULT_COOKIE_NAME: &str = ".AspNetCore.Culture";

const CULTURE_PREFIX: &str = "c=";
const UI_CULTURE_PREFIX: &str = "uic=";
const SEPARATOR: char = '|';

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CookieValueError {
    #[error("Culture cookie value is empty")]
    Empty,

    #[error("Culture cookie value is not valid UTF-8 after decoding")]
    Encoding,

    #[error("Unexpected culture cookie segment: {0}")]
    UnknownSegment(String),

    #[error("Culture cookie value carries neither c= nor uic=")]
    MissingCulture,

    #[error("Invalid cookie name: {0:?}")]
    InvalidName(String),

    #[error("Culture cookie cannot be encoded as a header value")]
    InvalidHeader,
}

/// Cultures carried by a decoded culture cookie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookieCulture {
    pub culture: String,
    pub ui_culture: String,
}

/// Cookie name checked against the RFC 6265 token grammar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookieName(String);

impl CookieName {
    pub fn new(name: impl Into<String>) -> Result<Self, CookieValueError> {
        let name = name.into();
        let valid = !name.is_empty()
            && name.bytes().all(|b| {
                b.is_ascii_graphic() && !b"()<>@,;:\\\"/[]?={}".contains(&b)
            });
        if valid { Ok(Self(name)) } else { Err(CookieValueError::InvalidName(name)) }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for CookieName {
    fn default() -> Self {
        Self(DEFAULT_COOKIE_NAME.to_string())
    }
}

/// Build the unencoded cookie value for a culture, using it as UI culture too.
pub fn make_cookie_value(culture: &str) -> String {
    format!("{CULTURE_PREFIX}{culture}{SEPARATOR}{UI_CULTURE_PREFIX}{culture}")
}

/// Parse a (possibly URL-encoded) culture cookie value.
///
/// When only one of `c=` / `uic=` is present, its value is used for both.
pub fn parse_cookie_value(raw: &str) -> Result<CookieCulture, CookieValueError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(CookieValueError::Empty);
    }

    let decoded = urlencoding::decode(raw).map_err(|_| CookieValueError::Encoding)?;

    let mut culture = None;
    let mut ui_culture = None;
    for segment in decoded.split(SEPARATOR) {
        if let Some(value) = segment.strip_prefix(CULTURE_PREFIX) {
            culture = Some(value.to_string());
        } else if let Some(value) = segment.strip_prefix(UI_CULTURE_PREFIX) {
            ui_culture = Some(value.to_string());
        } else {
            return Err(CookieValueError::UnknownSegment(segment.to_string()));
        }
    }

    match (culture, ui_culture) {
        (Some(c), Some(uic)) => Ok(CookieCulture { culture: c, ui_culture: uic }),
        (Some(c), None) => Ok(CookieCulture { ui_culture: c.clone(), culture: c }),
        (None, Some(uic)) => Ok(CookieCulture { culture: uic.clone(), ui_culture: uic }),
        (None, None) => Err(CookieValueError::MissingCulture),
    }
}

/// Expiry of a freshly written culture cookie: one calendar year after `now`.
pub fn cookie_expiry(now: DateTime<Utc>) -> DateTime<Utc> {
    now.checked_add_months(Months::new(12))
        .unwrap_or(now + TimeDelta::days(365))
}

/// Build the `Set-Cookie` header persisting `culture`.
pub fn set_cookie_header(
    name: &CookieName,
    culture: &str,
    expires: DateTime<Utc>,
) -> Result<HeaderValue, CookieValueError> {
    let value = urlencoding::encode(&make_cookie_value(culture)).into_owned();
    let header = format!(
        "{}={}; Expires={}; Path=/; HttpOnly; SameSite=Lax",
        name.as_str(),
        value,
        expires.format("%a, %d %b %Y %H:%M:%S GMT")
    );
    HeaderValue::try_from(header).map_err(|_| CookieValueError::InvalidHeader)
}

/// Find a cookie by name across all `Cookie` request headers.
pub fn read_cookie<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|header| header.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value)
}
