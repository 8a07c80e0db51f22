use std::sync::Arc;

use axum::http::{HeaderMap, header::SET_COOKIE};
use chrono::{DateTime, Utc};

use crate::models::{CultureOption, CultureSource, RequestCulture, SUPPORTED_CULTURES};
use crate::services::diagnostics::{Diagnostics, TracingDiagnostics};
use crate::utils::culture_cookie::{
    CookieName, cookie_expiry, parse_cookie_value, read_cookie, set_cookie_header,
};
use crate::utils::{find_culture, negotiate_accept_language};

/// Outcome of [`LanguageService::set_culture`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CultureChange {
    /// Cookie written for this culture
    Applied(&'static CultureOption),
    /// Code not in the supported table; nothing written
    Rejected,
}

/// Culture accessor over the supported table and the request culture.
#[derive(Clone)]
pub struct LanguageService {
    cookie_name: CookieName,
    default_culture: &'static CultureOption,
    diagnostics: Arc<dyn Diagnostics>,
}

impl LanguageService {
    pub fn new(
        cookie_name: CookieName,
        default_culture: &'static CultureOption,
        diagnostics: Arc<dyn Diagnostics>,
    ) -> Self {
        Self { cookie_name, default_culture, diagnostics }
    }

    /// Service with the default cookie name and culture, logging through `tracing`
    pub fn with_tracing() -> Self {
        Self::new(CookieName::default(), &SUPPORTED_CULTURES[0], Arc::new(TracingDiagnostics))
    }

    /// Identifier of the culture active for the request
    pub fn current_culture(&self, ctx: &RequestCulture) -> String {
        ctx.culture.clone()
    }

    /// Supported cultures in display order
    pub fn supported_cultures(&self) -> &'static [CultureOption] {
        SUPPORTED_CULTURES
    }

    /// Persist `code` into the response if it is a supported culture.
    ///
    /// Unsupported codes are logged and leave `response_headers` untouched.
    pub fn set_culture(&self, code: &str, response_headers: &mut HeaderMap) -> CultureChange {
        self.set_culture_at(code, response_headers, Utc::now())
    }

    fn set_culture_at(
        &self,
        code: &str,
        response_headers: &mut HeaderMap,
        now: DateTime<Utc>,
    ) -> CultureChange {
        let Some(option) = find_culture(code) else {
            self.diagnostics.unsupported_culture(code);
            return CultureChange::Rejected;
        };

        match set_cookie_header(&self.cookie_name, option.code, cookie_expiry(now)) {
            Ok(cookie) => {
                response_headers.append(SET_COOKIE, cookie);
            },
            Err(e) => {
                self.diagnostics.cookie_write_failed(code, &e);
                return CultureChange::Rejected;
            },
        }

        self.diagnostics.culture_changed(option.code);
        CultureChange::Applied(option)
    }

    /// Resolve the culture of an incoming request.
    ///
    /// Order: supported culture cookie, then Accept-Language, then the default.
    pub fn resolve_request_culture(
        &self,
        headers: &HeaderMap,
        accept_language: Option<&str>,
    ) -> RequestCulture {
        if let Some(raw) = read_cookie(headers, self.cookie_name.as_str()) {
            match parse_cookie_value(raw) {
                Ok(parsed) => {
                    if let Some(option) = find_culture(&parsed.culture) {
                        return RequestCulture::new(option.code, CultureSource::Cookie);
                    }
                    tracing::debug!("Ignoring unsupported culture cookie: {}", parsed.culture);
                },
                Err(e) => tracing::debug!("Ignoring malformed culture cookie: {}", e),
            }
        }

        if let Some(option) = negotiate_accept_language(accept_language) {
            return RequestCulture::new(option.code, CultureSource::AcceptLanguage);
        }

        RequestCulture::new(self.default_culture.code, CultureSource::Default)
    }
}
