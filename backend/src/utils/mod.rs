pub mod culture_cookie;
pub mod error;
pub mod i18n;

pub use culture_cookie::{CookieCulture, CookieName, CookieValueError};
pub use error::ApiError;
pub use i18n::{find_culture, negotiate_accept_language};
