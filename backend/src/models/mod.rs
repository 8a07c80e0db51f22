pub mod culture;

pub use culture::{
    CultureChangeResponse, CultureOption, CultureSource, CurrentCultureResponse, RequestCulture,
    SUPPORTED_CULTURES, SetCultureRequest,
};
