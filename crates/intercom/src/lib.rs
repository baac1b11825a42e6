mod client;
mod error;
pub mod handlers;
mod page;

pub use client::{
    ACCESS_TOKEN_ENV, API_VERSION_ENV, BASE_URL_ENV, DEFAULT_BASE_URL, Intercom, IntercomBuilder,
    RequestOptions,
};
pub use error::{Error, IntercomError, Result, StatusCode};
pub use page::{NextPage, PageCursor};
