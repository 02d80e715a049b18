#![warn(
    // missing_docs,
    // rustdoc::missing_doc_code_examples,
    future_incompatible,
    rust_2018_idioms,
    unused,
    trivial_casts,
    trivial_numeric_casts,
    unused_lifetimes,
    unused_qualifications,
    unused_crate_dependencies,
    clippy::cargo,
    clippy::multiple_crate_versions,
    clippy::empty_line_after_outer_attr,
    clippy::fallible_impl_from,
    clippy::redundant_pub_crate,
    clippy::use_self,
    clippy::suspicious_operation_groupings,
    clippy::useless_let_if_seq,
    // clippy::missing_errors_doc,
    // clippy::missing_panics_doc,
    clippy::wildcard_imports
)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![doc(html_no_source)]
#![doc = include_str!("../README.md")]

use thiserror::Error;
pub use wndbridge_window;
use wndbridge_window::WindowId;

mod dispatcher;
pub mod ffi;
pub mod handle;
mod host;
pub mod sys;

pub use dispatcher::{DispatchConfig, WidgetDispatcher};
pub use ffi::{InstallError, install, uninstall, with_dispatcher};
pub use handle::RawWindowHandle;
pub use host::WidgetHost;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    #[error("{0:#x} is not a valid window handle")]
    InvalidHandle(RawWindowHandle),

    #[error("the window handle {0:#x} does not belong to a live window")]
    UnknownHandle(RawWindowHandle),

    #[error("the window {0:?} does not exist (anymore)")]
    UnknownWindow(WindowId),

    #[error("no widget dispatcher is installed on this thread")]
    NotInstalled,

    #[error("the widget dispatcher is already in use (re-entrant call from a listener)")]
    Reentrant,

    #[error("the native `{0}` pointer is null")]
    NullPointer(&'static str),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(feature = "tracing-subscriber-init")]
pub fn init_tracing_subscriber_defaults() {
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt().with_env_filter(env_filter).init();
}
