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

pub mod event;
pub mod listener;
mod window;

pub use event::{
    DrawContext, HitTestResult, KeyEvent, ModifierKeys, MouseButton, ScrollDelta, Timestamp,
};
pub use listener::{MouseDragListener, ScrollListener, WindowListener};
pub use window::*;

pub type Point2 = glam::Vec2;
pub type Vec2 = glam::Vec2;
pub type Size2 = glam::UVec2;
