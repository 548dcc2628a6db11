//! Dashboard renderers
//!
//! [`Surface`](crate::dashboard::Surface) implementations that do not need a
//! browser.

mod text;

pub use text::TextSurface;
