//! UI Components
//!
//! The three dashboard regions plus notifications.

pub mod chart;
pub mod counter;
pub mod gallery;
pub mod toast;

pub use chart::HourlyChart;
pub use counter::TriggerCounter;
pub use gallery::PhotoGallery;
pub use toast::Toast;
