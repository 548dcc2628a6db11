//! Event Stream
//!
//! Inbound side of the dashboard: decoding frames and applying them in order.
//!
//! ## Architecture
//!
//! - **Messages**: the `initial_data` / `new_warning` envelope
//! - **Dispatcher**: single consumer applying frames to a `DashboardClient`
//! - **Replay** (`runtime` feature): frame sources and the tokio consumer task
//!
//! ## Protocol
//!
//! Right after connecting, the backend sends exactly one snapshot:
//!
//! ```text
//! {"event": "initial_data", "data": [{"timestamp": "2024-01-01T09:15:00", "image_url": "/uploads/a.jpg"}]}
//! ```
//!
//! followed by zero or more live events:
//!
//! ```text
//! {"event": "new_warning", "data": {"timestamp": "2024-01-01T09:45:00", "image_url": "/uploads/b.jpg"}}
//! ```

mod dispatch;
mod messages;
#[cfg(feature = "runtime")]
mod replay;

pub use dispatch::{DispatchStats, Dispatcher, SyncState};
pub use messages::{Envelope, StreamMessage, INITIAL_DATA, NEW_WARNING};
#[cfg(feature = "runtime")]
pub use replay::{forward, run_consumer, FrameSource, Inbound, ReplaySource};
