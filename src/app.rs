//! Session state and control logic for waypoint.
//!
//! This module contains everything a single browsing session owns:
//! - [cache]: the bounded, time-expiring directory cache.
//! - [nav]: the navigation state machine and its event union.
//! - [scroll]: the virtual scroll window calculator.
//! - [preview]: the file preview sub-controller.
//! - [intent]: the closed input-intent union fed in by the key-decoding boundary.
//! - [state]: the [Session] orchestrator tying cache, workers and state together.

pub mod cache;
pub mod intent;
pub mod nav;
pub mod preview;
pub mod scroll;
pub mod state;

pub use cache::{CacheStats, DirCache};
pub use intent::{DispatchResult, Intent};
pub use nav::{NavEffect, NavEvent, NavPhase, NavState};
pub use preview::{FilePreview, PreviewState};
pub use scroll::ScrollWindow;
pub use state::{Session, Snapshot};
