//! Keyboard status snapshots, events and subscriptions.
//!
//! # Architecture
//!
//! ```text
//!  host firmware ──StatusEvent──► HostState::apply()      (mirror update)
//!                      │
//!                      └────────► listen::<S>(src, ev)    (subscription check)
//!                                      │ Some(snapshot)
//!                                      ▼
//!                         WidgetList::for_each_mut(redraw)
//! ```
//!
//! Each widget type implements [`WidgetState`]: a subscription mask plus a
//! getter that snapshots everything the widget draws from a
//! [`StatusSource`]. A snapshot is taken in the event's context and handed
//! to the widgets by value, so drawing never touches live firmware state.
//!
//! # Feature switches
//!
//! - **`usb`**: the charging flag mirrors USB power. Without it charging
//!   is always `false`.
//! - **`split-ble`**: the peripheral reports its split link state. Without
//!   it the peripheral always considers itself connected.
//!
//! # `no_std` Compatibility
//!
//! No heap allocation. The widget list is a fixed-capacity
//! [`heapless::Vec`].

pub mod battery;
mod error;
mod event;
mod host;
mod state;
mod widget_list;

pub use error::StatusError;
pub use event::{EndpointInstance, EventKind, EventMask, StatusEvent, Transport, UsbConnState};
pub use host::{HostState, ProfileStatus};
pub use state::{
    initial_state, listen, PeripheralState, StatusSource, StatusState, WidgetState,
};
pub use widget_list::WidgetList;

/// Number of BLE host profiles the firmware can pair with.
pub const BLE_PROFILE_COUNT: usize = 5;

/// Number of keymap layers tracked by the 32-bit layer state.
pub const MAX_LAYERS: usize = 32;
