use super::event::{EndpointInstance, EventKind, EventMask, StatusEvent};

/// Snapshot getters exposed by the host firmware.
///
/// Widgets never hold on to firmware state; they call these getters when a
/// subscribed event arrives and draw from the copy they get back.
pub trait StatusSource {
    /// Battery state of charge in percent (0–100).
    fn battery_state_of_charge(&self) -> u8;
    /// `true` while VBUS is present.
    fn usb_is_powered(&self) -> bool;
    /// Endpoint HID reports are currently routed to.
    fn endpoints_selected(&self) -> EndpointInstance;
    fn ble_active_profile_index(&self) -> u8;
    fn ble_active_profile_is_connected(&self) -> bool;
    /// `true` when the active profile has no bonded host.
    fn ble_active_profile_is_open(&self) -> bool;
    fn keymap_highest_layer_active(&self) -> u8;
    /// Display name of `layer`, if the keymap gives it one.
    fn keymap_layer_name(&self, layer: u8) -> Option<&'static str>;
    /// Split link state as seen from the peripheral half.
    fn split_peripheral_is_connected(&self) -> bool;
}

/// A widget's state type: what it subscribes to and how it snapshots.
pub trait WidgetState: Sized {
    /// Events that trigger a redraw.
    const SUBSCRIPTIONS: EventMask;

    /// Snapshot the state from `source`. `event` is `None` for the initial
    /// pass run when the widget is created.
    fn get_state<S: StatusSource + ?Sized>(source: &S, event: Option<&StatusEvent>) -> Self;
}

/// Snapshot for a widget if it subscribes to `event`, `None` otherwise.
pub fn listen<W, S>(source: &S, event: &StatusEvent) -> Option<W>
where
    W: WidgetState,
    S: StatusSource + ?Sized,
{
    if W::SUBSCRIPTIONS.matches(event) {
        Some(W::get_state(source, Some(event)))
    } else {
        None
    }
}

/// Snapshot delivered once when a widget is initialised.
pub fn initial_state<W, S>(source: &S) -> W
where
    W: WidgetState,
    S: StatusSource + ?Sized,
{
    W::get_state(source, None)
}

#[cfg(feature = "usb")]
fn charging<S: StatusSource + ?Sized>(source: &S) -> bool {
    source.usb_is_powered()
}

#[cfg(not(feature = "usb"))]
fn charging<S: StatusSource + ?Sized>(_source: &S) -> bool {
    false
}

// ── Central ──────────────────────────────────────────────────────────────

/// Everything the central (left half) screen draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StatusState {
    /// State of charge in percent.
    pub battery: u8,
    pub charging: bool,
    pub selected_endpoint: EndpointInstance,
    pub active_profile_index: u8,
    pub active_profile_connected: bool,
    pub active_profile_bonded: bool,
    /// Highest active keymap layer.
    pub layer_index: u8,
    /// Keymap name for `layer_index`, if any.
    pub layer_label: Option<&'static str>,
}

impl StatusState {
    pub fn from_source<S: StatusSource + ?Sized>(source: &S) -> Self {
        let layer_index = source.keymap_highest_layer_active();
        Self {
            battery: source.battery_state_of_charge(),
            charging: charging(source),
            selected_endpoint: source.endpoints_selected(),
            active_profile_index: source.ble_active_profile_index(),
            active_profile_connected: source.ble_active_profile_is_connected(),
            active_profile_bonded: !source.ble_active_profile_is_open(),
            layer_index,
            layer_label: source.keymap_layer_name(layer_index),
        }
    }
}

impl WidgetState for StatusState {
    const SUBSCRIPTIONS: EventMask = EventMask::EMPTY
        .with(EventKind::BatteryStateChanged)
        .with(EventKind::EndpointChanged)
        .with(EventKind::BleActiveProfileChanged)
        .with(EventKind::LayerStateChanged)
        .with(EventKind::UsbConnStateChanged);

    fn get_state<S: StatusSource + ?Sized>(source: &S, _event: Option<&StatusEvent>) -> Self {
        Self::from_source(source)
    }
}

// ── Peripheral ───────────────────────────────────────────────────────────

/// Everything the peripheral (right half) overlay draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PeripheralState {
    pub battery: u8,
    pub charging: bool,
    /// Split link to the central half is up.
    pub connected: bool,
}

impl PeripheralState {
    pub fn from_source<S: StatusSource + ?Sized>(source: &S) -> Self {
        Self {
            battery: source.battery_state_of_charge(),
            charging: charging(source),
            connected: split_connected(source),
        }
    }
}

#[cfg(feature = "split-ble")]
fn split_connected<S: StatusSource + ?Sized>(source: &S) -> bool {
    source.split_peripheral_is_connected()
}

#[cfg(not(feature = "split-ble"))]
fn split_connected<S: StatusSource + ?Sized>(_source: &S) -> bool {
    true
}

impl WidgetState for PeripheralState {
    const SUBSCRIPTIONS: EventMask = EventMask::EMPTY
        .with(EventKind::BatteryStateChanged)
        .with(EventKind::SplitPeripheralStatusChanged)
        .with(EventKind::UsbConnStateChanged);

    fn get_state<S: StatusSource + ?Sized>(source: &S, _event: Option<&StatusEvent>) -> Self {
        Self::from_source(source)
    }
}

// ── Tests ────────────────────────────────────────────────────────────────
