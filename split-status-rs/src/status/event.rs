/// Output transport for HID reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Transport {
    /// Wired USB HID.
    #[default]
    Usb,
    /// Bluetooth LE HID on one of the pairing profiles.
    Ble,
}

/// The endpoint HID reports are currently sent to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EndpointInstance {
    pub transport: Transport,
    /// BLE profile index. Only meaningful when `transport` is [`Transport::Ble`].
    pub ble_profile_index: u8,
}

impl EndpointInstance {
    pub const fn usb() -> Self {
        Self {
            transport: Transport::Usb,
            ble_profile_index: 0,
        }
    }

    pub const fn ble(profile_index: u8) -> Self {
        Self {
            transport: Transport::Ble,
            ble_profile_index: profile_index,
        }
    }
}

/// USB connection state as reported by the USB stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UsbConnState {
    /// No VBUS.
    #[default]
    None,
    /// VBUS present but no HID host enumerated.
    Powered,
    /// Enumerated by a HID host.
    Hid,
}

impl UsbConnState {
    /// `true` for any state with VBUS present.
    pub fn is_powered(self) -> bool {
        !matches!(self, UsbConnState::None)
    }

    /// `true` when USB can carry HID reports.
    pub fn is_ready(self) -> bool {
        matches!(self, UsbConnState::Hid)
    }
}

/// Events raised by the host firmware that can affect what the widgets show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StatusEvent {
    /// New battery state of charge, in percent.
    BatteryStateChanged { state_of_charge: u8 },
    /// USB cable plugged, unplugged, or enumerated.
    UsbConnStateChanged { state: UsbConnState },
    /// The user selected a different output endpoint.
    EndpointChanged { endpoint: EndpointInstance },
    /// The active BLE profile changed, or its link/bond status did.
    BleActiveProfileChanged {
        index: u8,
        connected: bool,
        bonded: bool,
    },
    /// A keymap layer was activated or deactivated.
    LayerStateChanged { layer: u8, active: bool },
    /// The split link between the two halves came up or went down.
    SplitPeripheralStatusChanged { connected: bool },
}

/// Discriminant of a [`StatusEvent`], used for subscriptions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum EventKind {
    BatteryStateChanged = 0,
    UsbConnStateChanged = 1,
    EndpointChanged = 2,
    BleActiveProfileChanged = 3,
    LayerStateChanged = 4,
    SplitPeripheralStatusChanged = 5,
}

impl StatusEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            StatusEvent::BatteryStateChanged { .. } => EventKind::BatteryStateChanged,
            StatusEvent::UsbConnStateChanged { .. } => EventKind::UsbConnStateChanged,
            StatusEvent::EndpointChanged { .. } => EventKind::EndpointChanged,
            StatusEvent::BleActiveProfileChanged { .. } => EventKind::BleActiveProfileChanged,
            StatusEvent::LayerStateChanged { .. } => EventKind::LayerStateChanged,
            StatusEvent::SplitPeripheralStatusChanged { .. } => {
                EventKind::SplitPeripheralStatusChanged
            }
        }
    }
}

/// A set of [`EventKind`]s a listener is subscribed to.
///
/// Built at compile time:
///
/// ```
/// use split_status::status::{EventKind, EventMask};
///
/// const MASK: EventMask = EventMask::EMPTY
///     .with(EventKind::BatteryStateChanged)
///     .with(EventKind::LayerStateChanged);
///
/// assert!(MASK.contains(EventKind::LayerStateChanged));
/// assert!(!MASK.contains(EventKind::EndpointChanged));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EventMask(u8);

impl EventMask {
    pub const EMPTY: Self = Self(0);

    /// Returns a copy of the mask with `kind` added.
    pub const fn with(self, kind: EventKind) -> Self {
        Self(self.0 | (1 << kind as u8))
    }

    pub const fn contains(self, kind: EventKind) -> bool {
        self.0 & (1 << kind as u8) != 0
    }

    /// `true` if a listener with this mask should handle `event`.
    pub fn matches(self, event: &StatusEvent) -> bool {
        self.contains(event.kind())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn usb_conn_state_power_and_readiness() {
        assert!(!UsbConnState::None.is_powered());
        assert!(UsbConnState::Powered.is_powered());
        assert!(UsbConnState::Hid.is_powered());

        assert!(!UsbConnState::None.is_ready());
        assert!(!UsbConnState::Powered.is_ready());
        assert!(UsbConnState::Hid.is_ready());
    }

    #[test]
    fn event_kind_matches_variant() {
        let ev = StatusEvent::LayerStateChanged {
            layer: 2,
            active: true,
        };
        assert_eq!(ev.kind(), EventKind::LayerStateChanged);

        let ev = StatusEvent::SplitPeripheralStatusChanged { connected: false };
        assert_eq!(ev.kind(), EventKind::SplitPeripheralStatusChanged);
    }

    #[test]
    fn empty_mask_matches_nothing() {
        let ev = StatusEvent::BatteryStateChanged { state_of_charge: 50 };
        assert!(!EventMask::EMPTY.matches(&ev));
    }

    #[test]
    fn mask_matches_only_subscribed_kinds() {
        let mask = EventMask::EMPTY.with(EventKind::BatteryStateChanged);
        assert!(mask.matches(&StatusEvent::BatteryStateChanged { state_of_charge: 1 }));
        assert!(!mask.matches(&StatusEvent::EndpointChanged {
            endpoint: EndpointInstance::usb()
        }));
    }

    #[test]
    fn endpoint_constructors() {
        assert_eq!(EndpointInstance::usb().transport, Transport::Usb);
        let ble = EndpointInstance::ble(3);
        assert_eq!(ble.transport, Transport::Ble);
        assert_eq!(ble.ble_profile_index, 3);
    }
}
