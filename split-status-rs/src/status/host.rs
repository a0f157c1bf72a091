use super::error::StatusError;
use super::event::{EndpointInstance, StatusEvent, Transport, UsbConnState};
use super::state::StatusSource;
use super::{BLE_PROFILE_COUNT, MAX_LAYERS};

/// Link status of one BLE pairing profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ProfileStatus {
    pub connected: bool,
    /// A host is bonded to this profile (the profile is not "open").
    pub bonded: bool,
}

/// In-memory mirror of the host firmware state, fed by [`StatusEvent`]s.
///
/// The firmware applies every event here before publishing it, so a
/// listener reading through [`StatusSource`] sees the post-event state.
///
/// # Examples
///
/// ```
/// use split_status::status::{HostState, StatusEvent, StatusSource};
///
/// static NAMES: [Option<&str>; 2] = [Some("BASE"), Some("NAV")];
///
/// let mut host = HostState::new(&NAMES);
/// host.apply(&StatusEvent::LayerStateChanged { layer: 1, active: true }).unwrap();
/// assert_eq!(host.keymap_highest_layer_active(), 1);
/// assert_eq!(host.keymap_layer_name(1), Some("NAV"));
/// ```
#[derive(Debug, Clone)]
pub struct HostState {
    battery: u8,
    usb: UsbConnState,
    preferred_transport: Transport,
    active_profile: u8,
    profiles: [ProfileStatus; BLE_PROFILE_COUNT],
    /// Bit `n` set when layer `n` is active.
    layer_state: u32,
    layer_names: &'static [Option<&'static str>],
    split_connected: bool,
}

impl HostState {
    /// Fresh state: full battery, no USB, BLE preferred on profile 0,
    /// only the default layer active, split link down.
    pub fn new(layer_names: &'static [Option<&'static str>]) -> Self {
        Self {
            battery: 100,
            usb: UsbConnState::None,
            preferred_transport: Transport::Ble,
            active_profile: 0,
            profiles: [ProfileStatus::default(); BLE_PROFILE_COUNT],
            layer_state: 1,
            layer_names,
            split_connected: false,
        }
    }

    /// Update the mirror from a firmware event.
    ///
    /// Battery values above 100 are clamped. Profile and layer indices out
    /// of range are rejected and leave the state unchanged.
    pub fn apply(&mut self, event: &StatusEvent) -> Result<(), StatusError> {
        match *event {
            StatusEvent::BatteryStateChanged { state_of_charge } => {
                self.battery = state_of_charge.min(100);
            }
            StatusEvent::UsbConnStateChanged { state } => {
                self.usb = state;
            }
            StatusEvent::EndpointChanged { endpoint } => {
                if endpoint.transport == Transport::Ble {
                    Self::check_profile(endpoint.ble_profile_index)?;
                    self.active_profile = endpoint.ble_profile_index;
                }
                self.preferred_transport = endpoint.transport;
            }
            StatusEvent::BleActiveProfileChanged {
                index,
                connected,
                bonded,
            } => {
                Self::check_profile(index)?;
                self.active_profile = index;
                self.profiles[index as usize] = ProfileStatus { connected, bonded };
            }
            StatusEvent::LayerStateChanged { layer, active } => {
                if layer as usize >= MAX_LAYERS {
                    #[cfg(feature = "defmt")]
                    defmt::warn!("layer {} out of range", layer);
                    return Err(StatusError::InvalidLayerIndex);
                }
                if active {
                    self.layer_state |= 1 << layer;
                } else {
                    self.layer_state &= !(1 << layer);
                }
            }
            StatusEvent::SplitPeripheralStatusChanged { connected } => {
                self.split_connected = connected;
            }
        }
        Ok(())
    }

    fn check_profile(index: u8) -> Result<(), StatusError> {
        if index as usize >= BLE_PROFILE_COUNT {
            #[cfg(feature = "defmt")]
            defmt::warn!("BLE profile {} out of range", index);
            return Err(StatusError::InvalidProfileIndex);
        }
        Ok(())
    }

    pub fn usb_conn_state(&self) -> UsbConnState {
        self.usb
    }

    pub fn preferred_transport(&self) -> Transport {
        self.preferred_transport
    }

    pub fn profile(&self, index: u8) -> Option<&ProfileStatus> {
        self.profiles.get(index as usize)
    }

    fn active_profile_status(&self) -> &ProfileStatus {
        &self.profiles[self.active_profile as usize]
    }

    /// Transport actually in use: the preferred one when it is ready,
    /// otherwise the other one if that is ready, otherwise the preferred.
    fn selected_transport(&self) -> Transport {
        let usb_ready = self.usb.is_ready();
        let ble_ready = self.active_profile_status().connected;
        match self.preferred_transport {
            Transport::Usb if !usb_ready && ble_ready => Transport::Ble,
            Transport::Ble if !ble_ready && usb_ready => Transport::Usb,
            preferred => preferred,
        }
    }
}

impl StatusSource for HostState {
    fn battery_state_of_charge(&self) -> u8 {
        self.battery
    }

    fn usb_is_powered(&self) -> bool {
        self.usb.is_powered()
    }

    fn endpoints_selected(&self) -> EndpointInstance {
        match self.selected_transport() {
            Transport::Usb => EndpointInstance::usb(),
            Transport::Ble => EndpointInstance::ble(self.active_profile),
        }
    }

    fn ble_active_profile_index(&self) -> u8 {
        self.active_profile
    }

    fn ble_active_profile_is_connected(&self) -> bool {
        self.active_profile_status().connected
    }

    fn ble_active_profile_is_open(&self) -> bool {
        !self.active_profile_status().bonded
    }

    fn keymap_highest_layer_active(&self) -> u8 {
        // The default layer counts as active even with an empty state.
        (31 - (self.layer_state | 1).leading_zeros()) as u8
    }

    fn keymap_layer_name(&self, layer: u8) -> Option<&'static str> {
        self.layer_names.get(layer as usize).copied().flatten()
    }

    fn split_peripheral_is_connected(&self) -> bool {
        self.split_connected
    }
}

// ── Tests ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    static NAMES: [Option<&str>; 4] = [Some("BASE"), Some("LOWER"), None, Some("ADJUST")];

    fn host() -> HostState {
        HostState::new(&NAMES)
    }

    #[test]
    fn default_state() {
        let h = host();
        assert_eq!(h.battery_state_of_charge(), 100);
        assert!(!h.usb_is_powered());
        assert_eq!(h.ble_active_profile_index(), 0);
        assert!(!h.ble_active_profile_is_connected());
        assert!(h.ble_active_profile_is_open());
        assert_eq!(h.keymap_highest_layer_active(), 0);
        assert_eq!(h.keymap_layer_name(0), Some("BASE"));
        assert!(!h.split_peripheral_is_connected());
        assert_eq!(h.endpoints_selected(), EndpointInstance::ble(0));
    }

    #[test]
    fn battery_is_clamped() {
        let mut h = host();
        h.apply(&StatusEvent::BatteryStateChanged { state_of_charge: 150 })
            .unwrap();
        assert_eq!(h.battery_state_of_charge(), 100);
        h.apply(&StatusEvent::BatteryStateChanged { state_of_charge: 42 })
            .unwrap();
        assert_eq!(h.battery_state_of_charge(), 42);
    }

    #[test]
    fn highest_layer_tracks_activation() {
        let mut h = host();
        h.apply(&StatusEvent::LayerStateChanged { layer: 1, active: true })
            .unwrap();
        h.apply(&StatusEvent::LayerStateChanged { layer: 3, active: true })
            .unwrap();
        assert_eq!(h.keymap_highest_layer_active(), 3);
        assert_eq!(h.keymap_layer_name(3), Some("ADJUST"));

        h.apply(&StatusEvent::LayerStateChanged { layer: 3, active: false })
            .unwrap();
        assert_eq!(h.keymap_highest_layer_active(), 1);
    }

    #[test]
    fn default_layer_reported_when_state_empty() {
        let mut h = host();
        h.apply(&StatusEvent::LayerStateChanged { layer: 0, active: false })
            .unwrap();
        assert_eq!(h.keymap_highest_layer_active(), 0);
    }

    #[test]
    fn layer_names_past_table_are_none() {
        let h = host();
        assert_eq!(h.keymap_layer_name(2), None);
        assert_eq!(h.keymap_layer_name(10), None);
    }

    #[test]
    fn layer_31_is_highest_possible() {
        let mut h = host();
        h.apply(&StatusEvent::LayerStateChanged { layer: 31, active: true })
            .unwrap();
        assert_eq!(h.keymap_highest_layer_active(), 31);
    }

    #[test]
    fn out_of_range_layer_rejected() {
        let mut h = host();
        assert_eq!(
            h.apply(&StatusEvent::LayerStateChanged { layer: 32, active: true }),
            Err(StatusError::InvalidLayerIndex)
        );
        assert_eq!(h.keymap_highest_layer_active(), 0);
    }

    #[test]
    fn profile_change_updates_active_profile() {
        let mut h = host();
        h.apply(&StatusEvent::BleActiveProfileChanged {
            index: 2,
            connected: true,
            bonded: true,
        })
        .unwrap();
        assert_eq!(h.ble_active_profile_index(), 2);
        assert!(h.ble_active_profile_is_connected());
        assert!(!h.ble_active_profile_is_open());
        assert_eq!(h.profile(0), Some(&ProfileStatus::default()));
    }

    #[test]
    fn out_of_range_profile_rejected() {
        let mut h = host();
        let ev = StatusEvent::BleActiveProfileChanged {
            index: BLE_PROFILE_COUNT as u8,
            connected: true,
            bonded: true,
        };
        assert_eq!(h.apply(&ev), Err(StatusError::InvalidProfileIndex));
        assert_eq!(h.ble_active_profile_index(), 0);

        let ev = StatusEvent::EndpointChanged {
            endpoint: EndpointInstance::ble(9),
        };
        assert_eq!(h.apply(&ev), Err(StatusError::InvalidProfileIndex));
        assert_eq!(h.preferred_transport(), Transport::Ble);
    }

    #[test]
    fn ble_preferred_falls_back_to_usb() {
        let mut h = host();
        h.apply(&StatusEvent::UsbConnStateChanged {
            state: UsbConnState::Hid,
        })
        .unwrap();
        // Profile 0 is not connected, USB is enumerated.
        assert_eq!(h.endpoints_selected(), EndpointInstance::usb());

        h.apply(&StatusEvent::BleActiveProfileChanged {
            index: 0,
            connected: true,
            bonded: true,
        })
        .unwrap();
        assert_eq!(h.endpoints_selected(), EndpointInstance::ble(0));
    }

    #[test]
    fn usb_preferred_falls_back_to_ble() {
        let mut h = host();
        h.apply(&StatusEvent::BleActiveProfileChanged {
            index: 1,
            connected: true,
            bonded: true,
        })
        .unwrap();
        h.apply(&StatusEvent::EndpointChanged {
            endpoint: EndpointInstance::usb(),
        })
        .unwrap();
        // Powered but not enumerated: USB is not ready.
        h.apply(&StatusEvent::UsbConnStateChanged {
            state: UsbConnState::Powered,
        })
        .unwrap();
        assert_eq!(h.endpoints_selected(), EndpointInstance::ble(1));

        h.apply(&StatusEvent::UsbConnStateChanged {
            state: UsbConnState::Hid,
        })
        .unwrap();
        assert_eq!(h.endpoints_selected(), EndpointInstance::usb());
    }

    #[test]
    fn nothing_ready_keeps_preferred_transport() {
        let mut h = host();
        h.apply(&StatusEvent::EndpointChanged {
            endpoint: EndpointInstance::usb(),
        })
        .unwrap();
        assert_eq!(h.endpoints_selected(), EndpointInstance::usb());
    }

    #[test]
    fn ble_endpoint_change_selects_profile() {
        let mut h = host();
        h.apply(&StatusEvent::EndpointChanged {
            endpoint: EndpointInstance::ble(4),
        })
        .unwrap();
        assert_eq!(h.ble_active_profile_index(), 4);
        assert_eq!(h.endpoints_selected(), EndpointInstance::ble(4));
    }

    #[test]
    fn split_link_tracked() {
        let mut h = host();
        h.apply(&StatusEvent::SplitPeripheralStatusChanged { connected: true })
            .unwrap();
        assert!(h.split_peripheral_is_connected());
    }
}
