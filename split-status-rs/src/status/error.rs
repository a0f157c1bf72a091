/// Errors that can occur when updating the status model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StatusError {
    /// BLE profile index is out of bounds
    /// (must be < [`BLE_PROFILE_COUNT`](super::BLE_PROFILE_COUNT)).
    InvalidProfileIndex,
    /// Layer index is out of bounds (must be < [`MAX_LAYERS`](super::MAX_LAYERS)).
    InvalidLayerIndex,
    /// The widget list has no free slot left.
    WidgetListFull,
}
