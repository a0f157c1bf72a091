//! Battery voltage to state-of-charge conversion.

/// Cell voltage (mV) at or above which the battery reads 100 %.
pub const FULL_MV: u16 = 4200;

/// Cell voltage (mV) at or below which the battery reads 0 %.
pub const EMPTY_MV: u16 = 3450;

/// Convert a Li-ion cell voltage to a state of charge in percent.
///
/// Linear between [`EMPTY_MV`] and [`FULL_MV`]:
/// `mv * 2 / 15 - 459`, clamped to `0..=100`.
///
/// ```
/// use split_status::status::battery::mv_to_state_of_charge;
///
/// assert_eq!(mv_to_state_of_charge(4300), 100);
/// assert_eq!(mv_to_state_of_charge(3825), 51);
/// assert_eq!(mv_to_state_of_charge(3000), 0);
/// ```
pub fn mv_to_state_of_charge(mv: u16) -> u8 {
    if mv >= FULL_MV {
        return 100;
    }
    if mv <= EMPTY_MV {
        return 0;
    }
    let pct = (mv as i32) * 2 / 15 - 459;
    pct.clamp(0, 100) as u8
}
