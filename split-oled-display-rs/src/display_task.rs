//! Event-driven display task.
//!
//! The firmware publishes every [`StatusEvent`] with [`publish_event`],
//! which updates the shared [`HostState`] mirror and queues the event. The
//! display task drains the queue, lets the [`StatusScreen`] decide whether
//! the event matters, and flushes the panel only when something redrew.
//! On the peripheral half the task also wakes at slideshow frame
//! boundaries.

use embassy_sync::blocking_mutex::raw::{CriticalSectionRawMutex, RawMutex};
use embassy_sync::channel::Channel;
use embassy_sync::mutex::Mutex;
use embassy_time::{with_timeout, Duration, Instant};
use embedded_hal_async::i2c::I2c;

use split_status::status::{HostState, StatusError, StatusEvent};

use crate::driver::OledDriver;
use crate::error::OledError;
use crate::layout::DisplayConfig;
use crate::screen::StatusScreen;

/// Events that can be queued before the display task catches up.
pub const EVENT_QUEUE_DEPTH: usize = 8;

/// Host state mirror shared between event producers and the display task.
pub type SharedStatus = Mutex<CriticalSectionRawMutex, HostState>;

/// Queue of events waiting for the display task.
pub type StatusChannel = Channel<CriticalSectionRawMutex, StatusEvent, EVENT_QUEUE_DEPTH>;

/// Apply `event` to the shared mirror, then queue it for the display.
///
/// The mirror is updated first so the display task always snapshots the
/// post-event state. Rejected events are not queued.
///
/// Generic over the mutex kind so single-executor setups can share
/// [`NoopRawMutex`](embassy_sync::blocking_mutex::raw::NoopRawMutex) state;
/// the firmware passes [`SharedStatus`] and [`StatusChannel`].
///
/// # Errors
///
/// Returns the [`StatusError`] from [`HostState::apply`] for an out-of-range
/// profile or layer index.
pub async fn publish_event<M, const N: usize>(
    status: &Mutex<M, HostState>,
    events: &Channel<M, StatusEvent, N>,
    event: StatusEvent,
) -> Result<(), StatusError>
where
    M: RawMutex,
{
    status.lock().await.apply(&event)?;
    events.send(event).await;
    Ok(())
}

/// Status display loop.
///
/// This is a regular `async fn`, **not** an Embassy `#[task]`. Wrap it in
/// a concrete task, since Embassy tasks cannot be generic:
///
/// ```ignore
/// #[embassy_executor::task]
/// async fn oled_task(
///     driver: OledDriver<MyConcreteI2cType>,
///     status: &'static SharedStatus,
///     events: &'static StatusChannel,
///     config: DisplayConfig,
/// ) {
///     display_update_task(driver, status, events, config).await;
/// }
/// ```
///
/// # Control flow
///
/// 1. Initialise the panel, build the screen from the current mirror
///    state, and draw the first frame.
/// 2. Loop:
///    - Wait for the next event, or for the next slideshow frame boundary
///      when the screen animates.
///    - On an event, snapshot the mirror (mutex held briefly) and route
///      the event to the screen.
///    - Advance the slideshow to the current time.
///    - Render and flush if anything changed.
///
/// # Errors
///
/// * Initialisation or screen construction failure: logs and **returns**.
/// * Render / flush failure: logs and continues with the next event.
pub async fn display_update_task<I2C>(
    mut driver: OledDriver<I2C>,
    status: &'static SharedStatus,
    events: &'static StatusChannel,
    config: DisplayConfig,
) where
    I2C: I2c,
{
    // ── Initialisation ───────────────────────────────────────────────
    if let Err(_e) = driver.init().await {
        #[cfg(feature = "defmt")]
        defmt::error!("OLED init failed: {}", _e);
        return;
    }

    let started = Instant::now();
    let screen = {
        let host = status.lock().await;
        StatusScreen::new(&config, &*host).map_err(OledError::from)
    };
    let mut screen = match screen {
        Ok(screen) => screen,
        Err(_e) => {
            #[cfg(feature = "defmt")]
            defmt::error!("Status screen setup failed: {}", _e);
            return;
        }
    };

    #[cfg(feature = "defmt")]
    defmt::info!("OLED initialised as {}", config.role);

    if let Err(_e) = driver.show(&screen).await {
        #[cfg(feature = "defmt")]
        defmt::error!("Initial draw failed: {}", _e);
    }

    // ── Main loop ────────────────────────────────────────────────────
    loop {
        let event = match screen.ms_until_next_tick(started.elapsed().as_millis()) {
            Some(ms) => with_timeout(Duration::from_millis(ms), events.receive())
                .await
                .ok(),
            None => Some(events.receive().await),
        };

        let mut changed = false;
        if let Some(event) = event {
            let host = status.lock().await;
            changed |= screen.handle_event(&*host, &event);
        } // ← mutex released here, before any I2C work

        changed |= screen.tick(started.elapsed().as_millis());

        if !changed {
            continue;
        }

        if let Err(_e) = driver.show(&screen).await {
            #[cfg(feature = "defmt")]
            defmt::error!("Redraw failed: {}", _e);
        }
    }
}

// ── Tests ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use embassy_futures::block_on;
    use embassy_futures::select::{select, Either};
    use embassy_sync::blocking_mutex::raw::NoopRawMutex;
    use split_status::status::{StatusSource, BLE_PROFILE_COUNT};

    static NAMES: [Option<&str>; 2] = [Some("BASE"), Some("NAV")];

    fn status() -> Mutex<NoopRawMutex, HostState> {
        Mutex::new(HostState::new(&NAMES))
    }

    #[test]
    fn accepted_event_reaches_mirror_and_queue() {
        let status = status();
        let events: Channel<NoopRawMutex, StatusEvent, 4> = Channel::new();
        let ev = StatusEvent::LayerStateChanged { layer: 1, active: true };

        block_on(publish_event(&status, &events, ev)).unwrap();

        assert_eq!(block_on(status.lock()).keymap_highest_layer_active(), 1);
        assert_eq!(events.try_receive().ok(), Some(ev));
        assert!(events.try_receive().is_err());
    }

    #[test]
    fn rejected_layer_is_not_queued() {
        let status = status();
        let events: Channel<NoopRawMutex, StatusEvent, 4> = Channel::new();
        let ev = StatusEvent::LayerStateChanged { layer: 40, active: true };

        assert_eq!(
            block_on(publish_event(&status, &events, ev)),
            Err(StatusError::InvalidLayerIndex)
        );
        assert!(events.try_receive().is_err());
        assert_eq!(block_on(status.lock()).keymap_highest_layer_active(), 0);
    }

    #[test]
    fn rejected_profile_is_not_queued() {
        let status = status();
        let events: Channel<NoopRawMutex, StatusEvent, 4> = Channel::new();
        let ev = StatusEvent::BleActiveProfileChanged {
            index: BLE_PROFILE_COUNT as u8,
            connected: true,
            bonded: true,
        };

        assert_eq!(
            block_on(publish_event(&status, &events, ev)),
            Err(StatusError::InvalidProfileIndex)
        );
        assert!(events.try_receive().is_err());
        assert_eq!(block_on(status.lock()).ble_active_profile_index(), 0);
    }

    #[test]
    fn mirror_is_updated_before_the_send() {
        let status = status();
        let events: Channel<NoopRawMutex, StatusEvent, 1> = Channel::new();
        let filler = StatusEvent::BatteryStateChanged { state_of_charge: 90 };
        events.try_send(filler).unwrap();

        // The queue is full, so publishing blocks in the send.
        let ev = StatusEvent::BatteryStateChanged { state_of_charge: 40 };
        let blocked = block_on(select(
            publish_event(&status, &events, ev),
            core::future::ready(()),
        ));
        assert!(matches!(blocked, Either::Second(())));

        assert_eq!(block_on(status.lock()).battery_state_of_charge(), 40);
        assert_eq!(events.try_receive().ok(), Some(filler));
        assert!(events.try_receive().is_err());
    }
}
