//! split-hw-interface
//!
//! Status display firmware for one half of a split keyboard on the
//! Raspberry Pi Pico 2. Wires the status model and the OLED widget crate
//! into a live loop:
//!
//! 1. The battery task samples VSYS through the ADC and publishes a
//!    `BatteryStateChanged` event whenever the state of charge moves.
//! 2. The VBUS task watches the USB sense pin and publishes
//!    `UsbConnStateChanged` on plug / unplug.
//! 3. `publish_event()` applies each event to the shared `HostState`
//!    mirror and queues it.
//! 4. The OLED task drains the queue, redraws the widgets subscribed to
//!    the event, and flushes the new frame.
//!
//! Build with `--features peripheral` for the right half (slideshow and
//! battery overlay); the default build is the central half.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::adc::{self, Adc, Channel as AdcChannel};
use embassy_rp::bind_interrupts;
use embassy_rp::block::ImageDef;
use embassy_rp::gpio::{Input, Pull};
use embassy_rp::i2c::{self, I2c};
use embassy_rp::peripherals::I2C0;
use embassy_sync::channel::Channel;
use embassy_sync::mutex::Mutex;
use embassy_time::{Duration, Ticker};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use split_oled_display_rs::{
    display_update_task, publish_event, DisplayConfig, OledDriver, SharedStatus, StatusChannel,
};
use split_status::status::{battery::mv_to_state_of_charge, HostState, StatusEvent, UsbConnState};

// ---------------------------------------------------------------------------
// Boot block and interrupt binding
// ---------------------------------------------------------------------------

/// Tell the RP2350 Boot ROM about our application.
#[link_section = ".start_block"]
#[used]
pub static IMAGE_DEF: ImageDef = embassy_rp::block::ImageDef::secure_exe();

bind_interrupts!(struct Irqs {
    I2C0_IRQ => i2c::InterruptHandler<I2C0>;
    ADC_IRQ_FIFO => adc::InterruptHandler;
});

// ---------------------------------------------------------------------------
// Static storage
// ---------------------------------------------------------------------------

/// Keymap layer names, indexed by layer.
static LAYER_NAMES: [Option<&str>; 4] =
    [Some("BASE"), Some("LOWER"), Some("RAISE"), Some("ADJUST")];

/// Host state mirror, written by the publisher tasks, read by the OLED task.
static STATUS: StaticCell<SharedStatus> = StaticCell::new();

/// Events queued for the OLED task.
static EVENTS: StaticCell<StatusChannel> = StaticCell::new();

/// How often VSYS is sampled.
const BATTERY_SAMPLE_PERIOD: Duration = Duration::from_secs(60);

/// OLED I2C type: the panel has I2C0 to itself.
type OledI2c = I2c<'static, I2C0, i2c::Async>;

// ---------------------------------------------------------------------------
// Tasks
// ---------------------------------------------------------------------------

/// Thin wrapper that monomorphises the generic `display_update_task` so it can
/// be spawned as a concrete Embassy task.
#[embassy_executor::task]
async fn oled_task(
    driver: OledDriver<OledI2c>,
    status: &'static SharedStatus,
    events: &'static StatusChannel,
    config: DisplayConfig,
) {
    display_update_task(driver, status, events, config).await;
}

/// Convert a raw 12-bit ADC reading of VSYS/3 to millivolts.
fn vsys_mv(raw: u16) -> u16 {
    (raw as u32 * 3 * 3300 / 4096) as u16
}

/// Periodic battery sampling task.
///
/// Publishes only when the state of charge actually changes, so the
/// display is not woken every sample.
#[embassy_executor::task]
async fn battery_task(
    mut adc: Adc<'static, adc::Async>,
    mut vsys: AdcChannel<'static>,
    status: &'static SharedStatus,
    events: &'static StatusChannel,
) {
    info!("Battery task started");

    let mut ticker = Ticker::every(BATTERY_SAMPLE_PERIOD);
    let mut last_soc: Option<u8> = None;

    loop {
        match adc.read(&mut vsys).await {
            Ok(raw) => {
                let mv = vsys_mv(raw);
                let soc = mv_to_state_of_charge(mv);
                if last_soc != Some(soc) {
                    debug!("VSYS {} mV -> {}%", mv, soc);
                    let event = StatusEvent::BatteryStateChanged {
                        state_of_charge: soc,
                    };
                    if let Err(e) = publish_event(status, events, event).await {
                        warn!("Battery event rejected: {}", e);
                    }
                    last_soc = Some(soc);
                }
            }
            Err(_) => error!("VSYS read failed"),
        }

        ticker.next().await;
    }
}

/// USB VBUS sense task.
///
/// Without a USB stack the best this board can report is "powered".
#[embassy_executor::task]
async fn vbus_task(
    mut vbus: Input<'static>,
    status: &'static SharedStatus,
    events: &'static StatusChannel,
) {
    info!("VBUS task started");

    loop {
        let state = if vbus.is_high() {
            UsbConnState::Powered
        } else {
            UsbConnState::None
        };
        let event = StatusEvent::UsbConnStateChanged { state };
        if let Err(e) = publish_event(status, events, event).await {
            warn!("USB event rejected: {}", e);
        }

        vbus.wait_for_any_edge().await;
    }
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_rp::init(Default::default());
    info!("split-hw-interface starting");

    // -- Pin assignments ----------------------------------------------------
    // I2C_SDA  → GP20  (p.PIN_20)
    // I2C_SCL  → GP21  (p.PIN_21)
    // VBUS_DET → GP24  (p.PIN_24)  high while USB power is present
    // VSYS/3   → GP29  (p.PIN_29)  ADC3
    // -----------------------------------------------------------------------

    #[cfg(feature = "peripheral")]
    let display_config = DisplayConfig::peripheral();
    #[cfg(not(feature = "peripheral"))]
    let display_config = DisplayConfig::default();

    let i2c = I2c::new_async(
        p.I2C0,
        p.PIN_21, // SCL
        p.PIN_20, // SDA
        Irqs,
        i2c::Config::default(),
    );
    let oled_driver = OledDriver::new(i2c, &display_config);

    let adc = Adc::new(p.ADC, Irqs, adc::Config::default());
    let vsys = AdcChannel::new_pin(p.PIN_29, Pull::None);
    let vbus = Input::new(p.PIN_24, Pull::None);

    let status: &'static SharedStatus = STATUS.init(Mutex::new(HostState::new(&LAYER_NAMES)));
    let events: &'static StatusChannel = EVENTS.init(Channel::new());

    // -- Spawn tasks --------------------------------------------------------

    spawner.spawn(unwrap!(oled_task(oled_driver, status, events, display_config)));
    spawner.spawn(unwrap!(battery_task(adc, vsys, status, events)));
    spawner.spawn(unwrap!(vbus_task(vbus, status, events)));

    info!("All tasks spawned as {}", display_config.role);
}
