//! Status cycle demo
//!
//! Standalone hardware demonstration that drives a [`StatusScreen`] from a
//! scripted list of events, with no display task and no event queue. Every
//! two seconds the next event is applied to a local [`HostState`], routed to
//! the screen, and the panel is flushed if a widget redrew. Useful for
//! checking the central layout on real hardware without a keyboard stack.
//!
//! # Wiring
//!
//! | Signal    | Pico 2 Pin | Notes           |
//! |-----------|------------|-----------------|
//! | I2C0 SDA  | GP20       |                 |
//! | I2C0 SCL  | GP21       |                 |
//! | OLED VCC  | 3V3        |                 |
//! | OLED GND  | GND        |                 |

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp as hal;
use embassy_rp::bind_interrupts;
use embassy_rp::block::ImageDef;
use embassy_rp::i2c::{self, I2c};
use embassy_rp::peripherals::I2C0;
use embassy_time::{Duration, Timer};
use {defmt_rtt as _, panic_probe as _};

use split_oled_display_rs::{DisplayConfig, OledDriver, StatusScreen};
use split_status::status::{EndpointInstance, HostState, StatusEvent, UsbConnState};

/// Tell the Boot ROM about our application.
#[link_section = ".start_block"]
#[used]
pub static IMAGE_DEF: ImageDef = hal::block::ImageDef::secure_exe();

bind_interrupts!(struct Irqs {
    I2C0_IRQ => i2c::InterruptHandler<I2C0>;
});

static LAYER_NAMES: [Option<&str>; 3] = [Some("QWERTY"), Some("NAV"), None];

/// Events replayed in order, then from the top again.
const SCRIPT: [StatusEvent; 10] = [
    StatusEvent::BatteryStateChanged { state_of_charge: 80 },
    StatusEvent::UsbConnStateChanged { state: UsbConnState::Powered },
    StatusEvent::BleActiveProfileChanged { index: 0, connected: true, bonded: true },
    StatusEvent::LayerStateChanged { layer: 1, active: true },
    StatusEvent::LayerStateChanged { layer: 2, active: true },
    StatusEvent::BleActiveProfileChanged { index: 2, connected: false, bonded: true },
    StatusEvent::UsbConnStateChanged { state: UsbConnState::Hid },
    StatusEvent::EndpointChanged { endpoint: EndpointInstance::usb() },
    StatusEvent::LayerStateChanged { layer: 2, active: false },
    StatusEvent::BatteryStateChanged { state_of_charge: 15 },
];

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    let p = embassy_rp::init(Default::default());
    info!("Status cycle demo starting");

    let i2c = I2c::new_async(
        p.I2C0,
        p.PIN_21, // SCL
        p.PIN_20, // SDA
        Irqs,
        i2c::Config::default(),
    );

    let config = DisplayConfig::default();
    let mut oled = OledDriver::new(i2c, &config);
    oled.init().await.expect("OLED init failed");
    info!("OLED initialised");

    let mut host = HostState::new(&LAYER_NAMES);
    let mut screen = StatusScreen::new(&config, &host).expect("screen setup failed");
    let mut redraw = true;

    for event in SCRIPT.iter().cycle() {
        if redraw {
            if let Err(e) = oled.show(&screen).await {
                warn!("Redraw failed: {}", e);
            }
        }

        Timer::after(Duration::from_secs(2)).await;

        match host.apply(event) {
            Ok(()) => redraw = screen.handle_event(&host, event),
            Err(e) => {
                warn!("Event rejected: {}", e);
                redraw = false;
            }
        }
    }
}
