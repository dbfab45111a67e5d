//! mGB Link is [Embassy](https://embassy.dev)-based firmware for a bridge between a MIDI DIN input and the link
//! port of a Game Boy running a MIDI-aware cartridge program such as mGB. The firmware runs on the [Nucleo-F767ZI
//! development board](https://www.st.com/en/evaluation-tools/nucleo-f767zi.html), which is powered by an F7-series
//! STM32 microcontroller.
//!
//! Incoming MIDI is echoed unmodified on MIDI THRU and, byte by byte, shifted out to the Game Boy on the link
//! port's clock and data lines, with the Game Boy acting as the external-clock side of the transfer. Pressing the
//! user button toggles a filter which withholds Control Change messages from the Game Boy; the green LED blinks
//! while the filter is active and stays lit otherwise.
//!
//! For details about the hardware or how to use the device, see the `README`.

#![no_std]
#![no_main]

mod configuration;
mod delay;
mod indicator;
mod midi;

use crate::{
    configuration::{SYSCLK_HZ, UART_RX_BUFFER_LEN, UART_TX_BUFFER_LEN},
    delay::CycleDelay,
    indicator::{BLINK_EXECUTOR, BlinkAlarm, SharedIndicator},
    midi::{MidiIn, MidiThru},
};
use core::cell::RefCell;
use defmt::*;
use embassy_executor::Spawner;
use embassy_stm32::{
    bind_interrupts,
    gpio::{Input, Level, Output, Pull, Speed},
    interrupt::{self, InterruptExt, Priority},
    peripherals,
    usart::{self, BufferedUart},
};
use embassy_sync::blocking_mutex::Mutex;
use mgb_link_lib::{
    configuration::{ControlChangeFilter, LinkTiming},
    filter_mode::FilterMode,
    framer::MidiFramer,
    indicator::BlinkIndicator,
    link::LinkTransmitter,
    mode_toggle::ModeToggle,
};
use static_cell::StaticCell;

use defmt_rtt as _;
#[cfg(not(feature = "panic-probe"))]
use panic_halt as _;
#[cfg(feature = "panic-probe")]
use panic_probe as _;

bind_interrupts!(
    #[doc(hidden)]
    struct Irqs {
        USART6 => usart::BufferedInterruptHandler<peripherals::USART6>;
    }
);

/// Whether Control Change messages are withheld from the Game Boy. Resets to forwarding on every power cycle.
static FILTER_MODE: FilterMode = FilterMode::new(ControlChangeFilter::Forward);

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("Initializing mGB Link");

    let p = embassy_stm32::init(configuration::clocks());

    // LD1, the green user LED; lit while CC messages are forwarded
    let led = Output::new(p.PB0, Level::High, Speed::Low);
    static INDICATOR: StaticCell<SharedIndicator> = StaticCell::new();
    let indicator = INDICATOR.init(Mutex::new(RefCell::new(BlinkIndicator::new(
        led, BlinkAlarm,
    ))));
    // the blink alarms preempt the main loop, which may drain MIDI indefinitely under a dense stream
    interrupt::UART5.set_priority(Priority::P6);
    let blink_spawner = BLINK_EXECUTOR.start(interrupt::UART5);
    unwrap!(blink_spawner.spawn(indicator::blink(indicator, &FILTER_MODE)));

    // USART6 is broken out on the Arduino header as D0 (RX, PG9) and D1 (TX, PG14)
    static TX_BUFFER: StaticCell<[u8; UART_TX_BUFFER_LEN]> = StaticCell::new();
    static RX_BUFFER: StaticCell<[u8; UART_RX_BUFFER_LEN]> = StaticCell::new();
    let uart = unwrap!(BufferedUart::new(
        p.USART6,
        p.PG9,
        p.PG14,
        TX_BUFFER.init([0; UART_TX_BUFFER_LEN]),
        RX_BUFFER.init([0; UART_RX_BUFFER_LEN]),
        Irqs,
        configuration::midi_uart(),
    ));
    let (tx, rx) = uart.split();
    let mut midi_in = MidiIn::new(rx);
    let mut midi_thru = MidiThru::new(tx);

    // link port: clock on D7 (PF13), serial data on D6 (PE9)
    let clock = Output::new(p.PF13, Level::High, Speed::VeryHigh);
    let data = Output::new(p.PE9, Level::Low, Speed::VeryHigh);
    let mut link = LinkTransmitter::new(
        clock,
        data,
        CycleDelay::new(SYSCLK_HZ),
        LinkTiming::default(),
    );

    // B1, the blue user button; the board pulls it down externally
    let button = Input::new(p.PC13, Pull::None);

    let mut mode_toggle = ModeToggle::new();
    let mut framer = MidiFramer::new();

    info!("Bridging MIDI to the link port");
    loop {
        let pressed = button.is_high();
        let changed = indicator.lock(|cell| {
            mode_toggle.poll(pressed, &FILTER_MODE, &mut *cell.borrow_mut())
        });
        if let Some(mode) = changed {
            info!("Control Change filter: {}", mode);
        }

        framer.drain_and_forward(&mut midi_in, &mut midi_thru, &mut link, &FILTER_MODE);
    }
}
