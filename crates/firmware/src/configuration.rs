//! Board-level settings: clocks, the MIDI UART, and buffer sizes.

use embassy_stm32::{Config, time::Hertz, usart};

/// Core clock frequency produced by [`clocks`]; the link transmitter's delays count cycles of this clock.
pub const SYSCLK_HZ: u32 = 216_000_000;

/// MIDI 1.0 DIN serial rate.
pub const MIDI_BAUD_RATE: u32 = 31_250;

/// Size of the UART receive ring buffer. The main loop drains it between link transfers, each of which takes a
/// little over half a millisecond, so it only has to absorb bursts.
pub const UART_RX_BUFFER_LEN: usize = 256;

/// Size of the UART transmit ring buffer used for MIDI THRU. Bytes arriving while it is full are dropped.
pub const UART_TX_BUFFER_LEN: usize = 64;

/// Clock tree for the Nucleo-F767ZI, running the core at [`SYSCLK_HZ`] from the ST-LINK's 8MHz clock.
pub fn clocks() -> Config {
    let mut config = Config::default();
    {
        use embassy_stm32::rcc::*;
        // hse: high-speed external clock
        config.rcc.hse = Some(Hse {
            freq: Hertz(8_000_000),
            mode: HseMode::Bypass,
        });

        // pll: phase-locked loop, crucial for dividing clock
        config.rcc.pll_src = PllSource::HSE;
        config.rcc.pll = Some(Pll {
            prediv: PllPreDiv::DIV4,
            mul: PllMul::MUL216,
            divp: Some(PllPDiv::DIV2), // 8mhz / 4 * 216 / 2 = 216Mhz
            divq: None,
            divr: None,
        });
        config.rcc.ahb_pre = AHBPrescaler::DIV1;
        config.rcc.apb1_pre = APBPrescaler::DIV4;
        config.rcc.apb2_pre = APBPrescaler::DIV2;
        config.rcc.sys = Sysclk::PLL1_P;
    }
    config
}

/// MIDI framing: 1 start bit, 8 data bits, 1 stop bit, no parity.
pub fn midi_uart() -> usart::Config {
    let mut config = usart::Config::default();
    config.baudrate = MIDI_BAUD_RATE;
    config.data_bits = usart::DataBits::DataBits8;
    config.stop_bits = usart::StopBits::STOP1;
    config.parity = usart::Parity::ParityNone;
    config
}
