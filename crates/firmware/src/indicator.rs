//! Tasks and types related to the filter status LED.

use core::cell::RefCell;
use embassy_executor::InterruptExecutor;
use embassy_stm32::{gpio::Output, interrupt};
use embassy_sync::{
    blocking_mutex::{Mutex, raw::CriticalSectionRawMutex},
    signal::Signal,
};
use embassy_time::{Duration, Timer};
use mgb_link_lib::{
    filter_mode::FilterMode,
    indicator::{BlinkIndicator, Indicator as _, OneShotTimer},
};

/// Runs the [`blink`] task. The main loop can stay busy draining MIDI for as long as input keeps arriving, so alarms
/// are fired from an interrupt-driven executor which preempts it. UART5 is unused on this board and serves only as
/// the executor's software interrupt.
pub static BLINK_EXECUTOR: InterruptExecutor = InterruptExecutor::new();

#[interrupt]
unsafe fn UART5() {
    unsafe { BLINK_EXECUTOR.on_interrupt() }
}

/// The indicator is touched from both the main loop and the [`blink`] task, so it lives behind a blocking mutex.
pub type SharedIndicator =
    Mutex<CriticalSectionRawMutex, RefCell<BlinkIndicator<Output<'static>, BlinkAlarm>>>;

/// Carries the delay of the single outstanding blink alarm to the [`blink`] task.
static BLINK_ALARM: Signal<CriticalSectionRawMutex, Duration> = Signal::new();

/// [`OneShotTimer`] backed by the [`blink`] task.
pub struct BlinkAlarm;

impl OneShotTimer for BlinkAlarm {
    fn schedule_once(&mut self, delay: Duration) {
        BLINK_ALARM.signal(delay);
    }
}

/// Fires blink alarms. Once an alarm is set it always fires; the indicator then consults the filter to decide
/// whether to keep blinking.
///
/// Link transfers mask interrupts for their bit frames, so an alarm never lands in the middle of one.
#[embassy_executor::task]
pub async fn blink(indicator: &'static SharedIndicator, filter: &'static FilterMode) -> ! {
    loop {
        let delay = BLINK_ALARM.wait().await;
        Timer::after(delay).await;
        indicator.lock(|cell| cell.borrow_mut().toggle_and_maybe_rearm(filter));
    }
}
