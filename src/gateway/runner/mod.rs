//! Async driver for the dispatcher: tick, then sleep one polling period,
//! until a stop signal arrives.
use embassy_sync::{blocking_mutex::raw::RawMutex, signal::Signal};
use embassy_time::Duration;
use futures_util::{future::select, future::Either, pin_mut};

use crate::gateway::dispatcher::{Dispatcher, GatewayContext};
use crate::protocol::transport::traits::{
    can_port::CanPort, poll_timer::PollTimer, status_led::StatusLed, usb_link::UsbLink,
};

/// Run dispatch cycles every `period` until `stop` is signaled.
///
/// A stop raised before the call returns immediately without ticking. A stop
/// raised while sleeping cuts the sleep short. Returns the number of ticks run.
pub async fn run_until<U, P1, P2, L, T, M>(
    dispatcher: &mut Dispatcher,
    ctx: &mut GatewayContext<'_, U, P1, P2, L>,
    timer: &mut T,
    period: Duration,
    stop: &Signal<M, ()>,
) -> u32
where
    U: UsbLink,
    P1: CanPort,
    P2: CanPort,
    L: StatusLed,
    T: PollTimer,
    M: RawMutex,
{
    #[cfg(feature = "defmt")]
    defmt::info!("Bridge runner started, period = {=u64} us", period.as_micros());

    let mut ticks: u32 = 0;
    loop {
        if stop.try_take().is_some() {
            break;
        }

        dispatcher.tick(ctx);
        ticks = ticks.wrapping_add(1);

        let sleep = timer.delay(period);
        let stopped = stop.wait();
        pin_mut!(sleep);
        pin_mut!(stopped);

        match select(sleep, stopped).await {
            Either::Left(((), _)) => {}
            Either::Right(((), _)) => break,
        }
    }

    #[cfg(feature = "defmt")]
    defmt::info!("Bridge runner stopped after {=u32} ticks", ticks);
    ticks
}
