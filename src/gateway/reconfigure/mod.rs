//! Runtime bit timing change for one CAN controller.
//!
//! The sequence always runs to the end; a failed start is reported to the
//! host as `NAK` and not retried. The host retries by sending BAUD again.
use crate::error::ReconfigureError;
use crate::protocol::codec::BitTimingValue;
use crate::protocol::transport::traits::bit_timing_controller::BitTimingController;

/// Stop the controller, load `timing`, and start it again.
///
/// 1. stop (harmless if never started);
/// 2. one-time hardware bring-up if that never happened;
/// 3. write the timing register;
/// 4. reset error code and state to "ready";
/// 5. start.
pub fn reconfigure<C: BitTimingController>(
    controller: &mut C,
    timing: BitTimingValue,
) -> Result<(), ReconfigureError<C::Error>> {
    #[cfg(feature = "defmt")]
    defmt::info!("Reconfiguring CAN controller, BTR = {=u32:#010x}", timing.0);

    controller.stop();
    if controller.is_uninitialized() {
        #[cfg(feature = "defmt")]
        defmt::debug!("Controller never brought up, running hardware init");
        controller.bring_up();
    }
    controller.configure(timing);
    controller.reset_state();

    controller.start().map_err(|err| {
        #[cfg(feature = "defmt")]
        defmt::warn!(
            "CAN controller failed to start: {:?}",
            defmt::Debug2Format(&err)
        );
        ReconfigureError::StartFailed(err)
    })
}
