//! Command dispatcher: one bounded, non-blocking pass over every inbound
//! queue per call to [`Dispatcher::tick`].
//!
//! Per tick, in order:
//!
//! 1. at most one host report: MESSAGE is relayed to the addressed node,
//!    BAUD reconfigures it and answers `ACK`/`NAK`, INFO answers HARDWARE,
//!    VERSION, FREQUENCY and the node's CAN_BTR as four separate reports;
//! 2. at most one frame from CAN1, relayed to the host;
//! 3. at most one frame from CAN2, relayed to the host;
//! 4. one activity indicator step.
//!
//! Outbound queues are drained by the transport collaborators on their own
//! schedule. A full outbound queue drops the report or frame and bumps a
//! counter in [`DispatchStats`]; nothing is reported to the host.
use crate::gateway::activity::{ActivityFlag, ActivityIndicator};
use crate::gateway::config::{DeviceIdentity, GatewayConfig};
use crate::gateway::reconfigure::reconfigure;
use crate::protocol::codec::{
    decode_command, encode_ack, encode_bit_timing, encode_message, encode_nak, encode_string,
    BitTimingValue, Report,
};
use crate::protocol::command::{Command, CommandCode, Node};
use crate::protocol::transport::can_frame::CanFrame;
use crate::protocol::transport::traits::{
    bit_timing_controller::BitTimingController, can_port::CanPort, status_led::StatusLed,
    usb_link::UsbLink,
};

//==================================================================================CONTEXT
/// Everything a tick touches, owned by the firmware root and lent to the
/// dispatcher for the duration of the call.
pub struct GatewayContext<'a, U, P1, P2, L> {
    pub usb: &'a mut U,
    pub can1: &'a mut P1,
    pub can2: &'a mut P2,
    pub led: &'a mut L,
    /// Raised whenever a frame is accepted by an outbound queue, in either
    /// direction. Consumed by the indicator.
    pub activity: &'a ActivityFlag,
}

//==================================================================================STATS
/// Monotonic counters, wrapping on overflow.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DispatchStats {
    /// Reports taken from the USB-in queue.
    pub usb_commands: u32,
    /// Frames handed to a CAN-out or the USB-out queue.
    pub can_frames_routed: u32,
    /// MESSAGE/BAUD reports that failed to decode.
    pub malformed_reports: u32,
    /// Reports whose command byte has no host-to-device meaning.
    pub unknown_commands: u32,
    pub usb_out_dropped: u32,
    pub can_out_dropped: u32,
    pub reconfigure_failures: u32,
}

//==================================================================================DISPATCHER
pub struct Dispatcher {
    identity: DeviceIdentity,
    indicator: ActivityIndicator,
    stats: DispatchStats,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new(GatewayConfig::default())
    }
}

impl Dispatcher {
    pub const fn new(config: GatewayConfig) -> Self {
        Self {
            identity: config.identity,
            indicator: ActivityIndicator::new(config.pulse_ticks, config.cooldown_ticks),
            stats: DispatchStats {
                usb_commands: 0,
                can_frames_routed: 0,
                malformed_reports: 0,
                unknown_commands: 0,
                usb_out_dropped: 0,
                can_out_dropped: 0,
                reconfigure_failures: 0,
            },
        }
    }

    #[inline]
    pub fn stats(&self) -> &DispatchStats {
        &self.stats
    }

    #[inline]
    pub fn indicator(&self) -> &ActivityIndicator {
        &self.indicator
    }

    #[inline]
    pub fn identity(&self) -> &DeviceIdentity {
        &self.identity
    }

    /// Run one dispatch cycle. Bounded work: one item per source.
    pub fn tick<U, P1, P2, L>(&mut self, ctx: &mut GatewayContext<'_, U, P1, P2, L>)
    where
        U: UsbLink,
        P1: CanPort,
        P2: CanPort,
        L: StatusLed,
    {
        ctx.led.set_running(true);

        if let Some(report) = ctx.usb.poll_incoming() {
            self.stats.usb_commands = self.stats.usb_commands.wrapping_add(1);
            self.handle_report(&report, ctx);
        }

        self.forward_to_host(Node::Can1, &mut *ctx.can1, &mut *ctx.usb, ctx.activity);
        self.forward_to_host(Node::Can2, &mut *ctx.can2, &mut *ctx.usb, ctx.activity);

        self.indicator.tick(ctx.activity, &mut *ctx.led);
    }

    //==============================================================HOST_TO_DEVICE
    fn handle_report<U, P1, P2, L>(
        &mut self,
        report: &Report,
        ctx: &mut GatewayContext<'_, U, P1, P2, L>,
    ) where
        U: UsbLink,
        P1: CanPort,
        P2: CanPort,
        L: StatusLed,
    {
        let command = match decode_command(report) {
            Ok(command) => command,
            Err(_err) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("Dropping malformed report: {}", _err);
                self.stats.malformed_reports = self.stats.malformed_reports.wrapping_add(1);
                return;
            }
        };

        match command {
            Command::Message { node, frame } => match node {
                Node::Can1 => self.forward_to_bus(&mut *ctx.can1, frame, ctx.activity),
                Node::Can2 => self.forward_to_bus(&mut *ctx.can2, frame, ctx.activity),
            },
            Command::Baud { node, timing } => {
                let reply = match node {
                    Node::Can1 => self.change_bit_timing(ctx.can1.controller(), timing),
                    Node::Can2 => self.change_bit_timing(ctx.can2.controller(), timing),
                };
                self.send_to_host(&mut *ctx.usb, reply);
            }
            Command::Info { node } => {
                self.send_identity(&mut *ctx.usb);
                let timing = match node {
                    Some(Node::Can1) => Some((ctx.can1.controller().bit_timing(), Node::Can1)),
                    Some(Node::Can2) => Some((ctx.can2.controller().bit_timing(), Node::Can2)),
                    None => None,
                };
                if let Some((timing, node)) = timing {
                    self.send_to_host(&mut *ctx.usb, encode_bit_timing(timing, node));
                }
            }
            Command::Unknown(_code) => {
                #[cfg(feature = "defmt")]
                defmt::debug!("Ignoring command {=u8:#04x}", _code);
                self.stats.unknown_commands = self.stats.unknown_commands.wrapping_add(1);
            }
        }
    }

    fn forward_to_bus<P: CanPort>(
        &mut self,
        port: &mut P,
        frame: CanFrame,
        activity: &ActivityFlag,
    ) {
        if port.enqueue_outgoing(frame) {
            self.stats.can_frames_routed = self.stats.can_frames_routed.wrapping_add(1);
            activity.set();
        } else {
            #[cfg(feature = "defmt")]
            defmt::warn!("CAN-out queue full, frame {=u32:#x} dropped", frame.id.raw());
            self.stats.can_out_dropped = self.stats.can_out_dropped.wrapping_add(1);
        }
    }

    fn change_bit_timing<C: BitTimingController>(
        &mut self,
        controller: &mut C,
        timing: BitTimingValue,
    ) -> Report {
        match reconfigure(controller, timing) {
            Ok(()) => encode_ack(),
            Err(_) => {
                self.stats.reconfigure_failures = self.stats.reconfigure_failures.wrapping_add(1);
                encode_nak()
            }
        }
    }

    fn send_identity<U: UsbLink>(&mut self, usb: &mut U) {
        let replies = [
            (CommandCode::Hardware, self.identity.hardware()),
            (CommandCode::Version, self.identity.version()),
            (CommandCode::Frequency, self.identity.frequency()),
        ];
        for (code, text) in replies {
            match encode_string(code, text) {
                Ok(report) => {
                    self.send_to_host(usb, report);
                }
                Err(_err) => {
                    #[cfg(feature = "defmt")]
                    defmt::error!("Identity string rejected: {}", _err);
                }
            }
        }
    }

    //==============================================================DEVICE_TO_HOST
    /// Relay one received frame, tagged with the node it arrived on.
    fn forward_to_host<P: CanPort, U: UsbLink>(
        &mut self,
        node: Node,
        port: &mut P,
        usb: &mut U,
        activity: &ActivityFlag,
    ) {
        let Some(frame) = port.poll_incoming() else {
            return;
        };

        // Standard and extended identifiers take the same path; the IDE flag
        // travels in the report for the host to interpret.
        #[cfg(feature = "defmt")]
        defmt::trace!(
            "{:?} rx id={=u32:#x} ext={=bool} dlc={=usize}",
            node,
            frame.id.raw(),
            frame.id.is_extended(),
            frame.len
        );

        if self.send_to_host(usb, encode_message(node, &frame)) {
            self.stats.can_frames_routed = self.stats.can_frames_routed.wrapping_add(1);
            activity.set();
        }
    }

    fn send_to_host<U: UsbLink>(&mut self, usb: &mut U, report: Report) -> bool {
        let accepted = usb.enqueue_outgoing(report);
        if !accepted {
            #[cfg(feature = "defmt")]
            defmt::warn!("USB-out queue full, report {=u8:#04x} dropped", report.command_byte());
            self.stats.usb_out_dropped = self.stats.usb_out_dropped.wrapping_add(1);
        }
        accepted
    }
}
