//! Collaborator contracts consumed by the bridge core: the USB report
//! channel, the two CAN ports with their controllers, the status LEDs, and
//! the timer used by the async runner.
pub mod bit_timing_controller;
pub mod can_port;
pub mod poll_timer;
pub mod status_led;
pub mod usb_link;
