//! Inter-task communication channels
//!
//! Defines the static channels used for communication between Embassy tasks.
//! Uses embassy-sync primitives for safe async communication.

use defmt::*;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;

use ergon_core::traits::ByteSource;
use ergon_drivers::encoder::SharedCount;
use ergon_protocol::OperatorMessage;

/// Channel capacity for received command bytes (one full line)
const RX_CHANNEL_SIZE: usize = ergon_protocol::MAX_LINE_LEN;

/// Channel capacity for operator replies
const OPERATOR_CHANNEL_SIZE: usize = 8;

/// Command bytes from the operator UART, consumed by the control loop
pub static RX_BYTES: Channel<CriticalSectionRawMutex, u8, RX_CHANNEL_SIZE> = Channel::new();

/// Replies to the operator (acknowledgements, errors, status lines)
pub static OPERATOR_TX: Channel<CriticalSectionRawMutex, OperatorMessage, OPERATOR_CHANNEL_SIZE> =
    Channel::new();

/// Running encoder count (written by the encoder task)
pub static ENCODER_COUNT: SharedCount = SharedCount::new();

/// Queue an operator reply, dropping it if the channel is full
pub fn send_operator(msg: OperatorMessage) {
    if OPERATOR_TX.try_send(msg).is_err() {
        warn!("Operator channel full, dropping message");
    }
}

/// Non-blocking view of [`RX_BYTES`] for the command channel
pub struct RxBytes;

impl ByteSource for RxBytes {
    fn try_read_byte(&mut self) -> Option<u8> {
        RX_BYTES.try_receive().ok()
    }
}
