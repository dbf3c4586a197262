//! Operator UART receive task
//!
//! Forwards raw bytes to the control loop. Line assembly and decoding
//! happen in the control task so that a command is applied on a tick
//! boundary.

use defmt::*;
use embassy_rp::uart::BufferedUartRx;
use embedded_io_async::Read;

use crate::channels::RX_BYTES;

/// Buffer size for UART receive
const RX_BUF_SIZE: usize = 64;

/// Serial RX task - forwards operator bytes to the control loop
#[embassy_executor::task]
pub async fn serial_rx_task(mut rx: BufferedUartRx) {
    info!("Serial RX task started");

    let mut buf = [0u8; RX_BUF_SIZE];

    loop {
        match rx.read(&mut buf).await {
            Ok(n) if n > 0 => {
                trace!("RX: {} bytes", n);
                for &byte in &buf[..n] {
                    // Waits while the channel is full; the UART buffer holds the backlog
                    RX_BYTES.send(byte).await;
                }
            }
            Ok(_) => {
                // No bytes read, continue
            }
            Err(e) => {
                warn!("UART read error: {:?}", e);
            }
        }
    }
}
