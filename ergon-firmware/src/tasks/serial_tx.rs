//! Operator UART transmit task
//!
//! Renders operator messages as CRLF-terminated text lines.

use defmt::*;
use embassy_rp::uart::BufferedUartTx;
use embedded_io_async::Write;

use crate::channels::OPERATOR_TX;

/// Serial TX task - writes operator replies to the UART
#[embassy_executor::task]
pub async fn serial_tx_task(mut tx: BufferedUartTx) {
    info!("Serial TX task started");

    loop {
        let msg = OPERATOR_TX.receive().await;

        let line = match msg.render() {
            Ok(line) => line,
            Err(_) => {
                warn!("Operator message too long: {:?}", msg);
                continue;
            }
        };

        if let Err(e) = tx.write_all(line.as_bytes()).await {
            warn!("Failed to send operator line: {:?}", e);
        }
    }
}
