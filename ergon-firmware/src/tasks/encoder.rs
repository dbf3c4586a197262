//! Quadrature encoder task
//!
//! Waits for edges on either encoder channel, decodes the new levels and
//! adds the resulting step to the shared count. The control loop only ever
//! reads that count.

use defmt::*;
use embassy_futures::select::select;
use embassy_rp::gpio::Input;

use ergon_core::config::QuadratureMode;
use ergon_drivers::encoder::QuadratureDecoder;

use crate::channels::ENCODER_COUNT;

/// Encoder task - turns A/B edges into encoder counts
#[embassy_executor::task]
pub async fn encoder_task(mut a: Input<'static>, mut b: Input<'static>, mode: QuadratureMode) {
    info!("Encoder task started ({:?})", mode);

    let mut decoder = QuadratureDecoder::new(mode, a.is_high(), b.is_high());
    let mut reported_invalid = 0;

    loop {
        select(a.wait_for_any_edge(), b.wait_for_any_edge()).await;

        let step = decoder.update(a.is_high(), b.is_high());
        ENCODER_COUNT.add(step as i64);

        let invalid = decoder.invalid_transitions();
        if invalid != reported_invalid {
            debug!("Encoder missed an edge ({} total)", invalid);
            reported_invalid = invalid;
        }
    }
}
