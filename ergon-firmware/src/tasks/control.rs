//! Control loop task
//!
//! Owns the [`ControlLoop`] and runs it on a fixed ticker. This is the only
//! writer of commanded torque and the energy ledger. Operator replies are
//! queued without waiting, so a slow serial link never stretches a tick.

use defmt::*;
use embassy_rp::gpio::Output;
use embassy_time::{Duration, Instant, Ticker};

use ergon_core::config::ControlConfig;
use ergon_core::ControlLoop;
use ergon_drivers::motor::HBridgeMotor;
use ergon_hal_rp2040::pwm::PwmChannelA;
use ergon_protocol::OperatorMessage;

use crate::channels::{send_operator, RxBytes, ENCODER_COUNT};

/// H-bridge motor as wired on the board
pub type Motor = HBridgeMotor<Output<'static>, Output<'static>, PwmChannelA>;

/// Control task - polls commands, reads the encoder and drives the motor
#[embassy_executor::task]
pub async fn control_task(motor: Motor, config: ControlConfig) {
    info!(
        "Control task started: tick={}ms, status={}ms, polarity={:?}",
        config.tick_interval_ms,
        config.status_interval_ms,
        config.polarity()
    );

    let mut control = ControlLoop::new(&config, &ENCODER_COUNT, RxBytes, motor);
    send_operator(OperatorMessage::Ready);

    let mut ticker = Ticker::every(Duration::from_millis(config.tick_interval_ms as u64));
    let mut faults = 0;

    loop {
        let report = control.tick(Instant::now().as_millis());

        match report.command {
            Some(Ok(cmd)) => {
                debug!(
                    "Command: torque={}, budget+={} -> balance={}",
                    cmd.torque, cmd.budget, report.balance
                );
            }
            Some(Err(e)) => {
                warn!("Command rejected: {:?}", e);
            }
            None => {}
        }
        if let Some(msg) = report.command_message() {
            send_operator(msg);
        }

        if let Some(status) = report.status {
            trace!(
                "Status: position={}, balance={}, drive={:?}",
                status.position,
                status.balance,
                report.drive
            );
            send_operator(status.message());
        }

        let motor_faults = control.motor().faults();
        if motor_faults != faults {
            warn!("Motor output fault ({} total)", motor_faults);
            faults = motor_faults;
        }

        ticker.next().await;
    }
}
