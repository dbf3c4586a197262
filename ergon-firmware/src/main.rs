//! Ergon - Energy-Budgeted Torque Controller Firmware
//!
//! Main firmware binary for RP2040-based motor controller boards.
//! An operator grants the motor a torque and a budget of work over a serial
//! link; the controller drives the motor only while that budget lasts.
//!
//! Task layout:
//! - `serial_rx_task`: UART bytes into the command byte channel
//! - `encoder_task`: A/B edges into the shared encoder count
//! - `control_task`: the control loop, one tick every `tick_interval_ms`
//! - `serial_tx_task`: operator replies out of the UART

#![no_std]
#![no_main]

extern crate alloc;

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::peripherals::UART0;
use embassy_rp::pwm::Pwm;
use embassy_rp::uart::{BufferedInterruptHandler, Config as UartConfig, Uart};
use embedded_alloc::LlffHeap as Heap;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use ergon_core::config::{BoardConfig, MotorConfig, PinConfig};
use ergon_drivers::motor::{HBridgeConfig, HBridgeMotor};
use ergon_hal_rp2040::gpio::check_board;
use ergon_hal_rp2040::pin_bank;
use ergon_hal_rp2040::pwm::{carrier_config, PwmChannelA};

mod channels;
mod config;
mod tasks;

// Heap allocator for JSON command decoding
#[global_allocator]
static HEAP: Heap = Heap::empty();

// Heap size: 8KB
const HEAP_SIZE: usize = 8 * 1024;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 256]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 256]> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Ergon firmware starting...");

    // Initialize heap allocator
    init_heap();

    // Initialize RP2040 peripherals
    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = config::load_config();
    let board = match check_board(&config.board) {
        Ok(()) => config.board,
        Err((pin, e)) => {
            error!("Board config unusable at gpio{}: {:?}", pin, e);
            error!("Using default pin assignment");
            BoardConfig::default()
        }
    };
    info!("Configuration loaded");

    // Operator UART (UART0 on GPIO0/GPIO1, 115200 baud)
    let uart_config = UartConfig::default();

    let tx_buf = TX_BUF.init([0u8; 256]);
    let rx_buf = RX_BUF.init([0u8; 256]);

    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, uart_config);
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let (tx, rx) = uart.split();

    info!("UART initialized for operator link");

    // Motor PWM (slice 0 channel A on GPIO16)
    let (timing, pwm_config) = match carrier_config(config.motor.pwm_frequency_hz) {
        Ok(c) => c,
        Err(e) => {
            warn!(
                "PWM frequency {}Hz unusable: {:?}",
                config.motor.pwm_frequency_hz, e
            );
            unwrap!(carrier_config(MotorConfig::default().pwm_frequency_hz))
        }
    };
    let pwm = Pwm::new_output_a(p.PWM_SLICE0, p.PIN_16, pwm_config.clone());
    let pwm = PwmChannelA::new(pwm, pwm_config);
    info!(
        "PWM initialized: top={}, divider={}+{}/16",
        timing.top,
        timing.divider_int(),
        timing.divider_frac()
    );

    // Config-driven pins
    let mut pins = pin_bank!(p;
        2 => PIN_2, 3 => PIN_3, 4 => PIN_4, 5 => PIN_5, 6 => PIN_6, 7 => PIN_7,
        8 => PIN_8, 9 => PIN_9, 10 => PIN_10, 11 => PIN_11, 12 => PIN_12,
        13 => PIN_13, 14 => PIN_14, 15 => PIN_15, 17 => PIN_17, 18 => PIN_18,
        19 => PIN_19, 20 => PIN_20, 21 => PIN_21, 22 => PIN_22, 23 => PIN_23,
        24 => PIN_24, 25 => PIN_25, 26 => PIN_26, 27 => PIN_27, 28 => PIN_28,
        29 => PIN_29,
    );

    // Direction pins start in the stopped (forward) state
    let in1 = Output::new(
        unwrap!(pins.take(board.motor_in1.pin)),
        Level::from(board.motor_in1.level(true)),
    );
    let in2 = Output::new(
        unwrap!(pins.take(board.motor_in2.pin)),
        Level::from(board.motor_in2.level(false)),
    );
    let motor = HBridgeMotor::new(
        in1,
        in2,
        pwm,
        HBridgeConfig::from_config(&config.motor, &board),
    );

    let enc_a = Input::new(unwrap!(pins.take(board.encoder_a.pin)), pull(&board.encoder_a));
    let enc_b = Input::new(unwrap!(pins.take(board.encoder_b.pin)), pull(&board.encoder_b));

    info!(
        "Motor on gpio{}/gpio{}, encoder on gpio{}/gpio{}",
        board.motor_in1.pin, board.motor_in2.pin, board.encoder_a.pin, board.encoder_b.pin
    );

    // Spawn tasks
    spawner.spawn(tasks::serial_tx_task(tx)).unwrap();
    spawner.spawn(tasks::serial_rx_task(rx)).unwrap();
    spawner
        .spawn(tasks::encoder_task(enc_a, enc_b, board.quadrature))
        .unwrap();
    spawner
        .spawn(tasks::control_task(motor, config.control))
        .unwrap();

    info!("All tasks spawned, firmware running");

    loop {
        embassy_time::Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}

/// Input pull for an encoder pin
fn pull(pin: &PinConfig) -> Pull {
    if pin.pull_up {
        Pull::Up
    } else {
        Pull::None
    }
}

/// Initialize the heap allocator
fn init_heap() {
    use core::mem::MaybeUninit;
    static mut HEAP_MEM: [MaybeUninit<u8>; HEAP_SIZE] = [MaybeUninit::uninit(); HEAP_SIZE];
    #[allow(static_mut_refs)]
    unsafe {
        HEAP.init(HEAP_MEM.as_ptr() as usize, HEAP_SIZE)
    }
}
