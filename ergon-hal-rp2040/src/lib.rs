//! RP2040-specific HAL for the torque controller firmware
//!
//! This crate provides RP2040-specific implementations:
//! - GPIO numbering, pin strings and reserved pins
//! - Dynamic pin allocation for config-driven setup
//! - PWM slice output for the H-bridge driver

#![no_std]

pub mod gpio;
pub mod pins;
pub mod pwm;
