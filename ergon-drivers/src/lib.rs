//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in ergon-core:
//!
//! - Motor drivers (H-bridge with PWM magnitude)
//! - Encoder decoding (software quadrature, shared atomic count)

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod encoder;
pub mod motor;
