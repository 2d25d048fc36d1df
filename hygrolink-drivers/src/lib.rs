//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in hygrolink-core for the station's peripherals:
//!
//! - Climate sensors (DHT22 / AM2302)

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod sensor;
