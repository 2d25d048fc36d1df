//! Embassy async tasks
//!
//! The radio and IP stack each need a runner task; everything the station
//! does lives in one polling task.

pub mod net;
pub mod station;

pub use net::{cyw43_task, net_task};
pub use station::{station_task, Station};
