#![deny(warnings)]

pub mod bhava;
pub mod classify;
pub mod compose;
pub mod config;
pub mod crypto;
pub mod export;
pub mod pipeline;
pub mod qr;
pub mod scan;
#[cfg(feature = "server")]
pub mod server;
pub mod synth;
pub mod util;
