// src/logging.rs
//! Crate-wide logging macro. Every event goes through `tracing` under the
//! `jobboard` target so a subscriber can filter the client separately from
//! its dependencies (`RUST_LOG=jobboard=debug`).

#[macro_export]
macro_rules! app_log {
    ($level:ident, $($arg:tt)+) => {
        ::tracing::$level!(target: "jobboard", $($arg)+)
    };
}
