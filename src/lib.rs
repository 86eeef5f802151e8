//! Drill trainer for factoring monic quadratics `x^2 + bx + c` into
//! `(x+p)(x+q)`.
//!
//! The core (`engine`, `generator`, `session`) is UI-free; `app`, `event` and
//! `ui` make up the terminal host used by the binary.

rust_i18n::i18n!("locales", fallback = "en");

pub mod app;
pub mod config;
pub mod engine;
pub mod event;
pub mod generator;
pub mod session;
pub mod ui;
