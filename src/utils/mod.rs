//! Utility helpers: math extensions over `glam` and logging timers.

pub mod logging;
pub mod math;

pub use logging::{warn_if_tick_budget_exceeded, ScopedTimer};
pub use math::{sign_or_zero, Vec2Ext};
