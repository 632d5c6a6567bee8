//! Motor domain: system modules for the per-frame motor update.

pub(crate) mod input;
pub(crate) mod motor;

pub(crate) use input::read_commands;
pub(crate) use motor::tick_motors;
