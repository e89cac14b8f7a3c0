//! Built-in content sets.
//!
//! The engine ships content-free; real card pools live outside. The
//! `basic` set here is a small pool covering every hook the engine
//! exposes — vanilla stat lines, battlecries, deathrattles, triggers,
//! auras, a secret, a weapon — used by the integration tests and by
//! anyone wanting a runnable demo without writing content first.

pub mod basic;
