//! Alsvid device interpreters
//!
//! One reversible gate list, three interchangeable interpretations:
//!
//! - [`BoolDevice`]: strict boolean execution; reverse execution undoes
//!   forward execution bit-exactly,
//! - [`RealDevice`]: the f32 relaxation, boolean on {0, 1} and smooth on
//!   `[0, 1]`,
//! - [`DualDevice`]: the relaxation lifted over dual numbers, with a
//!   pluggable [`GateMapping`] (closed-form [`Paraboloid`] or [`Learned`]
//!   networks) so a derivative seeded on one input wire flows through to
//!   any cost read off the output wires.
//!
//! # Example
//!
//! ```rust
//! use alsvid_ir::Circuit;
//! use alsvid_sim::{BoolDevice, Direction};
//!
//! let mut circuit = Circuit::new();
//! circuit.add_bus("X", 2, false)?;
//! circuit.cnot("X0", "X1")?;
//!
//! let mut device = BoolDevice::new(&circuit);
//! device.set_uint64("X", 0b01)?;
//! device.execute(Direction::Forward);
//! assert_eq!(device.uint64("X")?, 0b11);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod device;
pub mod error;
pub mod mapping;

pub use device::{BoolDevice, Device, Direction, DualDevice, RealDevice, Signal};
pub use error::{SimError, SimResult};
pub use mapping::{GateMapping, Learned, Paraboloid};
