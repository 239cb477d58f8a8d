//! Chat front end: transport boundary, command routing and runtime wiring.

pub mod bootstrap;
pub mod commands;
pub mod config;
pub mod console;
pub mod controller;
pub mod messages;
pub mod transport;

pub use bootstrap::build_controller;
pub use config::{BotConfig, ConfigError};
pub use console::ConsoleTransport;
pub use controller::{run, Clock, Controller, FixedClock, SystemClock};
pub use transport::{IncomingMessage, InlineOption, MemoryTransport, Payload, Reply, Transport, TransportError};
