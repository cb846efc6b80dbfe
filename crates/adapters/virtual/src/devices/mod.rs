mod disconnected;
mod simulated;

pub use disconnected::DisconnectedDht;
pub use simulated::SimulatedDht;
