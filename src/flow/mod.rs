pub mod controller;
pub mod ports;
pub mod state;
pub mod transitions;
