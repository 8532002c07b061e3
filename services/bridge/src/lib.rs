pub mod command;
pub mod stepper;
pub mod transport;
