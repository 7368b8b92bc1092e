//! Waiting indicator

mod spinner;

pub use spinner::WaitSpinner;
