pub mod payment;
pub mod rent;

pub use payment::{PaymentOutcome, PaymentStage};
pub use rent::{RentOutcome, RentStage};

#[cfg(test)]
pub(crate) mod testing;
