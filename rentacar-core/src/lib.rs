pub mod codec;
pub mod error;
pub mod ports;
pub mod records;

pub use error::StageError;
pub use records::{
    BookingRecord, BookingRequest, BookingStatus, NotificationRecord, PaymentRecord,
    PaymentRequest, PaymentStatus, RentalRecord,
};
