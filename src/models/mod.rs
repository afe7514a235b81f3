mod client;
mod client_record;
mod phone_number;

pub use client::{Client, ClientChanges};
pub use client_record::{ClientFilter, ClientRecord};
pub use phone_number::PhoneNumber;
