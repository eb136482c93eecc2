//! Form types, their field whitelists and coercions.
//!
//! Requests arrive as loose text fields. Each form kind turns them into a
//! typed record carrying exactly the columns that get persisted.

mod error;
mod fields;
mod kind;
mod types;

pub use error::FormError;
pub use fields::{FieldValue, FormFields, consent_given};
pub use kind::{
    COMPANY_FILE_GROUPS, CONTACT_FILE_GROUPS, EmailCopy, FormKind, INDIVIDUAL_FILE_GROUPS,
    UploadLocation,
};
pub use types::{
    ApplicationChannel, CompanyRegistration, ContactRequest, Form, IndividualApplication,
    Recipient,
};
