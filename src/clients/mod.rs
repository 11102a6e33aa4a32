pub mod apiap;
pub mod hebe;
