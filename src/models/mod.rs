pub mod domain;
pub mod fields;
pub mod lucky_number;
pub mod record;
