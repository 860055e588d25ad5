pub mod phone;

pub use phone::{clean_phone, format_phone_display};
