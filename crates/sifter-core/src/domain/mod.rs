pub mod contact;
pub mod email;
pub mod name;
pub mod phone;
pub mod roles;
pub mod table;

pub use contact::{Contact, ContactKey, ErrorKey, ErrorRecord};
pub use email::{has_dotted_domain, normalize_email, validate_email};
pub use name::{ContactName, UNKNOWN_CONTACT_NAME};
pub use phone::{check_mobile, clean_phone, PhoneRejection, MIN_POTENTIAL_DIGITS, MOBILE_DIGITS};
pub use roles::{ColumnRoles, Role, RoleColumns};
pub use table::{Cell, Row, Table};
