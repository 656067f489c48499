//! Shared Kernel
//!
//! Vocabulary shared by every backend crate. At the moment this is the
//! unified error type ([`error::app_error::AppError`]) and its HTTP
//! classification ([`error::kind::ErrorKind`]).

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
