//! Entry gate for the verification screen

mod guard;


pub use guard::{Admission, Prerequisite, SessionGuard};
