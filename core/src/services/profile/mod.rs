//! Persistence of the verified phone into the user's profile

mod sync;


pub use sync::ProfileSync;
