//! Page objects for the vtiger UI.
//!
//! Each page binds its locators once at construction and exposes
//! intention-revealing actions built from [`CommonActions`] primitives.
//! Pages hold nothing but a handle to the shared session, so a test can
//! hop between pages of the same browser window freely.
//!
//! [`CommonActions`]: crate::actions::CommonActions

mod home;
mod lead;
mod login;

pub use home::HomePage;
pub use lead::LeadPage;
pub use login::LoginPage;
