// Client side of card generation: form, lifecycle state, HTTP access, rendering
pub mod api;
pub mod form;
pub mod render;
pub mod state;

pub use api::{CardService, HttpCardService};
pub use form::{CardForm, FormErrors, CATEGORIES};
pub use state::{CardSession, CardState, Notification, Rejected};
