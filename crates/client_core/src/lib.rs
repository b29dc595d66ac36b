//! Form controller for the water harvest simulator: collects the two form
//! fields, submits them to `/simulate` and turns the outcome into a view.

pub mod controller;
pub mod error;
pub mod input;
pub mod protocol_client;
pub mod view;

pub use controller::{FormController, PendingSubmission, Submission};
pub use error::{InputError, SubmitError};
pub use input::parse_form;
pub use protocol_client::{SimulationBackend, SimulationClient};
pub use view::{render_text, ErrorView, ForecastBar, ForecastChart, SuccessView, ViewState};
