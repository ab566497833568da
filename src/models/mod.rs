pub mod movie;
pub mod user;
pub mod validation;

pub use movie::{Movie, MovieForm, MovieInput};
pub use user::{LoginForm, SettingsForm, User};
pub use validation::ValidationError;
