pub mod exercise;
pub mod from_row;
pub mod user;
pub mod workout;

pub use exercise::Exercise;
pub use from_row::FromSqliteRow;
pub use user::{NewUser, RegisterUser, User};
pub use workout::{UpdateWorkout, Workout};
