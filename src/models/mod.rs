mod cat;
mod geo;
mod user;

pub use cat::{Cat, NewCat, UpdateCat};
pub use geo::GeoPoint;
pub use user::{NewUser, Owner, UpdateUser, User, UserRole};
