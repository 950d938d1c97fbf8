pub mod booking;
pub mod rating;
pub mod remote;
pub mod slot;
