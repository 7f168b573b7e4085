pub mod reservations;
