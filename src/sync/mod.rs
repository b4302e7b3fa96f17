pub mod clock;
pub mod controller;
pub mod driver;
pub mod presentation;
