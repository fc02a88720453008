//! API resources shaping records into response bodies.

pub mod employee;

pub use employee::EmployeeView;

#[cfg(test)]
mod tests;
