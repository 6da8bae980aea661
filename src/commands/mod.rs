pub mod branches;
pub mod check;
