pub mod company;
pub mod department;
pub mod employee;

// Re-export commonly used types
pub use company::*;
pub use department::*;
pub use employee::*;
