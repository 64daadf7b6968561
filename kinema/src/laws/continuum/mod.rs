pub mod fluid;
pub mod thermal;
