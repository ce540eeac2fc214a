pub mod application;
pub mod http;
#[cfg(test)]
mod mocks;

pub use application::Application;
