pub mod connector;

pub use connector::connect;
