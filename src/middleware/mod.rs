mod admin;

pub use admin::AdminLayer;
