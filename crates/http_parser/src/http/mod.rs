pub mod header;
pub mod method;
pub mod parser;
pub mod request;
pub mod validate;
