pub mod client;
pub(crate) mod parse;
pub(crate) mod request;
