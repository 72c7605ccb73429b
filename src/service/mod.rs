pub mod directory;
pub mod notify;
pub mod oauth;
pub mod revoke;
pub mod ticket;
pub mod validation;

#[cfg(test)]
pub mod mock;
