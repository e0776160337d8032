mod configuration;
mod not_found;
mod remotes;

pub use configuration::Configuration;
pub use not_found::NotFound;
pub use remotes::Remotes;
