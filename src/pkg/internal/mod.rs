pub mod adaptors;
pub mod email;
pub mod listing;
pub mod markdown;
pub mod signature;
pub mod slack;
pub mod sweeper;
pub mod twitter;
