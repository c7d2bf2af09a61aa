pub mod banner;
pub mod carousel;
pub mod config;
pub mod error;
pub mod events;
pub mod tasks {
    pub mod carousel;
}
