//! MySQL repository implementations

mod banner_repository_impl;

pub use banner_repository_impl::MySqlBannerRepository;
