pub mod banner;

pub use banner::BannerRepository;

#[cfg(test)]
pub use banner::MockBannerRepository;
