mod client;
mod error;
mod media;
pub mod models;
mod page;

pub use client::{AnilistClient, DEFAULT_ENDPOINT};
pub use error::AnilistError;
pub use models::{
    CharacterEdge, CoverImage, FuzzyDate, Media, MediaDetail, MediaFormat, MediaSort, MediaTitle,
    MediaTrailer, MediaType, Name, PageQuery, StaffEdge,
};

pub type Result<T> = std::result::Result<T, AnilistError>;
