//! Media Module
//!
//! 스토리지 자산(알파벳 이미지, 제스처 영상)의 URL 해석과 프리로드

pub mod backend;
pub mod catalog;
pub mod library;
pub mod preloader;
pub mod resolver;

pub use backend::{AssetBackend, SupabaseStorage};
pub use catalog::{AssetKey, Letter, MediaMap, VocabWord, VOCABULARY};
pub use library::MediaLibrary;
pub use preloader::{HttpMediaProbe, MediaPreloader, MediaProbe};
pub use resolver::{Clock, MediaResolver, ResolverOptions, SystemClock};
