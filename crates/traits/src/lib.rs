pub mod asset;

pub use asset::{
    strip_locator_suffix, AssetError, AssetProvider, InMemoryAssetProvider, SharedAssetData,
};
