use super::{ImageCache, ImageLoadError, ImageResolver, LoadedImage};
use crate::config::ImageSettings;
use catalog_traits::AssetProvider;
use catalog_types::Record;
use log::{debug, info, warn};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::{self, JoinSet};

/// Fetches and decodes every image an export needs before layout starts.
///
/// One task per record walks that record's fallback chain; the loader
/// returns once every task has settled. Per-record failures are logged and
/// leave the record without an image.
#[derive(Debug, Clone)]
pub struct ImageLoader {
    provider: Arc<dyn AssetProvider>,
    resolver: Arc<ImageResolver>,
    max_pixels: u32,
    timeout: Option<Duration>,
}

impl ImageLoader {
    pub fn new(provider: Arc<dyn AssetProvider>, settings: &ImageSettings) -> Self {
        Self {
            provider,
            resolver: Arc::new(ImageResolver::new(settings.clone())),
            max_pixels: settings.max_image_pixels,
            timeout: settings.timeout(),
        }
    }

    pub async fn load(&self, records: &[Record]) -> ImageCache {
        let mut tasks: JoinSet<(u32, Result<LoadedImage, ImageLoadError>)> = JoinSet::new();
        let mut scheduled = HashSet::new();

        for record in records {
            let Some(id) = record.cache_key() else {
                debug!("Record '{}' has no id; it will render without an image", record.product);
                continue;
            };
            // first record with a given id owns its cache slot
            if !scheduled.insert(id) {
                continue;
            }

            let chain = self.resolver.fallback_chain(record);
            let provider = Arc::clone(&self.provider);
            let (max_pixels, timeout) = (self.max_pixels, self.timeout);
            tasks.spawn(async move {
                let result = load_first(provider, chain, max_pixels, timeout).await;
                (id, result)
            });
        }

        let mut cache = ImageCache::with_capacity(scheduled.len());
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((id, Ok(image))) => {
                    debug!("Loaded image for record {} from {}", id, image.source);
                    cache.insert(id, Arc::new(image));
                }
                Ok((id, Err(e))) => warn!("No image for record {}: {}", id, e),
                Err(e) => warn!("Image task ended abnormally: {}", e),
            }
        }

        info!(
            "Loaded {} of {} image(s) via {}",
            cache.len(),
            scheduled.len(),
            self.provider.name()
        );
        cache
    }
}

async fn load_first(
    provider: Arc<dyn AssetProvider>,
    chain: Vec<String>,
    max_pixels: u32,
    timeout: Option<Duration>,
) -> Result<LoadedImage, ImageLoadError> {
    let mut last_error = ImageLoadError::TaskFailed("empty fallback chain".to_string());
    for locator in chain {
        match load_one(Arc::clone(&provider), locator.clone(), max_pixels, timeout).await {
            Ok(image) => return Ok(image),
            Err(e) => {
                debug!("Image attempt '{}' failed: {}", locator, e);
                last_error = e;
            }
        }
    }
    Err(last_error)
}

async fn load_one(
    provider: Arc<dyn AssetProvider>,
    locator: String,
    max_pixels: u32,
    timeout: Option<Duration>,
) -> Result<LoadedImage, ImageLoadError> {
    let work_locator = locator.clone();
    let work = task::spawn_blocking(move || {
        let bytes = provider.fetch(&work_locator)?;
        LoadedImage::decode(&bytes, &work_locator, max_pixels)
    });

    let joined = match timeout {
        Some(after) => tokio::time::timeout(after, work)
            .await
            .map_err(|_| ImageLoadError::TimedOut { locator, after })?,
        None => work.await,
    };
    joined.map_err(|e| ImageLoadError::TaskFailed(e.to_string()))?
}
