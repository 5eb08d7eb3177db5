mod common;

use catalog_export::{
    Category, ImageLoader, ImageSettings, InMemoryAssetProvider, Record,
};
use common::fixtures::png_bytes;
use common::pdf_assertions::image_draw_count;
use common::{exporter_with, init_logging, DelayedProvider, GeneratedPdf, TestResult};
use std::sync::Arc;
use std::time::Duration;

const PROTEIN_DEFAULT: &str = "/images/categories/proteina.png";

fn three_records() -> Vec<Record> {
    vec![
        Record::new(1, "Whey Gold", "ON", Category::Proteina, 125_000.0).with_image("/images/missing.png"),
        Record::new(2, "Creatina", "Star", Category::Creatina, 45_000.0).with_image("/images/creatina.png?v=3"),
        Record::new(0, "Barra", "Cuerpo", Category::Barras, 3_000.0).without_id(),
    ]
}

fn provider_for_three(delay_direct: Duration, delay_fallback: Duration) -> DelayedProvider {
    DelayedProvider::new()
        .with_asset(PROTEIN_DEFAULT, png_bytes(4, 4, [200, 0, 0, 255]))
        .with_asset("/images/creatina.png", png_bytes(4, 4, [0, 200, 0, 255]))
        .with_delay("/images/creatina.png?v=3", delay_direct)
        .with_delay(PROTEIN_DEFAULT, delay_fallback)
}

#[tokio::test]
async fn test_cache_holds_fallback_and_direct_images_but_not_idless_records() -> TestResult {
    init_logging();
    let orders = [
        (Duration::from_millis(80), Duration::ZERO),
        (Duration::ZERO, Duration::from_millis(80)),
    ];
    for (delay_direct, delay_fallback) in orders {
        let provider = Arc::new(provider_for_three(delay_direct, delay_fallback));
        let loader = ImageLoader::new(provider.clone(), &ImageSettings::default());
        let cache = loader.load(&three_records()).await;

        assert_eq!(cache.len(), 2);
        assert_eq!(cache[&1].source, PROTEIN_DEFAULT);
        assert_eq!(cache[&2].source, "/images/creatina.png?v=3");
        assert!(provider.completed().len() >= 3);
    }
    Ok(())
}

#[tokio::test]
async fn test_slow_fetch_does_not_reorder_results() -> TestResult {
    init_logging();
    let provider = Arc::new(
        DelayedProvider::new()
            .with_asset("/a.png", png_bytes(2, 2, [1, 1, 1, 255]))
            .with_asset("/b.png", png_bytes(2, 2, [2, 2, 2, 255]))
            .with_delay("/a.png", Duration::from_millis(120)),
    );
    let records = vec![
        Record::new(1, "A", "M", Category::Otros, 1.0).with_image("/a.png"),
        Record::new(2, "B", "M", Category::Otros, 1.0).with_image("/b.png"),
    ];
    let loader = ImageLoader::new(provider.clone(), &ImageSettings::default());
    let cache = loader.load(&records).await;

    assert_eq!(provider.completed(), vec!["/b.png".to_string(), "/a.png".to_string()]);
    assert_eq!(cache[&1].source, "/a.png");
    assert_eq!(cache[&2].source, "/b.png");
    Ok(())
}

#[tokio::test]
async fn test_timed_out_image_falls_back_to_category_default() -> TestResult {
    init_logging();
    let provider = Arc::new(
        DelayedProvider::new()
            .with_asset("/images/slow.png", png_bytes(2, 2, [9, 9, 9, 255]))
            .with_asset(PROTEIN_DEFAULT, png_bytes(2, 2, [200, 0, 0, 255]))
            .with_delay("/images/slow.png", Duration::from_millis(400)),
    );
    let settings = ImageSettings {
        image_timeout_ms: Some(50),
        ..ImageSettings::default()
    };
    let records = vec![Record::new(1, "Whey", "ON", Category::Proteina, 1.0).with_image("/images/slow.png")];

    let cache = ImageLoader::new(provider, &settings).load(&records).await;
    assert_eq!(cache[&1].source, PROTEIN_DEFAULT);
    Ok(())
}

#[tokio::test]
async fn test_large_images_are_downscaled() -> TestResult {
    init_logging();
    let provider = InMemoryAssetProvider::new();
    provider.insert("/big.png", png_bytes(1024, 512, [10, 20, 30, 255]))?;
    let records = vec![Record::new(1, "X", "M", Category::Otros, 1.0).with_image("/big.png")];

    let cache = ImageLoader::new(Arc::new(provider), &ImageSettings::default())
        .load(&records)
        .await;
    let image = &cache[&1];
    assert!(image.width <= 256 && image.height <= 256);
    assert_eq!(image.width, 2 * image.height);
    Ok(())
}

#[tokio::test]
async fn test_export_draws_one_image_per_cached_record() -> TestResult {
    init_logging();
    let provider = Arc::new(provider_for_three(Duration::ZERO, Duration::ZERO));
    let artifact = exporter_with(provider).export(&three_records()).await?;
    let pdf = GeneratedPdf::from_artifact(&artifact)?;

    assert_eq!(artifact.rows_rendered, 3);
    assert_eq!(image_draw_count(&pdf.doc, 1), 2);
    Ok(())
}

#[tokio::test]
async fn test_missing_images_never_fail_the_export() -> TestResult {
    init_logging();
    let provider = Arc::new(InMemoryAssetProvider::new());
    provider.insert("/broken.png", b"not an image".to_vec())?;
    let records = vec![
        Record::new(1, "Roto", "M", Category::Vitaminas, 1.0).with_image("/broken.png"),
        Record::new(2, "Perdido", "M", Category::Energia, 1.0),
    ];

    let artifact = exporter_with(provider).export(&records).await?;
    let pdf = GeneratedPdf::from_artifact(&artifact)?;
    assert_eq!(image_draw_count(&pdf.doc, 1), 0);
    assert_pdf_contains_text!(pdf, "Roto");
    Ok(())
}
