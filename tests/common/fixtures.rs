use catalog_export::{Category, Record};
use image::{ImageFormat, Rgba, RgbaImage};
use std::io::Cursor;

/// A plain record with no image, flavors or description.
pub fn record(id: u32, product: &str, category: Category, price: f64) -> Record {
    Record::new(id, product, "Marca", category, price)
}

/// `n` protein records named `Producto 1..=n`.
pub fn catalog(n: usize) -> Vec<Record> {
    (1..=n)
        .map(|i| record(i as u32, &format!("Producto {}", i), Category::Proteina, 10_000.0 * i as f64))
        .collect()
}

/// Records across several categories, deliberately out of category order.
pub fn mixed_catalog() -> Vec<Record> {
    vec![
        Record::new(1, "Multivitamínico", "Centrum", Category::Vitaminas, 32_000.0),
        Record::new(2, "Whey Gold", "ON", Category::Proteina, 125_000.0)
            .with_flavors(["Chocolate", "Vainilla", "Frutilla"])
            .with_description("Proteína de suero aislada"),
        Record::new(3, "Sales", "Hydra", Category::Unrecognized("hidratacion".into()), 9_000.0),
        Record::new(4, "Creatina Micronizada", "Star", Category::Creatina, 45_500.0),
        Record::new(5, "Iso Whey", "ENA", Category::Proteina, 98_000.0).with_flavors(["Cookies"]),
    ]
}

/// Encodes a solid-color PNG.
pub fn png_bytes(width: u32, height: u32, color: [u8; 4]) -> Vec<u8> {
    let img = RgbaImage::from_pixel(width, height, Rgba(color));
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, ImageFormat::Png).unwrap();
    out.into_inner()
}
