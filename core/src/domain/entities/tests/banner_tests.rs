//! Unit tests for the banner entity

use crate::domain::entities::banner::{Banner, ImageType, ImageUpload};
use crate::domain::entities::collection::Collection;

fn summer_collection() -> Collection {
    Collection {
        id: "gid://shopify/Collection/1".into(),
        title: "Summer".into(),
        handle: "summer".into(),
        description: String::new(),
        image: None,
        product_count: 12,
    }
}

#[test]
fn test_image_type_from_mime() {
    assert_eq!(ImageType::from_mime("image/png"), Some(ImageType::Png));
    assert_eq!(ImageType::from_mime("IMAGE/JPEG"), Some(ImageType::Jpeg));
    assert_eq!(ImageType::from_mime("image/webp; q=1"), Some(ImageType::Webp));
    assert_eq!(ImageType::from_mime("image/svg+xml"), None);
    assert_eq!(ImageType::from_mime("application/pdf"), None);
}

#[test]
fn test_image_type_from_file_name() {
    assert_eq!(ImageType::from_file_name("summer.PNG"), Some(ImageType::Png));
    assert_eq!(ImageType::from_file_name("hero.final.jpg"), Some(ImageType::Jpg));
    assert_eq!(ImageType::from_file_name("report.pdf"), None);
    assert_eq!(ImageType::from_file_name("no-extension"), None);
}

#[test]
fn test_upload_prefers_extension_over_content_type() {
    let upload = ImageUpload::new(b"x")
        .with_file_name(Some("banner.webp"))
        .with_content_type(Some("application/octet-stream"));
    assert_eq!(upload.image_type(), Some(ImageType::Webp));

    let disguised = ImageUpload::new(b"x")
        .with_file_name(Some("banner.exe"))
        .with_content_type(Some("image/png"));
    assert_eq!(disguised.image_type(), None);

    let unnamed = ImageUpload::new(b"x")
        .with_file_name(Some("blob"))
        .with_content_type(Some("image/gif"));
    assert_eq!(unnamed.image_type(), Some(ImageType::Gif));
}

#[test]
fn test_new_banner_encodes_image() {
    let collection = summer_collection();
    let banner = Banner::new(b"abc", ImageType::Png, &collection.id, Some(&collection));

    assert_eq!(banner.image_data, "YWJj");
    assert_eq!(banner.image_url(), "data:image/png;base64,YWJj");
    assert_eq!(banner.collection_title, "Summer");
    assert_eq!(banner.collection_handle.as_deref(), Some("summer"));
    assert_eq!(banner.created_at, banner.updated_at);
}

#[test]
fn test_unknown_collection_uses_id_as_title() {
    let banner = Banner::new(b"abc", ImageType::Gif, "gid://shopify/Collection/9", None);

    assert_eq!(banner.collection_title, "gid://shopify/Collection/9");
    assert!(banner.collection_handle.is_none());
}

#[test]
fn test_replace_keeps_identity_and_creation_time() {
    let collection = summer_collection();
    let mut banner = Banner::new(b"old", ImageType::Png, "other", None);
    let (id, created_at) = (banner.id, banner.created_at);

    banner.replace(b"new", ImageType::Jpg, &collection);

    assert_eq!(banner.id, id);
    assert_eq!(banner.created_at, created_at);
    assert!(banner.updated_at >= created_at);
    assert_eq!(banner.collection_id, collection.id);
    assert_eq!(banner.image_url(), "data:image/jpg;base64,bmV3");
}
