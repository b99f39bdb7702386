mod common;

use bagshop::store;
use bagshop::store::catalog::{slugify, PatchCatalogItem};

use common::{product_payload, seed_category, seed_product, setup_db};

#[test]
fn slugify_collapses_and_trims() {
    assert_eq!(slugify("Canvas Tote"), "canvas-tote");
    assert_eq!(slugify("  Mini (Leather) Bag!  "), "mini-leather-bag");
    assert_eq!(slugify("Éco—Sac 2"), "co-sac-2");
}

#[tokio::test]
async fn same_name_gets_numeric_slug_suffixes() {
    let db = setup_db().await;
    let category = seed_category(&db, "Totes").await;

    let first = seed_product(&db, "Canvas Tote", category.id, 3000.0, 1800.0, 5).await;
    let second = seed_product(&db, "Canvas Tote", category.id, 3000.0, 1800.0, 5).await;
    let third = seed_product(&db, "Canvas Tote", category.id, 3000.0, 1800.0, 5).await;

    assert_eq!(first.slug, "canvas-tote");
    assert_eq!(second.slug, "canvas-tote-1");
    assert_eq!(third.slug, "canvas-tote-2");
}

#[tokio::test]
async fn sku_auto_allocation_starts_at_one_and_takes_max_plus_one() {
    let db = setup_db().await;
    let category = seed_category(&db, "Totes").await;

    let first = seed_product(&db, "Tote A", category.id, 3000.0, 1800.0, 5).await;
    assert_eq!(first.sku, "MCB-001");

    let mut manual = product_payload("Tote B", category.id, 3000.0, 1800.0, 5);
    manual.sku = Some("MCB-041".to_owned());
    let manual = store::catalog::create(&db, manual).await.unwrap();
    assert_eq!(manual.sku, "MCB-041");

    // Auto-allocation continues from the highest existing number.
    let next = seed_product(&db, "Tote C", category.id, 3000.0, 1800.0, 5).await;
    assert_eq!(next.sku, "MCB-042");
}

#[tokio::test]
async fn duplicate_sku_is_a_conflict() {
    let db = setup_db().await;
    let category = seed_category(&db, "Totes").await;
    seed_product(&db, "Tote A", category.id, 3000.0, 1800.0, 5).await;

    let mut duplicate = product_payload("Tote B", category.id, 3000.0, 1800.0, 5);
    duplicate.sku = Some("MCB-001".to_owned());

    let err = store::catalog::create(&db, duplicate).await.unwrap_err();
    assert_eq!(err.kind(), "conflict");
}

#[tokio::test]
async fn malformed_sku_on_update_is_rejected() {
    let db = setup_db().await;
    let category = seed_category(&db, "Totes").await;
    let product = seed_product(&db, "Tote A", category.id, 3000.0, 1800.0, 5).await;

    let patch = PatchCatalogItem {
        sku: Some("SKU-1".to_owned()),
        ..Default::default()
    };
    let err = store::catalog::update(&db, product.id, patch).await.unwrap_err();
    assert_eq!(err.kind(), "validation");

    let patch = PatchCatalogItem {
        sku: Some("MCB-123".to_owned()),
        ..Default::default()
    };
    let updated = store::catalog::update(&db, product.id, patch).await.unwrap();
    assert_eq!(updated.sku, "MCB-123");
}

#[tokio::test]
async fn explicit_slug_change_must_be_unique() {
    let db = setup_db().await;
    let category = seed_category(&db, "Totes").await;
    let first = seed_product(&db, "Tote A", category.id, 3000.0, 1800.0, 5).await;
    let second = seed_product(&db, "Tote B", category.id, 3000.0, 1800.0, 5).await;

    let patch = PatchCatalogItem {
        slug: Some(first.slug.clone()),
        ..Default::default()
    };
    let err = store::catalog::update(&db, second.id, patch).await.unwrap_err();
    assert_eq!(err.kind(), "conflict");
}

#[tokio::test]
async fn storefront_queries_only_see_active_products() {
    let db = setup_db().await;
    let category = seed_category(&db, "Totes").await;
    let visible = seed_product(&db, "Tote A", category.id, 3000.0, 1800.0, 5).await;
    let hidden = seed_product(&db, "Tote B", category.id, 3000.0, 1800.0, 5).await;

    let patch = PatchCatalogItem {
        is_active: Some(false),
        ..Default::default()
    };
    store::catalog::update(&db, hidden.id, patch).await.unwrap();

    let active = store::catalog::list_active(&db).await.unwrap();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].id, visible.id);

    let by_category = store::catalog::list_by_category(&db, category.id).await.unwrap();
    assert_eq!(by_category.len(), 1);

    let err = store::catalog::get_by_slug(&db, &hidden.slug).await.unwrap_err();
    assert_eq!(err.kind(), "not_found");

    let found = store::catalog::get_by_slug(&db, &visible.slug).await.unwrap();
    assert_eq!(found.id, visible.id);
}

#[tokio::test]
async fn update_stock_is_clamped_at_zero() {
    let db = setup_db().await;
    let category = seed_category(&db, "Totes").await;
    let product = seed_product(&db, "Tote A", category.id, 3000.0, 1800.0, 3).await;

    let product = store::catalog::update_stock(&db, product.id, -5).await.unwrap();
    assert_eq!(product.stock_quantity, 0);

    let product = store::catalog::update_stock(&db, product.id, 2).await.unwrap();
    assert_eq!(product.stock_quantity, 2);

    let err = store::catalog::update_stock(&db, 9999, 1).await.unwrap_err();
    assert_eq!(err.kind(), "not_found");
}

#[tokio::test]
async fn catalog_stats_counts_and_values() {
    let db = setup_db().await;
    let category = seed_category(&db, "Totes").await;

    // stock 2 at cost 1800, and one product out of stock
    seed_product(&db, "Tote A", category.id, 3000.0, 1800.0, 2).await;
    seed_product(&db, "Tote B", category.id, 2000.0, 1000.0, 0).await;

    let stats = store::catalog::get_stats(&db).await.unwrap();
    assert_eq!(stats.total_products, 2);
    assert_eq!(stats.active_products, 2);
    assert_eq!(stats.out_of_stock_products, 1);
    assert_eq!(stats.total_inventory_value, 2.0 * 1800.0);
    assert_eq!(stats.total_retail_value, 2.0 * 3000.0);
}
