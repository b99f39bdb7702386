mod common;

use bagshop::entities::order::Status;
use bagshop::store;
use bagshop::store::orders::PatchOrder;

use common::{order_payload, seed_category, seed_product, setup_db};

#[tokio::test]
async fn profit_counts_only_sold_orders() {
    let db = setup_db().await;
    let category = seed_category(&db, "Totes").await;
    let product = seed_product(&db, "Tote A", category.id, 3000.0, 1800.0, 10).await;

    // Two sold, one left in stock, one pending.
    for _ in 0..2 {
        let order = store::orders::create(&db, order_payload(product.id, None, 200.0))
            .await
            .unwrap();
        store::orders::mark_as_sold(&db, order.id, "2026-08-26".to_owned())
            .await
            .unwrap();
    }
    store::orders::create(&db, order_payload(product.id, None, 200.0))
        .await
        .unwrap();
    let parked = store::orders::create(&db, order_payload(product.id, None, 200.0))
        .await
        .unwrap();
    store::orders::update(
        &db,
        parked.id,
        PatchOrder {
            status: Some(Status::Pending),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    let stats = store::orders::get_stats(&db).await.unwrap();
    assert_eq!(stats.total_orders, 4);
    assert_eq!(stats.in_stock, 1);
    assert_eq!(stats.sold, 2);
    assert_eq!(stats.pending, 1);
    assert_eq!(stats.total_sales, 2);
    assert_eq!(stats.total_revenue, 2.0 * (3000.0 + 200.0));
    assert_eq!(stats.total_cost, 2.0 * 1800.0);
    assert_eq!(stats.profit, stats.total_revenue - stats.total_cost);
    assert_eq!(stats.avg_sale_value, 3200.0);
    assert_eq!(stats.avg_delivery_fee, 200.0);
    assert_eq!(stats.category_order_stats.get("Totes"), Some(&4));
    assert_eq!(stats.category_sales_stats.get("Totes"), Some(&2));
}

#[tokio::test]
async fn canvas_tote_scenario() {
    let db = setup_db().await;

    let before = store::orders::get_stats(&db).await.unwrap();
    assert_eq!(before.total_revenue, 0.0);
    assert_eq!(before.profit, 0.0);

    let category = seed_category(&db, "Totes").await;
    assert!(category.is_active);

    let product = seed_product(&db, "Canvas Tote", category.id, 3000.0, 1800.0, 2).await;
    let order = store::orders::create(&db, order_payload(product.id, None, 200.0))
        .await
        .unwrap();

    let sold = store::orders::mark_as_sold(&db, order.id, "2026-08-26".to_owned())
        .await
        .unwrap();
    assert_eq!(sold.status, Status::Sold);

    let product = store::catalog::get_by_slug(&db, "canvas-tote").await.unwrap();
    assert_eq!(product.stock_quantity, 1);

    let after = store::orders::get_stats(&db).await.unwrap();
    assert_eq!(after.total_revenue - before.total_revenue, 3200.0);
    assert_eq!(after.profit - before.profit, 1400.0);
}

#[tokio::test]
async fn sales_listing_carries_product_details() {
    let db = setup_db().await;
    let category = seed_category(&db, "Totes").await;
    let product = seed_product(&db, "Canvas Tote", category.id, 3000.0, 1800.0, 2).await;

    let order = store::orders::create(&db, order_payload(product.id, None, 200.0))
        .await
        .unwrap();
    store::orders::create(&db, order_payload(product.id, None, 200.0))
        .await
        .unwrap();
    store::orders::mark_as_sold(&db, order.id, "2026-08-26".to_owned())
        .await
        .unwrap();

    let all = store::orders::list_with_products(&db).await.unwrap();
    assert_eq!(all.len(), 2);
    assert!(all.iter().all(|o| o.product.as_ref().unwrap().id == product.id));

    let sales = store::orders::get_sales_with_products(&db).await.unwrap();
    assert_eq!(sales.len(), 1);
    assert_eq!(sales[0].order.id, order.id);

    let sold = store::orders::list_by_status(&db, Status::Sold).await.unwrap();
    assert_eq!(sold.len(), 1);
    let open = store::orders::list_by_status(&db, Status::InStock).await.unwrap();
    assert_eq!(open.len(), 1);

    let category_stats = store::categories::get_stats(&db).await.unwrap();
    assert_eq!(category_stats.total_categories, 1);
    assert_eq!(category_stats.active_categories, 1);

    let customer_stats = store::customers::get_stats(&db).await.unwrap();
    assert_eq!(customer_stats.total_customers, 0);
    assert_eq!(customer_stats.total_revenue, 0.0);
}
