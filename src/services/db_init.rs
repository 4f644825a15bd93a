use mongodb::{
    bson::doc,
    options::IndexOptions,
    Database, IndexModel,
};

use std::time::Duration;

use crate::{error::StoreError, services::session_store::SESSIONS};

pub async fn ensure_indexes(db: &Database) -> Result<(), StoreError> {
    // categories: unique slug
    {
        let col = db.collection::<mongodb::bson::Document>("categories");
        let model = IndexModel::builder()
            .keys(doc! { "slug": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();

        col.create_index(model, None).await?;
    }

    // products: listing filters on availability + category, sorted by name
    {
        let col = db.collection::<mongodb::bson::Document>("products");
        let model = IndexModel::builder()
            .keys(doc! { "available": 1, "category_id": 1, "name": 1 })
            .build();

        col.create_index(model, None).await?;

        let model = IndexModel::builder().keys(doc! { "slug": 1 }).build();
        col.create_index(model, None).await?;
    }

    // orders: newest first
    {
        let col = db.collection::<mongodb::bson::Document>("orders");
        let model = IndexModel::builder()
            .keys(doc! { "created": -1 })
            .build();

        col.create_index(model, None).await?;
    }

    // order_items: fetched per order
    {
        let col = db.collection::<mongodb::bson::Document>("order_items");
        let model = IndexModel::builder()
            .keys(doc! { "order_id": 1 })
            .build();

        col.create_index(model, None).await?;
    }

    // sessions: dropped by Mongo once expires_at has passed
    {
        let col = db.collection::<mongodb::bson::Document>(SESSIONS);
        let model = IndexModel::builder()
            .keys(doc! { "expires_at": 1 })
            .options(
                IndexOptions::builder()
                    .expire_after(Duration::from_secs(0))
                    .build(),
            )
            .build();

        col.create_index(model, None).await?;
    }

    Ok(())
}
