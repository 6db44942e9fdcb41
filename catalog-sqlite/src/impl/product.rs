use crate::{
    Db,
    types::{PRODUCT_COLUMNS, ProductRow},
};
use catalog_core::{
    models::{ProductData, ProductQuery, ReviewSummary},
    ports::{ProductRecordOf, ProductRepository},
};

impl ProductRepository for Db {
    async fn create_product(
        &self,
        product_id: Self::ProductId,
        created_by: Self::UserId,
        data: ProductData,
        as_of: Self::DateTime,
    ) -> Result<ProductRecordOf<Self>, Self::Error> {
        let ProductData {
            name,
            description,
            price,
            category,
            stock,
            images,
        } = data;
        let images = sqlx::types::Json(images);
        let search_name = name.to_lowercase();

        let row = sqlx::query_as::<_, ProductRow>(&format!(
            r#"
            insert into
                product (id, created_by, created_at, updated_at, name, search_name, description, price, category, stock, images)
            values
                ($1, $2, $3, $3, $4, $10, $5, $6, $7, $8, jsonb($9))
            returning
                {PRODUCT_COLUMNS}
            "#
        ))
        .bind(product_id)
        .bind(created_by)
        .bind(as_of)
        .bind(name)
        .bind(description)
        .bind(price)
        .bind(category)
        .bind(stock)
        .bind(images)
        .bind(search_name)
        .fetch_one(&self.writer)
        .await?;

        Ok(row.into())
    }

    async fn get_product(
        &self,
        product_id: Self::ProductId,
    ) -> Result<Option<ProductRecordOf<Self>>, Self::Error> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            r#"
            select
                {PRODUCT_COLUMNS}
            from
                product
            where
                id = $1
            "#
        ))
        .bind(product_id)
        .fetch_optional(&self.reader)
        .await?;

        Ok(row.map(Into::into))
    }

    async fn update_product(
        &self,
        product_id: Self::ProductId,
        data: ProductData,
        as_of: Self::DateTime,
    ) -> Result<Option<ProductRecordOf<Self>>, Self::Error> {
        let ProductData {
            name,
            description,
            price,
            category,
            stock,
            images,
        } = data;
        let images = sqlx::types::Json(images);
        let search_name = name.to_lowercase();

        let row = sqlx::query_as::<_, ProductRow>(&format!(
            r#"
            update
                product
            set
                updated_at = $2,
                name = $3,
                description = $4,
                price = $5,
                category = $6,
                stock = $7,
                images = jsonb($8),
                search_name = $9
            where
                id = $1
            returning
                {PRODUCT_COLUMNS}
            "#
        ))
        .bind(product_id)
        .bind(as_of)
        .bind(name)
        .bind(description)
        .bind(price)
        .bind(category)
        .bind(stock)
        .bind(images)
        .bind(search_name)
        .fetch_optional(&self.writer)
        .await?;

        Ok(row.map(Into::into))
    }

    async fn delete_product(
        &self,
        product_id: Self::ProductId,
    ) -> Result<Option<ProductRecordOf<Self>>, Self::Error> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            r#"
            delete from
                product
            where
                id = $1
            returning
                {PRODUCT_COLUMNS}
            "#
        ))
        .bind(product_id)
        .fetch_optional(&self.writer)
        .await?;

        Ok(row.map(Into::into))
    }

    async fn count_products(&self) -> Result<u64, Self::Error> {
        let count = sqlx::query_scalar::<_, i64>("select count(*) from product")
            .fetch_one(&self.reader)
            .await?;

        Ok(count as u64)
    }

    async fn query_products(
        &self,
        query: &ProductQuery,
        limit: usize,
    ) -> Result<Vec<ProductRecordOf<Self>>, Self::Error> {
        let mut builder = sqlx::QueryBuilder::<sqlx::Sqlite>::new(format!(
            "select {PRODUCT_COLUMNS} from product where 1 = 1"
        ));

        if let Some(keyword) = query.keyword.as_deref().filter(|k| !k.is_empty()) {
            // the keyword is matched literally
            builder
                .push(" and search_name like ")
                .push_bind(format!("%{}%", escape_like(&keyword.to_lowercase())))
                .push(r" escape '\'");
        }
        if let Some(category) = &query.category {
            builder.push(" and category = ").push_bind(category.clone());
        }
        if let Some(price) = query.price_gte {
            builder.push(" and price >= ").push_bind(price);
        }
        if let Some(price) = query.price_lte {
            builder.push(" and price <= ").push_bind(price);
        }
        if let Some(ratings) = query.ratings_gte {
            builder.push(" and ratings >= ").push_bind(ratings);
        }

        builder
            .push(" order by rowid limit ")
            .push_bind(i64::try_from(limit).unwrap_or(i64::MAX))
            .push(" offset ")
            .push_bind(i64::try_from(query.offset(limit)).unwrap_or(i64::MAX));

        let rows = builder
            .build_query_as::<ProductRow>()
            .fetch_all(&self.reader)
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn replace_reviews(
        &self,
        product_id: Self::ProductId,
        summary: ReviewSummary<Self::UserId, Self::ReviewId>,
        as_of: Self::DateTime,
    ) -> Result<Option<ProductRecordOf<Self>>, Self::Error> {
        let ratings = summary.ratings();
        let num_of_reviews = summary.num_of_reviews();
        // json has no encoding for these, and the row could not be read back
        if !ratings.is_finite() || summary.reviews().iter().any(|r| !r.rating.is_finite()) {
            return Err(sqlx::Error::Encode("ratings must be finite".into()));
        }
        let reviews = sqlx::types::Json(summary.into_reviews());

        let row = sqlx::query_as::<_, ProductRow>(&format!(
            r#"
            update
                product
            set
                updated_at = $2,
                reviews = jsonb($3),
                ratings = $4,
                num_of_reviews = $5
            where
                id = $1
            returning
                {PRODUCT_COLUMNS}
            "#
        ))
        .bind(product_id)
        .bind(as_of)
        .bind(reviews)
        .bind(ratings)
        .bind(num_of_reviews)
        .fetch_optional(&self.writer)
        .await?;

        Ok(row.map(Into::into))
    }
}

fn escape_like(keyword: &str) -> String {
    let mut escaped = String::with_capacity(keyword.len());
    for c in keyword.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
