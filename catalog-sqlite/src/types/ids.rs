//! Identifiers of users, products and reviews.
//!
//! Every id is a uuid. Users and products are also columns of the `product`
//! table, where they are stored as hyphenated text so that rows stay readable
//! from the sqlite shell. Review ids only ever appear inside the `reviews`
//! document and so are never bound or decoded by sqlx.

macro_rules! catalog_id {
    ($(#[$attr:meta])* $name:ident) => {
        $(#[$attr])*
        #[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub uuid::Uuid);

        impl From<uuid::Uuid> for $name {
            fn from(value: uuid::Uuid) -> Self {
                Self(value)
            }
        }

        impl From<$name> for uuid::Uuid {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                std::fmt::Display::fmt(&self.0.hyphenated(), f)
            }
        }

        impl std::str::FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                uuid::Uuid::try_parse(s).map(Self)
            }
        }
    };
}

/// Bind and decode an id as a text column.
macro_rules! text_column {
    ($name:ident) => {
        impl sqlx::Type<sqlx::Sqlite> for $name {
            fn type_info() -> sqlx::sqlite::SqliteTypeInfo {
                <uuid::fmt::Hyphenated as sqlx::Type<sqlx::Sqlite>>::type_info()
            }

            fn compatible(ty: &sqlx::sqlite::SqliteTypeInfo) -> bool {
                <uuid::fmt::Hyphenated as sqlx::Type<sqlx::Sqlite>>::compatible(ty)
            }
        }

        impl<'q> sqlx::Encode<'q, sqlx::Sqlite> for $name {
            fn encode_by_ref(
                &self,
                args: &mut Vec<sqlx::sqlite::SqliteArgumentValue<'q>>,
            ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
                sqlx::Encode::<'q, sqlx::Sqlite>::encode_by_ref(&self.0.hyphenated(), args)
            }
        }

        impl<'r> sqlx::Decode<'r, sqlx::Sqlite> for $name {
            fn decode(
                value: sqlx::sqlite::SqliteValueRef<'r>,
            ) -> Result<Self, sqlx::error::BoxDynError> {
                let id = <uuid::fmt::Hyphenated as sqlx::Decode<'r, sqlx::Sqlite>>::decode(value)?;
                Ok(Self(id.into_uuid()))
            }
        }
    };
}

catalog_id!(
    /// A user of the catalog, whether administrator or reviewer
    UserId
);
text_column!(UserId);

catalog_id!(
    /// A product in the catalog
    ProductId
);
text_column!(ProductId);

catalog_id!(
    /// One review of a product, unique across all products
    ReviewId
);
