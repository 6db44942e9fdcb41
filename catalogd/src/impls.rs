//! Application implementation with JWT-based identity.
//!
//! This module provides the concrete implementation of the Application trait,
//! tying the SQLite store to HS256-signed bearer tokens.

use crate::AuthConfig;
use catalog_core::{
    models::{ProductData, Reviewer},
    ports::Application,
};
use catalog_sqlite::{
    Db,
    types::{DateTime, ProductId, ReviewId, UserId},
};
use headers::{Authorization, authorization::Bearer};
use jwt_simple::{
    claims::JWTClaims,
    prelude::{Duration, HS256Key, MACLike, VerificationOptions},
};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

const PRODUCT_NAMESPACE: u64 = 0xb;
const REVIEW_NAMESPACE: u64 = 0xa;

/// The catalog server's application.
///
/// Callers are identified by the `sub` claim of a JWT signed with `key`.
/// Administrators additionally carry an `admin: true` claim.
#[derive(Clone)]
pub struct CatalogApp {
    /// Database connection for persistent storage
    pub db: Db,
    /// HMAC key for JWT token verification
    pub key: HS256Key,
    /// Additional checks applied to every token
    pub auth: AuthConfig,
}

impl CatalogApp {
    /// Extract and verify JWT claims from the authorization header.
    fn claims(&self, context: &Authorization<Bearer>) -> Option<JWTClaims<CustomJWTClaims>> {
        let options = VerificationOptions {
            allowed_issuers: self
                .auth
                .issuer
                .as_ref()
                .map(|issuer| [issuer.clone()].into_iter().collect()),
            time_tolerance: Some(Duration::from_secs(self.auth.leeway.as_secs())),
            ..Default::default()
        };
        self.key
            .verify_token::<CustomJWTClaims>(context.0.token(), Some(options))
            .ok()
    }

    /// The verified caller's id and custom claims.
    fn caller(&self, context: &Authorization<Bearer>) -> Option<(UserId, CustomJWTClaims)> {
        let claims = self.claims(context)?;
        let user_id = claims.subject?.parse().ok()?;
        Some((user_id, claims.custom))
    }
}

impl Application for CatalogApp {
    type Context = Authorization<Bearer>;
    type Repository = Db;

    fn database(&self) -> &Self::Repository {
        &self.db
    }

    fn now(&self) -> DateTime {
        time::OffsetDateTime::now_utc().into()
    }

    fn generate_product_id(&self, _data: &ProductData) -> ProductId {
        v8_id(PRODUCT_NAMESPACE, time::OffsetDateTime::now_utc()).into()
    }

    fn generate_review_id(&self) -> ReviewId {
        v8_id(REVIEW_NAMESPACE, time::OffsetDateTime::now_utc()).into()
    }

    async fn reviewer(&self, context: &Self::Context) -> Option<Reviewer<UserId>> {
        // any valid token may review, under the name it carries
        self.caller(context)
            .map(|(id, custom)| Reviewer { id, name: custom.name })
    }

    async fn can_manage_products(&self, context: &Self::Context) -> Option<UserId> {
        // managing products requires an `admin: true` custom claim
        self.caller(context)
            .and_then(|(id, custom)| custom.admin.then_some(id))
    }
}

/// A time-ordered UUIDv8 with an entity tag and 56 random bits.
///
/// The creation time in seconds is partitioned into (48, 12, 4) bits and
/// splatted around the version and variant fields.
fn v8_id(namespace: u64, now: time::OffsetDateTime) -> Uuid {
    let rng56 = rand::rng().next_u64() >> 8;

    let now = now.unix_timestamp() as u64;
    let now48 = 0xffff_ffff_ffff_0000 & now;
    let now12 = (0xfff0 & now) >> 4;
    let now04 = (0x000f & now) << 56;

    let hi = 0x0000_0000_0000_8000 | now48 | now12;
    let lo = 0x8000_0000_0000_0000 | (namespace << 60) | now04 | rng56;
    Uuid::from_u64_pair(hi, lo)
}

/// Custom claims structure for JWT tokens.
#[derive(Serialize, Deserialize, Default)]
pub struct CustomJWTClaims {
    /// The caller's display name, shown on their reviews
    #[serde(default)]
    pub name: String,
    /// Indicates whether the token holder may manage products.
    #[serde(default)]
    pub admin: bool,
}

#[cfg(test)]
mod uuid_v8_tests {
    use super::*;

    // For reference, the field layout of a UUIDv8
    // (https://www.rfc-editor.org/rfc/rfc9562.html#name-uuid-version-8):
    //
    //  0                   1                   2                   3
    //  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
    // +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
    // |                           custom_a                            |
    // +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
    // |          custom_a             |  ver  |       custom_b        |
    // +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
    // |var|                       custom_c                            |
    // +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
    // |                           custom_c                            |
    // +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
    //
    // The tag nibble shares its top two bits with `var`, so only tags in
    // 0x8..=0xb keep the RFC variant intact.

    /// Extract (version, variant2bits, tag) from a UUID
    fn extract_meta(uuid: Uuid) -> (u8, u8, u8) {
        let (hi, lo) = uuid.as_u64_pair();
        let version = ((hi >> 12) & 0xF) as u8;
        let variant = ((lo >> 62) & 0x3) as u8;
        let tag = ((lo >> 60) & 0xF) as u8;
        (version, variant, tag)
    }

    /// Recover the embedded timestamp
    fn extract_timestamp(uuid: Uuid) -> u64 {
        let (hi, lo) = uuid.as_u64_pair();
        let high48 = hi & 0xffff_ffff_ffff_0000;
        let mid12 = hi & 0x0fff;
        let low4 = (lo >> 56) & 0x0f;
        high48 | (mid12 << 4) | low4
    }

    #[test]
    fn test_structure() {
        let now = time::OffsetDateTime::from_unix_timestamp(1_640_995_200).unwrap();

        let (v, var, tag) = extract_meta(v8_id(PRODUCT_NAMESPACE, now));
        assert_eq!(v, 8, "Product: version must be 8 (v8)");
        assert_eq!(var, 0b10, "Product: variant must be RFC4122 (10)");
        assert_eq!(tag, 0xB, "Product: tag 0xB");

        let (v, var, tag) = extract_meta(v8_id(REVIEW_NAMESPACE, now));
        assert_eq!(v, 8, "Review: version 8");
        assert_eq!(var, 0b10, "Review: variant 10");
        assert_eq!(tag, 0xA, "Review: tag 0xA");
    }

    #[test]
    fn test_timestamp_roundtrip() {
        let now = time::OffsetDateTime::from_unix_timestamp(1_640_995_201).unwrap();
        let id = v8_id(PRODUCT_NAMESPACE, now);
        assert_eq!(extract_timestamp(id), 1_640_995_201);
    }

    #[test]
    fn test_ids_are_distinct_and_ordered() {
        let earlier = time::OffsetDateTime::from_unix_timestamp(1_640_995_200).unwrap();
        let later = earlier + time::Duration::hours(1);

        let a = v8_id(REVIEW_NAMESPACE, earlier);
        let b = v8_id(REVIEW_NAMESPACE, earlier);
        assert_ne!(a, b, "random bits differ between calls");
        assert!(v8_id(REVIEW_NAMESPACE, later) > a, "later ids sort later");
    }
}

#[cfg(test)]
mod jwt_tests {
    use super::*;
    use jwt_simple::prelude::Claims;

    async fn create_test_app(auth: AuthConfig) -> CatalogApp {
        let db = Db::open(&catalog_sqlite::config::SqliteConfig::default())
            .await
            .unwrap();
        CatalogApp {
            db,
            key: HS256Key::from_bytes(b"secret"),
            auth,
        }
    }

    fn token(key: &HS256Key, sub: Option<&str>, custom: CustomJWTClaims) -> Authorization<Bearer> {
        let mut claims = Claims::with_custom_claims(custom, Duration::from_hours(1));
        if let Some(sub) = sub {
            claims = claims.with_subject(sub);
        }
        Authorization::bearer(&key.authenticate(claims).unwrap()).unwrap()
    }

    #[tokio::test]
    async fn test_admin_and_reviewer() {
        let app = create_test_app(AuthConfig::default()).await;
        let user_id: UserId = Uuid::new_v4().into();
        let sub = user_id.to_string();

        let admin = token(
            &app.key,
            Some(&sub),
            CustomJWTClaims {
                name: "Ada".into(),
                admin: true,
            },
        );
        assert_eq!(app.can_manage_products(&admin).await, Some(user_id));
        assert_eq!(
            app.reviewer(&admin).await,
            Some(Reviewer {
                id: user_id,
                name: "Ada".into()
            })
        );

        let shopper = token(
            &app.key,
            Some(&sub),
            CustomJWTClaims {
                name: "Bob".into(),
                admin: false,
            },
        );
        assert_eq!(app.can_manage_products(&shopper).await, None);
        assert_eq!(app.reviewer(&shopper).await.map(|r| r.name), Some("Bob".into()));
    }

    #[tokio::test]
    async fn test_rejected_tokens() {
        let app = create_test_app(AuthConfig::default()).await;
        let sub = Uuid::new_v4().to_string();

        // signed with another key
        let forged = token(
            &HS256Key::from_bytes(b"not the secret"),
            Some(&sub),
            CustomJWTClaims {
                name: "Mallory".into(),
                admin: true,
            },
        );
        assert!(app.reviewer(&forged).await.is_none());
        assert!(app.can_manage_products(&forged).await.is_none());

        // no subject, or one that is not a user id
        let anonymous = token(&app.key, None, CustomJWTClaims::default());
        assert!(app.reviewer(&anonymous).await.is_none());
        let malformed = token(&app.key, Some("bob"), CustomJWTClaims::default());
        assert!(app.reviewer(&malformed).await.is_none());
    }

    #[tokio::test]
    async fn test_issuer() {
        let app = create_test_app(AuthConfig {
            issuer: Some("https://auth.example".into()),
            ..Default::default()
        })
        .await;
        let sub = Uuid::new_v4().to_string();

        let unissued = token(&app.key, Some(&sub), CustomJWTClaims::default());
        assert!(app.reviewer(&unissued).await.is_none());

        let claims = Claims::with_custom_claims(CustomJWTClaims::default(), Duration::from_hours(1))
            .with_subject(&sub)
            .with_issuer("https://auth.example");
        let issued = Authorization::bearer(&app.key.authenticate(claims).unwrap()).unwrap();
        assert!(app.reviewer(&issued).await.is_some());
    }
}
