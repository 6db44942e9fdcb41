use super::Permissions;
use catalog_core::{
    models::{ProductData, Reviewer},
    ports::Application,
};
use catalog_sqlite::{
    Db,
    types::{DateTime, ProductId, ReviewId, UserId},
};
use headers::{Authorization, authorization::Bearer};

#[derive(Clone)]
pub struct TestApp(pub Db);

impl TestApp {
    fn permissions(&self, context: &Authorization<Bearer>) -> Option<Permissions> {
        context.0.token().parse().ok()
    }
}

impl Application for TestApp {
    // We will stuff plain-text declarations of the permissions in the token
    type Context = Authorization<Bearer>;
    type Repository = Db;

    fn database(&self) -> &Self::Repository {
        &self.0
    }

    fn now(&self) -> DateTime {
        time::OffsetDateTime::now_utc().into()
    }

    fn generate_product_id(&self, _data: &ProductData) -> ProductId {
        uuid::Uuid::new_v4().into()
    }

    fn generate_review_id(&self) -> ReviewId {
        uuid::Uuid::new_v4().into()
    }

    async fn reviewer(&self, context: &Self::Context) -> Option<Reviewer<UserId>> {
        self.permissions(context).and_then(|p| {
            p.user_id.map(|id| Reviewer { id, name: p.name })
        })
    }

    async fn can_manage_products(&self, context: &Self::Context) -> Option<UserId> {
        self.permissions(context)
            .and_then(|p| if p.admin { p.user_id } else { None })
    }
}
