use async_trait::async_trait;
use diesel::result;

/// Common CRUD surface shared by the repositories. `get_all` and `get_by_id`
/// report an empty result as `None` rather than an error.
#[async_trait]
pub trait Repository {
    type Id;
    type Item;
    type NewItem<'a>: Send;
    type UpdateForm<'a>: Send;

    async fn get_all(&self) -> Result<Option<Vec<Self::Item>>, result::Error>;

    async fn get_by_id(&self, id: Self::Id) -> Result<Option<Self::Item>, result::Error>;

    async fn add<'a>(&self, item: Self::NewItem<'a>) -> Result<(), result::Error>;

    async fn update<'a>(
        &self,
        id: Self::Id,
        item: Self::UpdateForm<'a>,
    ) -> Result<(), result::Error>;

    async fn delete(&self, id: Self::Id) -> Result<(), result::Error>;
}
