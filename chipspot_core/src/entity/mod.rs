// SeaORM entities for the social graph: posts, their comments, and the
// likes cast on them. Members themselves have no table; they live in the
// identity oracle and are referenced by `UserId` only.

pub mod comment;
pub mod like;
pub mod post;

#[cfg(test)]
mod tests;

pub mod prelude {
    // Re-export all entities for convenience
    pub use super::comment::{
        ActiveModel as CommentActiveModel, Column as CommentColumn, Entity as Comment,
        Model as CommentModel,
    };
    pub use super::like::{
        ActiveModel as LikeActiveModel, Column as LikeColumn, Entity as Like, Model as LikeModel,
    };
    pub use super::post::{
        ActiveModel as PostActiveModel, Column as PostColumn, Entity as Post, Model as PostModel,
    };

    // Re-export commonly used SeaORM types and traits
    pub use sea_orm::{
        sea_query::OnConflict,

        ActiveModelTrait,
        ActiveValue,

        ColumnTrait,
        ConnectionTrait,

        // Database and connection types
        Database,
        DatabaseConnection,
        DbConn,
        // Common result types
        DbErr,
        Delete,

        // Core traits
        EntityTrait,
        Insert,

        ModelTrait,
        NotSet,
        PaginatorTrait,
        QueryFilter,
        QueryOrder,
        QuerySelect,
        Related,
        RelationTrait,
        // Query builders
        Select,
        // Active model helpers
        Set,

        Unchanged,
        Update,
    };
}
