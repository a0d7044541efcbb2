mod builder;
mod error;
mod expression;
mod params;

pub use builder::{build_delete, build_get, build_put, build_query, build_update};
pub use error::RequestError;
pub use expression::{
    name_placeholder, value_placeholder, Binding, KeyCondition, ProjectionExpression,
    UpdateExpression,
};
pub use params::{
    AttributeNames, AttributeValues, DeleteParams, GetParams, PutParams, QueryParams,
    UpdateParams,
};
