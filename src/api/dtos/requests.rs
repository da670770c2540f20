use serde::Deserialize;
use crate::domain::models::user::Role;

#[derive(Deserialize)]
pub struct CreateUserRequest {
    pub email: String,
    pub full_name: String,
    pub role: Role,
}

#[derive(Deserialize)]
pub struct ListUsersQuery {
    pub role: Option<Role>,
}

#[derive(Deserialize)]
pub struct CreatePropertyRequest {
    pub title: String,
    pub location: String,
    pub landlord_id: Option<String>,
    pub rent_amount: Option<i64>,
}

#[derive(Deserialize)]
pub struct ListPropertiesQuery {
    pub landlord_id: Option<String>,
}

#[derive(Deserialize)]
pub struct CreateMaterialRequest {
    pub name: String,
    pub property_id: Option<String>,
    pub quantity: Option<i64>,
}

#[derive(Deserialize)]
pub struct ListMaterialsQuery {
    pub property_id: Option<String>,
}

#[derive(Deserialize)]
pub struct CreateExpenseRequest {
    pub landlord_id: String,
    pub property_id: Option<String>,
    pub description: String,
    pub amount: i64,
}

#[derive(Deserialize)]
pub struct RequestPayoutRequest {
    pub landlord_id: String,
    pub amount: i64,
}
