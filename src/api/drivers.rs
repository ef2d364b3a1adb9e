use crate::api::AppState;
use crate::domain::{Driver, DriverId};
use crate::error::AppError;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDriverRequest {
    pub name: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverDto {
    pub driver_id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl From<Driver> for DriverDto {
    fn from(driver: Driver) -> Self {
        DriverDto {
            driver_id: driver.driver_id.as_str().to_string(),
            name: driver.name,
            created_at: driver.created_at,
        }
    }
}

pub async fn create_driver(
    State(state): State<AppState>,
    Json(req): Json<CreateDriverRequest>,
) -> Result<(StatusCode, Json<DriverDto>), AppError> {
    let name = req.name.trim();
    if name.is_empty() {
        return Err(AppError::BadRequest("name must not be empty".into()));
    }

    let driver = Driver::create(name.to_string());
    state.drivers.insert(&driver).await?;

    Ok((StatusCode::CREATED, Json(driver.into())))
}

pub async fn get_driver(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<DriverDto>, AppError> {
    let driver_id =
        DriverId::parse(&id).map_err(|_| AppError::BadRequest("Invalid driver id".into()))?;

    let driver = state
        .drivers
        .get(&driver_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("driver {} not found", driver_id)))?;

    Ok(Json(driver.into()))
}
