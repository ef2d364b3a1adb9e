use crate::api::AppState;
use crate::domain::{Decimal, DriverId, TipAggregate};
use crate::error::AppError;
use axum::extract::{Path, State};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverTipsResponse {
    pub daily: Option<TipAggregateDto>,
    pub weekly: Option<TipAggregateDto>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TipAggregateDto {
    pub driver_id: String,
    pub aggregation_key: String,
    pub total_amount: Decimal,
    pub updated_at: DateTime<Utc>,
}

impl From<TipAggregate> for TipAggregateDto {
    fn from(aggregate: TipAggregate) -> Self {
        TipAggregateDto {
            driver_id: aggregate.driver_id.as_str().to_string(),
            aggregation_key: aggregate.aggregation_key.as_str().to_string(),
            total_amount: aggregate.total_amount,
            updated_at: aggregate.updated_at,
        }
    }
}

pub async fn get_driver_tips(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<DriverTipsResponse>, AppError> {
    let driver_id =
        DriverId::parse(&id).map_err(|_| AppError::BadRequest("Invalid driver id".into()))?;

    let tips = state.queries.get_driver_tips(&driver_id, Utc::now()).await?;

    Ok(Json(DriverTipsResponse {
        daily: tips.daily.map(Into::into),
        weekly: tips.weekly.map(Into::into),
    }))
}
