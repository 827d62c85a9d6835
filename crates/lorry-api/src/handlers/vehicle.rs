//! Vehicle handlers

use crate::dto::{
    CreateVehicleRequest, MessageResponse, UpdateVehicleRequest, VehicleMessageResponse,
    VehicleResponse,
};
use actix_web::{web, HttpResponse};
use lorry_auth::AdminUser;
use lorry_core::AppError;
use lorry_services::VehicleService;
use std::sync::Arc;
use tracing::{instrument, warn};
use validator::Validate;

/// Public fleet catalogue
///
/// GET /api/vehicles
#[instrument(skip(vehicles))]
pub async fn list_vehicles(
    vehicles: web::Data<Arc<VehicleService>>,
) -> Result<HttpResponse, AppError> {
    let list = vehicles.list().await?;
    let response: Vec<VehicleResponse> = list.into_iter().map(VehicleResponse::from).collect();
    Ok(HttpResponse::Ok().json(response))
}

/// Single vehicle
///
/// GET /api/vehicles/{id}
#[instrument(skip(vehicles))]
pub async fn get_vehicle(
    vehicles: web::Data<Arc<VehicleService>>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let vehicle = vehicles.get(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(VehicleResponse::from(vehicle)))
}

/// Add a vehicle
///
/// POST /api/vehicles
#[instrument(skip(vehicles, admin, req), fields(admin = %admin.username()))]
pub async fn create_vehicle(
    vehicles: web::Data<Arc<VehicleService>>,
    admin: AdminUser,
    req: web::Json<CreateVehicleRequest>,
) -> Result<HttpResponse, AppError> {
    let req = req.into_inner();
    req.validate().map_err(|e| {
        warn!("Vehicle validation failed: {}", e);
        AppError::Validation("All fields are required".to_string())
    })?;

    let vehicle = vehicles
        .create(&admin.actor(), req.into_new_vehicle()?)
        .await?;

    Ok(HttpResponse::Created().json(VehicleMessageResponse::new(
        "Vehicle added successfully",
        vehicle,
    )))
}

/// Edit rates, description, image or availability
///
/// PUT /api/vehicles/{id}
#[instrument(skip(vehicles, admin, req), fields(admin = %admin.username()))]
pub async fn update_vehicle(
    vehicles: web::Data<Arc<VehicleService>>,
    admin: AdminUser,
    path: web::Path<i32>,
    req: web::Json<UpdateVehicleRequest>,
) -> Result<HttpResponse, AppError> {
    let vehicle = vehicles
        .update(&admin.actor(), path.into_inner(), req.into_inner().into())
        .await?;

    Ok(HttpResponse::Ok().json(VehicleMessageResponse::new(
        "Vehicle updated successfully",
        vehicle,
    )))
}

/// Remove a vehicle no booking refers to
///
/// DELETE /api/vehicles/{id}
#[instrument(skip(vehicles, admin), fields(admin = %admin.username()))]
pub async fn delete_vehicle(
    vehicles: web::Data<Arc<VehicleService>>,
    admin: AdminUser,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    vehicles.delete(&admin.actor(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new("Vehicle deleted successfully")))
}

/// Configure vehicle routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/vehicles")
            .route("", web::get().to(list_vehicles))
            .route("", web::post().to(create_vehicle))
            .route("/{id}", web::get().to(get_vehicle))
            .route("/{id}", web::put().to(update_vehicle))
            .route("/{id}", web::delete().to(delete_vehicle)),
    );
}
