//! Shared application state registered with every worker

use actix_web::web;
use lorry_auth::{JwtService, PasswordService};
use lorry_core::config::BookingConfig;
use lorry_core::traits::Repositories;
use lorry_services::{AuthService, BookingService, SettingsService, VehicleService};
use std::sync::Arc;

/// Services the handlers extract as `web::Data<Arc<...>>`
#[derive(Clone)]
pub struct ApiState {
    pub jwt: Arc<JwtService>,
    pub auth: Arc<AuthService>,
    pub bookings: Arc<BookingService>,
    pub vehicles: Arc<VehicleService>,
    pub settings: Arc<SettingsService>,
}

impl ApiState {
    pub fn new(repos: &Repositories, jwt: Arc<JwtService>, booking: &BookingConfig) -> Self {
        Self {
            auth: Arc::new(AuthService::new(repos, jwt.clone(), PasswordService::new())),
            bookings: Arc::new(BookingService::new(repos, booking)),
            vehicles: Arc::new(VehicleService::new(repos)),
            settings: Arc::new(SettingsService::new(repos)),
            jwt,
        }
    }

    /// Register every service as app data
    pub fn register(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(web::Data::new(self.jwt.clone()))
            .app_data(web::Data::new(self.auth.clone()))
            .app_data(web::Data::new(self.bookings.clone()))
            .app_data(web::Data::new(self.vehicles.clone()))
            .app_data(web::Data::new(self.settings.clone()));
    }
}
