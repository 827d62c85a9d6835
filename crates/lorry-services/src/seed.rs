//! Default data for a fresh store
//!
//! Each collection is seeded only when it is empty, so restarting against an
//! existing database leaves its data untouched.

use chrono::Utc;
use lorry_auth::PasswordService;
use lorry_core::{
    models::{PaymentSetting, PaymentMethod, Settings, User, UserRole, Vehicle},
    traits::{Repositories, UserRepository, VehicleRepository},
    AppResult,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::{info, instrument};

const VEHICLE_DESCRIPTION: &str = "A Heavy-Duty Truck";

/// Counts of what a seeding run inserted
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub users: usize,
    pub vehicles: usize,
    pub settings: bool,
    pub payment_methods: usize,
}

impl SeedReport {
    pub fn is_empty(&self) -> bool {
        self.users == 0 && self.vehicles == 0 && !self.settings && self.payment_methods == 0
    }
}

fn default_users() -> [(&'static str, &'static str, UserRole); 2] {
    [
        ("nishanth", "nishanth", UserRole::Customer),
        ("admin", "admin123", UserRole::Admin),
    ]
}

fn default_fleet() -> Vec<(&'static str, Decimal, Decimal, &'static str)> {
    vec![
        (
            "TATA LPT",
            dec!(7000),
            dec!(300),
            "https://truckcdn.cardekho.com/in/tata/1815-lpt/tata-1815-lpt.jpg",
        ),
        (
            "Bharath Benz HDT T",
            dec!(25000),
            dec!(1000),
            "https://5.imimg.com/data5/IOS/Default/2023/6/320806107/EY/LC/ZV/186633041/product-jpeg.png",
        ),
        (
            "TATA 407",
            dec!(12000),
            dec!(500),
            "https://truckcdn.cardekho.com/in/tata/407-g-sfc/tata-407-g-sfc.jpg",
        ),
        (
            "Eicher Pro 3019",
            dec!(5000),
            dec!(200),
            "https://www.cmv360.com/_next/image?url=https%3A%2F%2Fd1odgbsvvxl2qd.cloudfront.net%2Fsmall_Eicher_Pro_2110_CNG_Truck_d4edb70c39.webp&w=3840&q=75.jpg",
        ),
        (
            "TATA Signa 4825",
            dec!(8000),
            dec!(350),
            "https://5.imimg.com/data5/SELLER/Default/2022/6/DW/CQ/JR/126360925/1597393298-tata-signa-tipper-truck-1-.jpg",
        ),
        (
            "Volvo FM 400 HD",
            dec!(20000),
            dec!(900),
            "https://img.linemedia.com/img/s/dump-truck-Volvo-FM-400-8x4-Bordmatic---1727369990312147022_big--24092619515981524100.jpg",
        ),
        (
            "Mahindra Tyuxo 31-202 HP",
            dec!(18000),
            dec!(800),
            "https://svmchaser.wordpress.com/wp-content/uploads/2015/06/442fc-dsc_5767.jpg",
        ),
        (
            "Eicher Pro 6000 Series",
            dec!(25000),
            dec!(1000),
            "https://5.imimg.com/data5/FM/UO/UQ/GLADMIN-33643285/6c36b18a27367c18af97cb978bf58f36-500x500-500x500.jpg",
        ),
        (
            "Asok Leyland V3718",
            dec!(25000),
            dec!(1000),
            "https://4.imimg.com/data4/AL/XM/IMOB-47670626/img_20180522_115142-jpg.jpg",
        ),
        (
            "Mahindra Blazo X46",
            dec!(15000),
            dec!(600),
            "https://truckcdn.cardekho.com/in/mahindra/blazo-x-48-10x2-haulage/mahindra-blazo-x-48-10x2-haulage.jpg",
        ),
        (
            "TATA Signa 4225.TK Tipper",
            dec!(20000),
            dec!(900),
            "https://5.imimg.com/data5/SELLER/Default/2024/2/390279483/GV/IX/LF/23382559/whatsapp-image-2024-02-19-at-6-53-20-pm-1-500x500.jpeg",
        ),
    ]
}

/// Fill every empty collection with the agency defaults
#[instrument(skip_all)]
pub async fn seed_defaults(repos: &Repositories, passwords: &PasswordService) -> AppResult<SeedReport> {
    let mut report = SeedReport::default();

    if repos.users.count().await? == 0 {
        for (username, password, role) in default_users() {
            repos
                .users
                .create(&User {
                    id: 0,
                    username: username.to_string(),
                    password_hash: passwords.hash_password(password)?,
                    role,
                    created_at: Utc::now(),
                })
                .await?;
            report.users += 1;
        }
        info!("Seeded {} users", report.users);
    }

    if repos.vehicles.count().await? == 0 {
        for (name, price_day, price_hour, image) in default_fleet() {
            repos
                .vehicles
                .create(&Vehicle {
                    id: 0,
                    name: name.to_string(),
                    image: image.to_string(),
                    description: VEHICLE_DESCRIPTION.to_string(),
                    price_day,
                    price_hour,
                    available: true,
                    created_at: Utc::now(),
                })
                .await?;
            report.vehicles += 1;
        }
        info!("Seeded {} vehicles", report.vehicles);
    }

    if repos.settings.get().await?.is_none() {
        repos.settings.upsert(&Settings::default()).await?;
        report.settings = true;
        info!("Seeded default settings");
    }

    if repos.payments.count().await? == 0 {
        for method in PaymentMethod::ALL {
            repos.payments.upsert(&PaymentSetting::default_for(method)).await?;
            report.payment_methods += 1;
        }
        info!("Seeded {} payment methods", report.payment_methods);
    }

    Ok(report)
}
