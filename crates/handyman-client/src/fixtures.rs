//! Deterministic sample data for mock mode.
//!
//! The same seed and anchor always produce identical fixtures, so screens and
//! tests built on mock data stay stable between runs.

use chrono::{DateTime, Duration, Utc};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use handyman_types::{Category, Order, OrderStatus, Service, User, UserType};

pub const SERVICE_COUNT: usize = 30;
pub const ORDER_COUNT: usize = 20;

/// Customer that owns every generated order and answers mock logins.
pub const DEMO_USER_ID: i64 = 1;

const CATEGORIES: [(&str, &str); 8] = [
    ("Cleaning", "/static/icons/clean.svg"),
    ("Moving", "/static/icons/move.svg"),
    ("Repair & install", "/static/icons/repair.svg"),
    ("Nanny & maternity care", "/static/icons/nanny.svg"),
    ("Drain unclogging", "/static/icons/plumber.svg"),
    ("Appliance cleaning", "/static/icons/appliance.svg"),
    ("Furniture care", "/static/icons/furniture.svg"),
    ("All services", "/static/icons/all.svg"),
];

const SERVICE_NAMES: [&str; 5] = [
    "Home cleaning",
    "Deep cleaning",
    "Air conditioner cleaning",
    "Range hood cleaning",
    "Floor waxing",
];

const DESCRIPTIONS: [&str; 3] = [
    "Professional home cleaning for a tidy, comfortable living space",
    "Deep cleaning that removes built-up grime throughout the home",
    "Professional air conditioner cleaning for better cooling",
];

/// Number of technicians orders are spread across.
const WORKER_COUNT: i64 = 10;

/// Appointments fall within this many days after the anchor.
const APPOINTMENT_WINDOW_DAYS: i64 = 7;

#[derive(Debug, Clone, PartialEq)]
pub struct Fixtures {
    pub categories: Vec<Category>,
    pub services: Vec<Service>,
    pub orders: Vec<Order>,
    pub demo_user: User,
}

impl Fixtures {
    /// Builds the fixture set. `anchor` stands in for "now" in every timestamp.
    pub fn generate(seed: u64, anchor: DateTime<Utc>) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        let categories = CATEGORIES
            .iter()
            .zip(1..)
            .map(|(&(name, icon), id)| Category {
                id,
                name: name.to_string(),
                icon: icon.to_string(),
            })
            .collect();

        let services = (1..=SERVICE_COUNT as i64)
            .map(|id| generate_service(&mut rng, id, anchor))
            .collect();

        let orders = (1..=ORDER_COUNT as i64)
            .map(|id| generate_order(&mut rng, id, anchor))
            .collect();

        Self {
            categories,
            services,
            orders,
            demo_user: demo_user("demo", anchor),
        }
    }

    pub fn service(&self, id: i64) -> Option<&Service> {
        self.services.iter().find(|s| s.service_id == id)
    }

    pub fn order(&self, id: i64) -> Option<&Order> {
        self.orders.iter().find(|o| o.order_id == id)
    }
}

/// The verified customer returned by mock logins and profile calls.
pub fn demo_user(username: &str, now: DateTime<Utc>) -> User {
    User {
        user_id: DEMO_USER_ID,
        username: username.to_string(),
        email: "user@example.com".into(),
        phone: "13800138000".into(),
        user_type: UserType::Customer,
        avatar_url: Some("/static/avatar.jpg".into()),
        real_name: Some("Zhang San".into()),
        is_verified: true,
        balance: 1000.0,
        status: "active".into(),
        created_at: Some(now),
        updated_at: Some(now),
    }
}

fn pick<'a>(rng: &mut ChaCha8Rng, items: &[&'a str]) -> &'a str {
    items[rng.random_range(0..items.len())]
}

fn generate_service(rng: &mut ChaCha8Rng, id: i64, anchor: DateTime<Utc>) -> Service {
    Service {
        service_id: id,
        service_name: pick(rng, &SERVICE_NAMES).to_string(),
        description: pick(rng, &DESCRIPTIONS).to_string(),
        base_price: f64::from(rng.random_range(50..550u32)),
        category_id: rng.random_range(1..=CATEGORIES.len() as i64),
        image: Some(format!("/static/service-{}.jpg", (id - 1) % 3 + 1)),
        duration: rng.random_range(1..=4),
        status: "active".into(),
        created_at: Some(anchor),
        updated_at: Some(anchor),
    }
}

fn generate_order(rng: &mut ChaCha8Rng, id: i64, anchor: DateTime<Utc>) -> Order {
    let worker = rng.random_range(1..=WORKER_COUNT);
    let window = Duration::days(APPOINTMENT_WINDOW_DAYS).num_seconds();
    let appointment_time = anchor + Duration::seconds(rng.random_range(0..window));

    Order {
        order_id: id,
        service_id: rng.random_range(1..=SERVICE_COUNT as i64),
        customer_id: DEMO_USER_ID,
        worker_id: Some(worker),
        service_name: pick(rng, &SERVICE_NAMES[..3]).to_string(),
        customer_name: format!("Customer {}", id),
        worker_name: Some(format!("Technician {}", worker)),
        contact_phone: format!("138{:08}", rng.random_range(0..100_000_000u32)),
        address: format!(
            "Building {}, Room {}, Sunshine Garden, Chaoyang, Beijing",
            rng.random_range(1..=20u32),
            rng.random_range(1..=1000u32)
        ),
        appointment_time,
        status: OrderStatus::ALL[rng.random_range(0..OrderStatus::ALL.len())],
        total_amount: f64::from(rng.random_range(50..1050u32)),
        paid_amount: f64::from(rng.random_range(50..1050u32)),
        created_at: Some(anchor),
        updated_at: Some(anchor),
    }
}
