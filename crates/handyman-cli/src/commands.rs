use chrono::Local;

use handyman_client::ApiClient;
use handyman_client::format::{format_date, format_price};
use handyman_client::session::has_session;
use handyman_types::{LoginRequest, Order, OrderQuery, Service, ServiceQuery, User};

use crate::cli::Command;

/// Runs one command and returns what should be printed.
pub async fn run(client: &ApiClient, command: Command) -> anyhow::Result<String> {
    let output = match command {
        Command::Login { identifier, password } => {
            let login = client
                .users()
                .login(&LoginRequest { identifier, password })
                .await?;
            format!("Logged in as {}", describe_user(&login.user))
        }
        Command::Logout => {
            client.users().logout().await;
            "Logged out".to_string()
        }
        Command::Profile => {
            let user = client.users().get_user_info().await?;
            // The cached user only travels with a token.
            if has_session(client.storage()) {
                client.user_info().update_local_user_info(&user);
            }
            describe_user(&user)
        }
        Command::Whoami => match client.user_info().get_system_user_info() {
            Some(user) => describe_user(&user),
            None => "Not logged in".to_string(),
        },
        Command::Categories => {
            let categories = client.services().get_categories().await?;
            lines(&categories, |c| format!("{:>3}  {}", c.id, c.name))
        }
        Command::Services { category, page } => {
            let query = ServiceQuery {
                category_id: category,
                page,
                ..Default::default()
            };
            let result = client.services().get_services(&query).await?;
            format!(
                "{}\npage {}, {} total",
                lines(&result.services, describe_service),
                result.page,
                result.total
            )
        }
        Command::Orders { status, page } => {
            let query = OrderQuery {
                status,
                page,
                ..Default::default()
            };
            let result = client.orders().get_orders(&query).await?;
            format!(
                "{}\npage {}, {} total",
                lines(&result.orders, describe_order),
                result.page,
                result.total
            )
        }
        Command::SetStatus { id, status } => {
            let change = client.orders().update_order_status(id, status).await?;
            format!("Order #{} is now {}", change.order_id, change.status)
        }
    };
    Ok(output)
}

fn lines<T>(items: &[T], describe: impl Fn(&T) -> String) -> String {
    if items.is_empty() {
        return "(none)".to_string();
    }
    items.iter().map(describe).collect::<Vec<_>>().join("\n")
}

fn describe_user(user: &User) -> String {
    let name = user.real_name.as_deref().unwrap_or(&user.username);
    format!(
        "#{} {} ({}) {} balance {}",
        user.user_id,
        name,
        user.user_type.as_str(),
        user.phone,
        format_price(user.balance)
    )
}

fn describe_service(service: &Service) -> String {
    format!(
        "{:>3}  {:<28} {:>10}  category {}",
        service.service_id,
        service.service_name,
        format_price(service.base_price),
        service.category_id
    )
}

fn describe_order(order: &Order) -> String {
    format!(
        "#{:<4} {:<12} {:<26} {}  {}",
        order.order_id,
        order.status.as_str(),
        order.service_name,
        format_date(&order.appointment_time.with_timezone(&Local)),
        format_price(order.total_amount)
    )
}
