//! Services catalog commands.

use clap::Subcommand;

use chairside_core::payments::to_minor_units;
use chairside_core::{Config, SalonDb, Service};

#[derive(Subcommand)]
pub enum ServiceAction {
    /// Create a new service
    Create {
        /// Service name
        name: String,
        /// Duration in minutes
        duration_min: u32,
        /// Price in display units (e.g. 65.00)
        price: f64,
        /// Currency code (defaults to the configured currency)
        #[arg(long)]
        currency: Option<String>,
        /// Require a deposit to confirm bookings
        #[arg(long)]
        deposit_required: bool,
        /// Service description
        #[arg(long)]
        description: Option<String>,
    },
    /// List services
    List {
        /// Only show bookable services
        #[arg(long)]
        active: bool,
    },
    /// Get service details
    Get {
        /// Service ID
        id: String,
    },
    /// Update a service
    Update {
        /// Service ID
        id: String,
        /// New name
        #[arg(long)]
        name: Option<String>,
        /// New duration in minutes
        #[arg(long)]
        duration_min: Option<u32>,
        /// New price in display units
        #[arg(long)]
        price: Option<f64>,
        /// Require a deposit
        #[arg(long)]
        deposit_required: Option<bool>,
        /// New description
        #[arg(long)]
        description: Option<String>,
    },
    /// Take a service off the booking menu
    Deactivate {
        /// Service ID
        id: String,
    },
}

pub fn run(action: ServiceAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = SalonDb::open()?;

    match action {
        ServiceAction::Create {
            name,
            duration_min,
            price,
            currency,
            deposit_required,
            description,
        } => {
            let config = Config::load_or_default();
            let currency = currency.unwrap_or(config.deposits.currency);
            let price_minor = to_minor_units(price, &currency);

            let mut service = Service::new(name, duration_min, price_minor, currency)?
                .with_deposit_required(deposit_required);
            if let Some(d) = description {
                service = service.with_description(d);
            }

            db.create_service(&service)?;
            println!("Service created: {}", service.id);
            println!("{}", serde_json::to_string_pretty(&service)?);
        }
        ServiceAction::List { active } => {
            let services: Vec<_> = db
                .list_services()?
                .into_iter()
                .filter(|s| !active || s.active)
                .collect();
            println!("{}", serde_json::to_string_pretty(&services)?);
        }
        ServiceAction::Get { id } => match db.get_service(&id)? {
            Some(service) => println!("{}", serde_json::to_string_pretty(&service)?),
            None => println!("Service not found: {id}"),
        },
        ServiceAction::Update {
            id,
            name,
            duration_min,
            price,
            deposit_required,
            description,
        } => {
            let mut service = db
                .get_service(&id)?
                .ok_or(format!("Service not found: {id}"))?;

            if let Some(n) = name {
                service.name = n;
            }
            if let Some(d) = duration_min {
                if d == 0 {
                    return Err("service duration must be positive".into());
                }
                service.duration_min = d;
            }
            if let Some(p) = price {
                service.price_minor = to_minor_units(p, &service.currency);
            }
            if let Some(r) = deposit_required {
                service.deposit_required = r;
            }
            if let Some(d) = description {
                service.description = Some(d);
            }

            db.update_service(&service)?;
            println!("Service updated:");
            println!("{}", serde_json::to_string_pretty(&service)?);
        }
        ServiceAction::Deactivate { id } => {
            let mut service = db
                .get_service(&id)?
                .ok_or(format!("Service not found: {id}"))?;
            service.active = false;
            db.update_service(&service)?;
            println!("Service deactivated: {id}");
        }
    }
    Ok(())
}
