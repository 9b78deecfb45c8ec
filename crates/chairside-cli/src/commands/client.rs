//! Client management commands.

use clap::Subcommand;

use chairside_core::{Client, SalonDb};

#[derive(Subcommand)]
pub enum ClientAction {
    /// Create a new client
    Create {
        /// Client name
        name: String,
        /// Phone number
        phone: String,
        /// Email address
        #[arg(long)]
        email: Option<String>,
        /// Free-form notes
        #[arg(long)]
        notes: Option<String>,
    },
    /// List clients
    List,
    /// Get client details
    Get {
        /// Client ID
        id: String,
    },
    /// Update a client
    Update {
        /// Client ID
        id: String,
        /// New name
        #[arg(long)]
        name: Option<String>,
        /// New phone number
        #[arg(long)]
        phone: Option<String>,
        /// New email address
        #[arg(long)]
        email: Option<String>,
        /// New notes
        #[arg(long)]
        notes: Option<String>,
    },
}

pub fn run(action: ClientAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = SalonDb::open()?;

    match action {
        ClientAction::Create {
            name,
            phone,
            email,
            notes,
        } => {
            let mut client = Client::new(name, phone);
            client.email = email;
            client.notes = notes;

            db.create_client(&client)?;
            println!("Client created: {}", client.id);
            println!("{}", serde_json::to_string_pretty(&client)?);
        }
        ClientAction::List => {
            let clients = db.list_clients()?;
            println!("{}", serde_json::to_string_pretty(&clients)?);
        }
        ClientAction::Get { id } => match db.get_client(&id)? {
            Some(client) => println!("{}", serde_json::to_string_pretty(&client)?),
            None => println!("Client not found: {id}"),
        },
        ClientAction::Update {
            id,
            name,
            phone,
            email,
            notes,
        } => {
            let mut client = db.get_client(&id)?.ok_or(format!("Client not found: {id}"))?;

            if let Some(n) = name {
                client.name = n;
            }
            if let Some(p) = phone {
                client.phone = p;
            }
            if let Some(e) = email {
                client.email = Some(e);
            }
            if let Some(n) = notes {
                client.notes = Some(n);
            }

            db.update_client(&client)?;
            println!("Client updated:");
            println!("{}", serde_json::to_string_pretty(&client)?);
        }
    }
    Ok(())
}
