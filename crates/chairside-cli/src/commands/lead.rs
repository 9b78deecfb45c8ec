//! Lead capture and conversion commands.

use clap::Subcommand;

use chairside_core::{Lead, LeadStatus, SalonDb};

#[derive(Subcommand)]
pub enum LeadAction {
    /// Capture a new lead
    Capture {
        /// Lead name
        name: String,
        /// Phone number or email
        contact: String,
        /// Message left by the lead
        #[arg(long)]
        message: Option<String>,
        /// Where the lead came from (e.g. instagram, referral)
        #[arg(long)]
        source: Option<String>,
    },
    /// List leads
    List,
    /// Move a lead through the funnel
    UpdateStatus {
        /// Lead ID
        id: String,
        /// New status: contacted or lost
        status: String,
    },
    /// Convert a lead into a client
    Convert {
        /// Lead ID
        id: String,
    },
}

fn parse_status(s: &str) -> Result<LeadStatus, Box<dyn std::error::Error>> {
    match s {
        "new" => Ok(LeadStatus::New),
        "contacted" => Ok(LeadStatus::Contacted),
        "converted" => Ok(LeadStatus::Converted),
        "lost" => Ok(LeadStatus::Lost),
        other => Err(format!("unknown lead status '{other}'").into()),
    }
}

pub fn run(action: LeadAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = SalonDb::open()?;

    match action {
        LeadAction::Capture {
            name,
            contact,
            message,
            source,
        } => {
            let mut lead = Lead::new(name, contact);
            lead.message = message;
            lead.source = source;

            db.create_lead(&lead)?;
            println!("Lead captured: {}", lead.id);
            println!("{}", serde_json::to_string_pretty(&lead)?);
        }
        LeadAction::List => {
            let leads = db.list_leads()?;
            println!("{}", serde_json::to_string_pretty(&leads)?);
        }
        LeadAction::UpdateStatus { id, status } => {
            let mut lead = db.get_lead(&id)?.ok_or(format!("Lead not found: {id}"))?;
            lead.transition_to(parse_status(&status)?)?;
            db.update_lead(&lead)?;
            println!("Lead updated:");
            println!("{}", serde_json::to_string_pretty(&lead)?);
        }
        LeadAction::Convert { id } => {
            let mut lead = db.get_lead(&id)?.ok_or(format!("Lead not found: {id}"))?;
            let client = lead.convert()?;
            db.create_client(&client)?;
            db.update_lead(&lead)?;

            println!("Lead converted to client: {}", client.id);
            println!("{}", serde_json::to_string_pretty(&client)?);
        }
    }
    Ok(())
}
