//! Portfolio showcase commands.

use clap::Subcommand;

use chairside_core::{PortfolioItem, SalonDb};

#[derive(Subcommand)]
pub enum PortfolioAction {
    /// Add a portfolio item
    Add {
        /// Item title
        title: String,
        /// Path or URL of the image asset
        image_ref: String,
        /// Caption shown with the piece
        #[arg(long)]
        caption: Option<String>,
        /// Service shown in the piece
        #[arg(long)]
        service_id: Option<String>,
    },
    /// List portfolio items
    List,
    /// Remove a portfolio item
    Remove {
        /// Item ID
        id: String,
    },
}

pub fn run(action: PortfolioAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = SalonDb::open()?;

    match action {
        PortfolioAction::Add {
            title,
            image_ref,
            caption,
            service_id,
        } => {
            let mut item = PortfolioItem::new(title, image_ref);
            item.caption = caption;
            item.service_id = service_id;

            db.create_portfolio_item(&item)?;
            println!("Portfolio item added: {}", item.id);
            println!("{}", serde_json::to_string_pretty(&item)?);
        }
        PortfolioAction::List => {
            let items = db.list_portfolio_items()?;
            println!("{}", serde_json::to_string_pretty(&items)?);
        }
        PortfolioAction::Remove { id } => {
            db.delete_portfolio_item(&id)?;
            println!("Portfolio item removed: {id}");
        }
    }
    Ok(())
}
