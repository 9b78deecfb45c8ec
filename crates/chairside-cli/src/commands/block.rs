//! Time block management commands.

use clap::Subcommand;

use chairside_core::{BlockKind, SalonDb, TimeBlock};

use super::parse_instant;

#[derive(Subcommand)]
pub enum BlockAction {
    /// Create a time block
    Create {
        /// Professional ID
        professional_id: String,
        /// Block kind: vacation, break, or unavailable
        kind: String,
        /// Start date (YYYY-MM-DD)
        start_date: String,
        /// Start time (HH:mm)
        start_time: String,
        /// End date (YYYY-MM-DD)
        end_date: String,
        /// End time (HH:mm)
        end_time: String,
        /// Display label
        #[arg(long)]
        label: Option<String>,
    },
    /// List time blocks
    List {
        /// Filter by professional ID
        #[arg(long)]
        professional_id: Option<String>,
    },
    /// Delete a time block
    Delete {
        /// Block ID
        id: String,
    },
}

fn parse_kind(s: &str) -> Result<BlockKind, Box<dyn std::error::Error>> {
    match s {
        "vacation" => Ok(BlockKind::Vacation),
        "break" => Ok(BlockKind::Break),
        "unavailable" => Ok(BlockKind::Unavailable),
        other => Err(format!("unknown block kind '{other}' (expected vacation, break, or unavailable)").into()),
    }
}

pub fn run(action: BlockAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = SalonDb::open()?;

    match action {
        BlockAction::Create {
            professional_id,
            kind,
            start_date,
            start_time,
            end_date,
            end_time,
            label,
        } => {
            let block = TimeBlock::new(
                professional_id,
                parse_kind(&kind)?,
                parse_instant(&start_date, &start_time)?,
                parse_instant(&end_date, &end_time)?,
                label,
            )?;
            db.create_time_block(&block)?;
            println!("Block created: {}", block.id);
            println!("{}", serde_json::to_string_pretty(&block)?);
        }
        BlockAction::List { professional_id } => {
            let blocks = db.list_time_blocks(professional_id.as_deref())?;
            println!("{}", serde_json::to_string_pretty(&blocks)?);
        }
        BlockAction::Delete { id } => {
            db.delete_time_block(&id)?;
            println!("Block deleted: {id}");
        }
    }
    Ok(())
}
