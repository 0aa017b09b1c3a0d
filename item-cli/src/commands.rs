//! CLI subcommands and how they drive an `ItemCollection`.

use clap::Subcommand;
use item_core::{ApiError, CollectionError, Item, ItemCollection, ItemId, Transport};
use thiserror::Error;
use tracing::warn;

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Probe backend health and list items
    Status,
    /// List items
    List,
    /// Create an item
    Add {
        #[arg(short, long)]
        title: String,
        #[arg(short, long)]
        description: String,
    },
    /// Delete an item by id
    Delete { id: ItemId },
    /// Fetch a single item by id
    Show { id: ItemId },
}

/// What the command wants rendered.
#[derive(Debug, PartialEq, Eq)]
pub enum View {
    Collection,
    Item(Item),
}

#[derive(Error, Debug)]
pub enum CommandError {
    #[error(transparent)]
    Collection(#[from] CollectionError),

    #[error("item {id}: {source}")]
    Lookup {
        id: ItemId,
        #[source]
        source: ApiError,
    },
}

pub fn run<T: Transport>(
    command: &Command,
    items: &mut ItemCollection,
    transport: &T,
) -> Result<View, CommandError> {
    match command {
        Command::Status => items.initialize(transport)?,
        Command::List => items.fetch_items(transport)?,
        Command::Add { title, description } => {
            items.create_from(title, description, transport)?;
            refresh(items, transport);
        }
        Command::Delete { id } => {
            items.delete(*id, transport)?;
            refresh(items, transport);
        }
        Command::Show { id } => {
            // Read-only lookup; the collection's view state is not involved.
            let client = items.client();
            let item = transport
                .execute(client.build_get_item(*id))
                .and_then(|response| client.parse_get_item(response))
                .map_err(|source| CommandError::Lookup { id: *id, source })?;
            return Ok(View::Item(item));
        }
    }
    Ok(View::Collection)
}

/// Reload the list for display after a successful write.
///
/// The write already happened, so a failed reload is only logged; the
/// rendered state still carries its message.
fn refresh<T: Transport>(items: &mut ItemCollection, transport: &T) {
    if let Err(err) = items.fetch_items(transport) {
        warn!(error = %err, "list refresh after write failed");
    }
}
