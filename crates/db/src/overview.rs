//! Read models assembled from more than one table.

use std::collections::HashMap;

use clientdesk_core::stats::compute_client_stats;
use clientdesk_core::types::DbId;

use crate::models::client::ClientWithStats;
use crate::models::project::Project;
use crate::store::{Store, StoreResult};

/// Every live client with statistics over its live projects.
///
/// Clients keep the store's listing order (newest first). Projects for all
/// clients are fetched with a single call.
pub async fn clients_with_stats(store: &dyn Store) -> StoreResult<Vec<ClientWithStats>> {
    let clients = store.list_clients().await?;
    if clients.is_empty() {
        return Ok(Vec::new());
    }

    let ids: Vec<DbId> = clients.iter().map(|c| c.id).collect();
    let projects = store.list_projects_for_clients(&ids).await?;
    tracing::debug!(
        clients = clients.len(),
        projects = projects.len(),
        "Loaded client overview"
    );

    let mut by_client: HashMap<DbId, Vec<Project>> = HashMap::new();
    for project in projects {
        by_client.entry(project.client_id).or_default().push(project);
    }

    Ok(clients
        .into_iter()
        .map(|client| {
            let projects = by_client.remove(&client.id).unwrap_or_default();
            ClientWithStats {
                stats: compute_client_stats(&projects),
                client,
            }
        })
        .collect())
}

/// One client with its statistics and its live projects in creation order.
pub async fn client_detail(
    store: &dyn Store,
    id: DbId,
) -> StoreResult<Option<(ClientWithStats, Vec<Project>)>> {
    let Some(client) = store.find_client(id).await? else {
        return Ok(None);
    };
    let projects = store.list_projects(id).await?;
    let stats = compute_client_stats(&projects);
    Ok(Some((ClientWithStats { client, stats }, projects)))
}
