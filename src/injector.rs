/// Content script: puts the enabled links into the site's navigation bar

use crate::error::InjectError;
use crate::host::{build_nav_item, find_nav_container, NAV_CONTAINER_SELECTOR};
use crate::links::{LinkConfig, LinkEntry};
use crate::reconcile::Reconciled;
use crate::storage::{LinkRepository, LinkStore};
use log::{error, info};
use web_sys::{Document, Element};

/// The links to show, in the order to show them
pub fn plan(config: &LinkConfig) -> Vec<LinkEntry> {
    config.enabled_links().cloned().collect()
}

/// Insert `links` at the front of `container`, keeping their order.
///
/// Each item goes before the current first child, so the list is walked
/// backwards. Returns how many items were inserted.
pub fn render_into(
    document: &Document,
    container: &Element,
    links: &[LinkEntry],
) -> Result<usize, InjectError> {
    for link in links.iter().rev() {
        let item = build_nav_item(document, link).map_err(|e| InjectError::Dom(format!("{:?}", e)))?;
        container
            .insert_before(&item, container.first_child().as_ref())
            .map_err(|e| InjectError::Dom(format!("{:?}", e)))?;
    }
    Ok(links.len())
}

/// Load the configuration and render it into `document`.
///
/// Storage is only written when defaults were substituted, and only after
/// the links are on the page. Running this twice inserts the links twice.
pub async fn run<S: LinkStore>(
    document: &Document,
    repository: &LinkRepository<S>,
) -> Result<usize, InjectError> {
    let Reconciled { config, seeded } = match repository.load().await {
        Ok(reconciled) => reconciled,
        Err(e) => {
            error!("Failed to read links, showing defaults: {}", e);
            Reconciled {
                config: LinkConfig::defaults(),
                seeded: false,
            }
        }
    };

    let container = find_nav_container(document)
        .ok_or(InjectError::MissingContainer(NAV_CONTAINER_SELECTOR))?;

    let inserted = render_into(document, &container, &plan(&config))?;
    info!("Inserted {} navigation shortcuts", inserted);

    if seeded {
        if let Err(e) = repository.save(&config).await {
            error!("Failed to store default links: {}", e);
        }
    }

    Ok(inserted)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_keeps_enabled_in_order() {
        let mut config = LinkConfig::defaults();
        config.add_custom("Orders", "/orders").unwrap();
        config.add_custom("Deals", "/deals").unwrap();
        config.move_entry(3, 0).unwrap();
        config.set_enabled(2, false).unwrap();

        let names: Vec<String> = plan(&config).into_iter().map(|l| l.name).collect();

        assert_eq!(names, vec!["Deals", "Returns", "Orders"]);
    }

    #[test]
    fn test_plan_skips_links_without_url() {
        let config = LinkConfig::new(vec![
            LinkEntry::custom("Broken", ""),
            LinkEntry::custom("Orders", "/orders"),
        ]);

        let planned = plan(&config);

        assert_eq!(planned.len(), 1);
        assert_eq!(planned[0].url, "/orders");
    }

    #[test]
    fn test_plan_all_disabled_is_empty() {
        let mut config = LinkConfig::defaults();
        config.set_enabled(0, false).unwrap();
        config.set_enabled(1, false).unwrap();

        assert!(plan(&config).is_empty());
    }
}
