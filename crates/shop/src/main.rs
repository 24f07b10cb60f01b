use anyhow::Context;

use autoshop_infra::StoreConfig;
use autoshop_shop::Shop;

fn main() -> anyhow::Result<()> {
    autoshop_observability::init();

    let config = StoreConfig::from_env();
    let data_dir = config.data_dir.display().to_string();
    let shop = Shop::open(config).with_context(|| format!("failed to open shop in {data_dir}"))?;

    for product in shop.catalog().products() {
        tracing::debug!(code = %product.code(), "{product}");
    }

    let recorded = shop.ledger_entries().context("failed to read the order ledger")?;
    tracing::info!(
        data_dir = %data_dir,
        products = shop.catalog().len(),
        users = shop.users().len(),
        orders = recorded.len(),
        next_order_id = %shop.next_order_id(),
        "autoshop ready"
    );
    Ok(())
}
