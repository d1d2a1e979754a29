use std::sync::Arc;

use roster_server::{Config, DistributionService, ShardRouter, ShardSet};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    // 1. Load configuration
    let config = Config::from_env();

    // 2. Initialize logging (JSON + file output in production)
    let log_dir = format!("{}/logs", config.work_dir);
    roster_server::init_logger_with_file(
        &config.log_level,
        config.is_production(),
        Some(&log_dir),
    )?;

    tracing::info!(
        shards = config.shard_count,
        range_width = config.range_width,
        environment = %config.environment,
        "Roster data layer starting"
    );

    // 3. Open all shard stores and wire up the service
    let shards = ShardSet::open(&config).await?;
    let router = ShardRouter::new(config.shard_count, config.range_width);
    let service = DistributionService::new(router, Arc::new(shards));

    // 4. Startup smoke check: one full aggregate pass over every shard
    let stats = service.get_dashboard_stats().await?;
    tracing::info!(
        total_employees = stats.total_employees,
        total_departments = stats.total_departments,
        pending_leaves = stats.leave_pending,
        distribution = ?stats.shard_distribution,
        "Shards ready"
    );

    Ok(())
}
