//! Enemy AI demo: patrol, chase and attack driven by a behavior tree.
mod world;

use anyhow::Result;
use behavior_tree::{Agent, Blackboard, Builder, Tree, TreeConfig};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use world::{World, WORLD_KEY};

const DEFAULT_TICKS: u64 = 40;

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    setup_logging();

    let config = TreeConfig::from_env();
    let ticks = read_env::<u64>("DEMO_TICKS").unwrap_or(DEFAULT_TICKS);

    let mut agent = Agent::new(enemy_tree(config)).with_reset_on_completion(true);
    tracing::info!("tree layout:\n{}", agent.tree().describe());

    for tick in 1..=ticks {
        let status = agent.tick();

        let Some(world) = agent.tree_mut().blackboard_mut().get_mut::<World>(WORLD_KEY) else {
            anyhow::bail!("world missing from blackboard");
        };
        tracing::info!(
            "tick {:>3}: {:<7} enemy={:>2} player={:>2} hp={}",
            tick,
            status.as_ref(),
            world.enemy,
            world.player,
            world.player_hp
        );

        if world.player_hp <= 0 {
            tracing::info!("player defeated after {} ticks", tick);
            break;
        }
        world.advance(tick);
    }

    Ok(())
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    std::env::var(key).ok()?.parse().ok()
}

fn setup_logging() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();
}

/// Attack when adjacent, chase when the player is in sight, patrol otherwise.
fn enemy_tree(config: TreeConfig) -> Tree {
    let mut blackboard = Blackboard::new();
    blackboard.set(WORLD_KEY, World::default());

    Builder::new()
        .blackboard(blackboard)
        .selector("enemy")
        .sequence("attack")
        .condition("inRange", world::in_attack_range)
        .action("strike", world::attack)
        .end()
        .sequence("hunt")
        .condition("seesPlayer", world::sees_player)
        .action("chase", world::chase)
        .end()
        .action("patrol", world::patrol)
        .end()
        .build_with(config)
}
