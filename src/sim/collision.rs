//! Cross-group collision resolution
//!
//! Runs once per tick after every group has advanced. Sub-steps run in a
//! fixed order and each one removes what it consumed before the next one
//! looks, so nothing is matched twice in the same pass:
//!
//! 1. overlapping player and enemy projectiles cancel each other
//! 2. pickups touching the player are collected (+1 life each)
//! 3. player projectiles damage enemy craft
//! 4. enemy projectiles and enemy craft bodies damage the player

use super::lifecycle::Lifecycle;
use super::world::SimulationWorld;

/// Counts of everything the resolver changed this tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollisionReport {
    /// Player projectiles removed by cancellation
    pub player_bullets_cancelled: usize,
    /// Enemy projectiles removed by cancellation
    pub enemy_bullets_cancelled: usize,
    pub pickups_collected: usize,
    /// Damage points dealt to enemy craft by player projectiles
    pub enemy_hits: usize,
    /// Player projectiles consumed by enemy craft
    pub player_bullets_consumed: usize,
    /// Enemies destroyed by player projectiles
    pub enemies_destroyed: usize,
    /// Enemies killed by ramming the player
    pub enemies_rammed: usize,
    /// Total damage applied to the player
    pub player_damage: u32,
    pub player_destroyed: bool,
}

/// Apply the full collision policy to `world`
pub fn resolve(world: &mut SimulationWorld) -> CollisionReport {
    let mut report = CollisionReport::default();
    cancel_projectiles(world, &mut report);
    collect_pickups(world, &mut report);
    damage_enemies(world, &mut report);
    damage_player(world, &mut report);

    if report != CollisionReport::default() {
        log::debug!("Collisions at tick {}: {:?}", world.time_ticks, report);
    }
    report
}

/// Drop every element whose flag is set, keeping the rest in order
fn remove_flagged<T>(items: &mut Vec<T>, flags: &[bool]) {
    let mut flags = flags.iter();
    items.retain(|_| !flags.next().copied().unwrap_or(false));
}

/// Every projectile touching any projectile of the other side is removed,
/// together with everything it touches.
fn cancel_projectiles(world: &mut SimulationWorld, report: &mut CollisionReport) {
    let mut player_spent = vec![false; world.player_bullets.len()];
    let mut enemy_spent = vec![false; world.enemy_bullets.len()];

    for (pi, player_bullet) in world.player_bullets.iter().enumerate() {
        let bounds = player_bullet.bounds();
        for (ei, enemy_bullet) in world.enemy_bullets.iter().enumerate() {
            if bounds.intersects(&enemy_bullet.bounds()) {
                player_spent[pi] = true;
                enemy_spent[ei] = true;
            }
        }
    }

    report.player_bullets_cancelled = player_spent.iter().filter(|&&f| f).count();
    report.enemy_bullets_cancelled = enemy_spent.iter().filter(|&&f| f).count();
    remove_flagged(&mut world.player_bullets, &player_spent);
    remove_flagged(&mut world.enemy_bullets, &enemy_spent);
}

fn collect_pickups(world: &mut SimulationWorld, report: &mut CollisionReport) {
    let Some(player) = world.player.as_mut() else {
        return;
    };
    let bounds = player.bounds();
    let collected: Vec<bool> = world
        .pickups
        .iter()
        .map(|p| bounds.intersects(&p.bounds()))
        .collect();
    let count = collected.iter().filter(|&&c| c).count();
    if count == 0 {
        return;
    }

    remove_flagged(&mut world.pickups, &collected);
    player.gain_life(count as u32);
    report.pickups_collected = count;
    log::debug!("Collected {} pickup(s), lives now {}", count, player.lives());
}

/// Each (enemy, player projectile) overlap deals 1 damage. A projectile is
/// consumed by every enemy it touches, so it can damage several at once.
fn damage_enemies(world: &mut SimulationWorld, report: &mut CollisionReport) {
    let mut spent = vec![false; world.player_bullets.len()];

    for enemy in world.enemies.iter_mut() {
        let bounds = enemy.bounds();
        let mut hits = 0u32;
        for (bi, bullet) in world.player_bullets.iter().enumerate() {
            if bounds.intersects(&bullet.bounds()) {
                spent[bi] = true;
                hits += 1;
            }
        }
        if hits > 0 {
            enemy.apply_damage(hits);
            report.enemy_hits += hits as usize;
        }
    }

    report.player_bullets_consumed = spent.iter().filter(|&&f| f).count();
    remove_flagged(&mut world.player_bullets, &spent);
    let destroyed = world.retire_dead_enemies();
    report.enemies_destroyed = destroyed;
    world.score += destroyed as u64 * world.settings.rules.enemy_score;
}

/// Projectile hits and body collisions add up into one damage total
fn damage_player(world: &mut SimulationWorld, report: &mut CollisionReport) {
    let Some(player) = world.player.as_mut() else {
        return;
    };
    if !player.is_alive() {
        return;
    }
    let bounds = player.bounds();

    let bullet_hits: Vec<bool> = world
        .enemy_bullets
        .iter()
        .map(|b| bounds.intersects(&b.bounds()))
        .collect();
    let mut damage = bullet_hits.iter().filter(|&&h| h).count() as u32;
    remove_flagged(&mut world.enemy_bullets, &bullet_hits);

    let mut rammed = 0;
    for enemy in world.enemies.iter_mut() {
        if bounds.intersects(&enemy.bounds()) {
            enemy.kill();
            rammed += 1;
        }
    }
    damage += rammed as u32;
    report.enemies_rammed = rammed;

    if damage > 0 {
        player.lose_life(damage);
        report.player_damage = damage;
    }

    world.retire_dead_enemies();
    if world.retire_player_if_dead() {
        report.player_destroyed = true;
    }
}
