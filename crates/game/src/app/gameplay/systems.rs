use ember_engine::{Component, ComponentKind, EntityId, EntityWorld, GameSystem};

/// Axis-aligned play area; movement clamps entity centers (minus collider
/// radius) inside it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArenaBounds {
    pub min_x: f32,
    pub min_y: f32,
    pub max_x: f32,
    pub max_y: f32,
}

pub struct MovementSystem {
    bounds: ArenaBounds,
}

impl MovementSystem {
    pub fn new(bounds: ArenaBounds) -> Self {
        Self { bounds }
    }
}

impl GameSystem for MovementSystem {
    fn name(&self) -> &'static str {
        "movement"
    }

    fn required_components(&self) -> &'static [ComponentKind] {
        &[ComponentKind::Position, ComponentKind::Velocity]
    }

    fn run(&mut self, dt_seconds: f32, world: &mut EntityWorld, matching: &[EntityId]) {
        for id in matching {
            let Some(entity) = world.entity_mut(*id) else {
                continue;
            };
            let (vx, vy) = match entity.component(ComponentKind::Velocity) {
                Some(Component::Velocity { x, y }) => (*x, *y),
                _ => continue,
            };
            let radius = match entity.component(ComponentKind::Collider) {
                Some(Component::Collider { radius }) => *radius,
                _ => 0.0,
            };
            if let Some(Component::Position { x, y }) =
                entity.component_mut(ComponentKind::Position)
            {
                *x = (*x + vx * dt_seconds)
                    .clamp(self.bounds.min_x + radius, self.bounds.max_x - radius);
                *y = (*y + vy * dt_seconds)
                    .clamp(self.bounds.min_y + radius, self.bounds.max_y - radius);
            }
        }
    }
}

/// Separates overlapping circle colliders by pushing each half the overlap
/// apart. Pickups (entities carrying an item) are intangible.
pub struct CollisionSystem;

impl GameSystem for CollisionSystem {
    fn name(&self) -> &'static str {
        "collision"
    }

    fn required_components(&self) -> &'static [ComponentKind] {
        &[ComponentKind::Position, ComponentKind::Collider]
    }

    fn run(&mut self, _dt_seconds: f32, world: &mut EntityWorld, matching: &[EntityId]) {
        let solids: Vec<EntityId> = matching
            .iter()
            .copied()
            .filter(|id| {
                world
                    .entity(*id)
                    .is_some_and(|entity| entity.component(ComponentKind::Item).is_none())
            })
            .collect();

        for (index, a) in solids.iter().enumerate() {
            for b in solids.iter().skip(index + 1) {
                let Some(push) = circle_overlap(world, *a, *b) else {
                    continue;
                };
                nudge(world, *a, -push.0, -push.1);
                nudge(world, *b, push.0, push.1);
            }
        }
    }
}

/// Half-overlap push vector from `a` toward `b`, or `None` when apart.
fn circle_overlap(world: &EntityWorld, a: EntityId, b: EntityId) -> Option<(f32, f32)> {
    let (ax, ay, ar) = circle_of(world, a)?;
    let (bx, by, br) = circle_of(world, b)?;
    let dx = bx - ax;
    let dy = by - ay;
    let distance_sq = dx * dx + dy * dy;
    let reach = ar + br;
    if distance_sq >= reach * reach {
        return None;
    }

    let distance = distance_sq.sqrt();
    if distance <= f32::EPSILON {
        // Coincident centers: pick a fixed axis so the pair still separates.
        return Some((reach * 0.5, 0.0));
    }
    let overlap = reach - distance;
    let scale = overlap * 0.5 / distance;
    Some((dx * scale, dy * scale))
}

fn circle_of(world: &EntityWorld, id: EntityId) -> Option<(f32, f32, f32)> {
    let entity = world.entity(id)?;
    let (x, y) = entity.position()?;
    match entity.component(ComponentKind::Collider) {
        Some(Component::Collider { radius }) => Some((x, y, *radius)),
        _ => None,
    }
}

fn nudge(world: &mut EntityWorld, id: EntityId, dx: f32, dy: f32) {
    if let Some(entity) = world.entity_mut(id) {
        if let Some(Component::Position { x, y }) = entity.component_mut(ComponentKind::Position) {
            *x += dx;
            *y += dy;
        }
    }
}

/// Ticks attack cooldowns and lands hits on the single hunted target when an
/// attacker is in range with a ready attack.
pub struct CombatSystem {
    target: EntityId,
}

impl CombatSystem {
    pub fn new(target: EntityId) -> Self {
        Self { target }
    }
}

impl GameSystem for CombatSystem {
    fn name(&self) -> &'static str {
        "combat"
    }

    fn required_components(&self) -> &'static [ComponentKind] {
        &[ComponentKind::Attack, ComponentKind::Position]
    }

    fn run(&mut self, dt_seconds: f32, world: &mut EntityWorld, matching: &[EntityId]) {
        let target_position = world
            .entity(self.target)
            .filter(|entity| entity.is_active())
            .and_then(|entity| entity.position());

        for id in matching {
            if *id == self.target {
                continue;
            }
            let Some(attacker) = world.entity_mut(*id) else {
                continue;
            };
            let attacker_position = attacker.position();
            let Some(Component::Attack {
                damage,
                range,
                cooldown_seconds,
                cooldown_remaining,
            }) = attacker.component_mut(ComponentKind::Attack)
            else {
                continue;
            };
            *cooldown_remaining = (*cooldown_remaining - dt_seconds).max(0.0);

            let (Some((tx, ty)), Some((ax, ay))) = (target_position, attacker_position) else {
                continue;
            };
            let dx = tx - ax;
            let dy = ty - ay;
            if *cooldown_remaining > 0.0 || dx * dx + dy * dy > *range * *range {
                continue;
            }

            let hit_damage = *damage;
            *cooldown_remaining = *cooldown_seconds;
            if let Some(target) = world.entity_mut(self.target) {
                if let Some(Component::Health { current, .. }) =
                    target.component_mut(ComponentKind::Health)
                {
                    *current = (*current - hit_damage).max(0.0);
                }
            }
        }
    }
}

/// Applies per-second health regeneration, capped at max. The fallen do not
/// recover.
pub struct RegenerationSystem;

impl GameSystem for RegenerationSystem {
    fn name(&self) -> &'static str {
        "regeneration"
    }

    fn required_components(&self) -> &'static [ComponentKind] {
        &[ComponentKind::Health]
    }

    fn run(&mut self, dt_seconds: f32, world: &mut EntityWorld, matching: &[EntityId]) {
        for id in matching {
            let Some(entity) = world.entity_mut(*id) else {
                continue;
            };
            if let Some(Component::Health {
                current,
                max,
                regeneration,
            }) = entity.component_mut(ComponentKind::Health)
            {
                if *current > 0.0 {
                    *current = (*current + *regeneration * dt_seconds).min(*max);
                }
            }
        }
    }
}

/// Counts down pickup lifetimes and despawns the expired ones; the despawn
/// commits after this pass.
pub struct ItemLifetimeSystem;

impl GameSystem for ItemLifetimeSystem {
    fn name(&self) -> &'static str {
        "item_lifetime"
    }

    fn required_components(&self) -> &'static [ComponentKind] {
        &[ComponentKind::Item]
    }

    fn run(&mut self, dt_seconds: f32, world: &mut EntityWorld, matching: &[EntityId]) {
        for id in matching {
            let mut expired = false;
            if let Some(entity) = world.entity_mut(*id) {
                if let Some(Component::Item {
                    duration_seconds, ..
                }) = entity.component_mut(ComponentKind::Item)
                {
                    *duration_seconds -= dt_seconds;
                    expired = *duration_seconds <= 0.0;
                }
            }
            if expired {
                world.despawn(*id);
            }
        }
    }
}
