mod systems;

use ember_engine::{
    Component, ComponentKind, DrawFrame, EntityId, EntityWorld, InputSnapshot, ItemKind, Scene,
    SceneCommand, SceneContext, SceneKey, SystemSchedule, UiRect, Widget, WidgetId, UI_HEIGHT,
    UI_WIDTH,
};
use tracing::{info, warn};

use self::systems::{
    ArenaBounds, CollisionSystem, CombatSystem, ItemLifetimeSystem, MovementSystem,
    RegenerationSystem,
};
use super::session::{RunSummary, SessionHandle};

const ARENA_MARGIN: f32 = 8.0;
const ARENA_BOUNDS: ArenaBounds = ArenaBounds {
    min_x: ARENA_MARGIN,
    min_y: ARENA_MARGIN,
    max_x: UI_WIDTH as f32 - ARENA_MARGIN,
    max_y: UI_HEIGHT as f32 - ARENA_MARGIN,
};

const PLAYER_RADIUS: f32 = 7.0;
const PLAYER_SPEED: f32 = 110.0;
const PLAYER_MAX_HEALTH: f32 = 30.0;
const PLAYER_REGEN_PER_SECOND: f32 = 0.4;

const HUSK_RADIUS: f32 = 6.0;
const HUSK_SPEED: f32 = 42.0;
const HUSK_MAX_HEALTH: f32 = 10.0;
const HUSK_DAMAGE: f32 = 4.0;
const HUSK_ATTACK_RANGE: f32 = 16.0;
const HUSK_ATTACK_COOLDOWN_SECONDS: f32 = 1.2;
const HUSK_WAVE_INTERVAL_SECONDS: f32 = 6.0;
const INITIAL_HUSK_COUNT: usize = 3;

const PICKUP_RADIUS: f32 = 5.0;
const PICKUP_INTERVAL_SECONDS: f32 = 4.0;
const PICKUP_GROUND_LIFETIME_SECONDS: f32 = 9.0;
const SALVE_HEAL: f32 = 12.0;
const HASTE_MULTIPLIER: f32 = 1.6;
const HASTE_DURATION_SECONDS: f32 = 5.0;

const PLAYER_COLOR: [u8; 4] = [255, 196, 80, 255];
const HUSK_COLOR: [u8; 4] = [196, 72, 64, 255];
const EMBER_COLOR: [u8; 4] = [255, 150, 40, 255];
const SALVE_COLOR: [u8; 4] = [90, 200, 120, 255];
const QUICKEN_COLOR: [u8; 4] = [110, 170, 255, 255];

const HUSK_SPAWN_SPOTS: [(f32, f32); 4] = [
    (ARENA_MARGIN + 12.0, ARENA_MARGIN + 12.0),
    (UI_WIDTH as f32 - ARENA_MARGIN - 12.0, ARENA_MARGIN + 12.0),
    (
        UI_WIDTH as f32 - ARENA_MARGIN - 12.0,
        UI_HEIGHT as f32 - ARENA_MARGIN - 12.0,
    ),
    (ARENA_MARGIN + 12.0, UI_HEIGHT as f32 - ARENA_MARGIN - 12.0),
];

const PICKUP_SPOTS: [(f32, f32); 5] = [
    (160.0, 90.0),
    (480.0, 90.0),
    (480.0, 270.0),
    (160.0, 270.0),
    (320.0, 180.0),
];

pub struct GameplayScene {
    session: SessionHandle,
    schedule: SystemSchedule,
    player: Option<EntityId>,
    widgets: Vec<WidgetId>,
    hud_status: Option<WidgetId>,
    hud_timer: Option<WidgetId>,
    survival_seconds: f32,
    embers_collected: u32,
    haste_remaining_seconds: f32,
    husk_wave_timer: f32,
    pickup_timer: f32,
    spawned_husks: u32,
    spawned_pickups: u32,
}

impl GameplayScene {
    pub fn new(session: SessionHandle) -> Self {
        Self {
            session,
            schedule: SystemSchedule::new(),
            player: None,
            widgets: Vec::new(),
            hud_status: None,
            hud_timer: None,
            survival_seconds: 0.0,
            embers_collected: 0,
            haste_remaining_seconds: 0.0,
            husk_wave_timer: HUSK_WAVE_INTERVAL_SECONDS,
            pickup_timer: PICKUP_INTERVAL_SECONDS,
            spawned_husks: 0,
            spawned_pickups: 0,
        }
    }

    fn spawn_player(&mut self, world: &mut EntityWorld) -> EntityId {
        world.spawn(vec![
            Component::Position {
                x: UI_WIDTH as f32 * 0.5,
                y: UI_HEIGHT as f32 * 0.5,
            },
            Component::Velocity { x: 0.0, y: 0.0 },
            Component::Collider {
                radius: PLAYER_RADIUS,
            },
            Component::Health {
                current: PLAYER_MAX_HEALTH,
                max: PLAYER_MAX_HEALTH,
                regeneration: PLAYER_REGEN_PER_SECOND,
            },
        ])
    }

    fn spawn_husk(&mut self, world: &mut EntityWorld) {
        let spot = HUSK_SPAWN_SPOTS[self.spawned_husks as usize % HUSK_SPAWN_SPOTS.len()];
        world.spawn(vec![
            Component::Position {
                x: spot.0,
                y: spot.1,
            },
            Component::Velocity { x: 0.0, y: 0.0 },
            Component::Collider {
                radius: HUSK_RADIUS,
            },
            Component::Health {
                current: HUSK_MAX_HEALTH,
                max: HUSK_MAX_HEALTH,
                regeneration: 0.0,
            },
            Component::Attack {
                damage: HUSK_DAMAGE,
                range: HUSK_ATTACK_RANGE,
                cooldown_seconds: HUSK_ATTACK_COOLDOWN_SECONDS,
                cooldown_remaining: 0.0,
            },
        ]);
        self.spawned_husks = self.spawned_husks.saturating_add(1);
    }

    fn spawn_pickup(&mut self, world: &mut EntityWorld) {
        let spot = PICKUP_SPOTS[self.spawned_pickups as usize % PICKUP_SPOTS.len()];
        let (kind, value) = match self.spawned_pickups % 3 {
            0 => (ItemKind::Ember, 1.0),
            1 => (ItemKind::Salve, SALVE_HEAL),
            _ => (ItemKind::Quicken, HASTE_MULTIPLIER),
        };
        world.spawn(vec![
            Component::Position {
                x: spot.0,
                y: spot.1,
            },
            Component::Collider {
                radius: PICKUP_RADIUS,
            },
            Component::Item {
                kind,
                value,
                duration_seconds: PICKUP_GROUND_LIFETIME_SECONDS,
            },
        ]);
        self.spawned_pickups = self.spawned_pickups.saturating_add(1);
    }

    fn player_speed(&self) -> f32 {
        if self.haste_remaining_seconds > 0.0 {
            PLAYER_SPEED * HASTE_MULTIPLIER
        } else {
            PLAYER_SPEED
        }
    }

    fn player_health(&self, world: &EntityWorld) -> f32 {
        let Some(player) = self.player.and_then(|id| world.entity(id)) else {
            return 0.0;
        };
        match player.component(ComponentKind::Health) {
            Some(Component::Health { current, .. }) => *current,
            _ => 0.0,
        }
    }

    fn steer_husks(&self, world: &mut EntityWorld) {
        let Some(player_position) = self.player.and_then(|id| world.entity(id)?.position())
        else {
            return;
        };
        let husk_ids =
            world.matching_ids(&[ComponentKind::Attack, ComponentKind::Velocity]);
        for id in husk_ids {
            let Some(husk) = world.entity_mut(id) else {
                continue;
            };
            let Some((hx, hy)) = husk.position() else {
                continue;
            };
            let dx = player_position.0 - hx;
            let dy = player_position.1 - hy;
            let distance = (dx * dx + dy * dy).sqrt();
            let (vx, vy) = if distance > f32::EPSILON {
                (dx / distance * HUSK_SPEED, dy / distance * HUSK_SPEED)
            } else {
                (0.0, 0.0)
            };
            husk.add_component(Component::Velocity { x: vx, y: vy });
        }
    }

    /// Applies and consumes any pickup the player overlaps.
    fn collect_pickups(&mut self, world: &mut EntityWorld) {
        let Some(player_id) = self.player else {
            return;
        };
        let Some((px, py)) = world.entity(player_id).and_then(|player| player.position()) else {
            return;
        };

        let mut healing = 0.0f32;
        for id in world.matching_ids(&[ComponentKind::Item, ComponentKind::Position]) {
            let Some(pickup) = world.entity(id) else {
                continue;
            };
            let Some((ix, iy)) = pickup.position() else {
                continue;
            };
            let radius = match pickup.component(ComponentKind::Collider) {
                Some(Component::Collider { radius }) => *radius,
                _ => 0.0,
            };
            let dx = px - ix;
            let dy = py - iy;
            let reach = radius + PLAYER_RADIUS;
            if dx * dx + dy * dy > reach * reach {
                continue;
            }

            let Some(Component::Item { kind, value, .. }) =
                pickup.component(ComponentKind::Item).copied()
            else {
                continue;
            };
            match kind {
                ItemKind::Ember => {
                    self.embers_collected = self.embers_collected.saturating_add(value as u32);
                }
                ItemKind::Salve => healing += value,
                ItemKind::Quicken => self.haste_remaining_seconds = HASTE_DURATION_SECONDS,
            }
            world.despawn(id);
        }

        if healing > 0.0 {
            if let Some(player) = world.entity_mut(player_id) {
                if let Some(Component::Health { current, max, .. }) =
                    player.component_mut(ComponentKind::Health)
                {
                    *current = (*current + healing).min(*max);
                }
            }
        }
    }

    fn refresh_hud(&self, ctx: &mut SceneContext<'_>, world: &EntityWorld) {
        if let Some(id) = self.hud_status {
            ctx.ui.set_label_text(
                id,
                format!(
                    "HP {:.0} / EMBERS {}",
                    self.player_health(world),
                    self.embers_collected
                ),
            );
        }
        if let Some(id) = self.hud_timer {
            ctx.ui
                .set_label_text(id, format!("TIME {:.0}S", self.survival_seconds));
        }
    }

    /// Folds the run into the profile, persists it, and stashes the summary
    /// for the menu. Persistence failures are logged and the run still ends.
    fn finish_run(&mut self, ctx: &mut SceneContext<'_>) -> SceneCommand {
        let summary = {
            let mut state = self.session.borrow_mut();
            let new_record = match state.profile.as_mut() {
                Some(profile) => {
                    let new_record =
                        profile.record_run(self.survival_seconds, self.embers_collected);
                    if let Err(error) = ctx.profiles.save_profile(profile) {
                        warn!(profile = %profile.name, error = %error, "profile_save_failed");
                    }
                    new_record
                }
                None => false,
            };
            RunSummary {
                survival_seconds: self.survival_seconds,
                embers: self.embers_collected,
                new_record,
            }
        };
        self.session.borrow_mut().last_run = Some(summary);
        info!(
            survival_seconds = summary.survival_seconds,
            embers = summary.embers,
            new_record = summary.new_record,
            "run_finished"
        );
        SceneCommand::SwitchTo(SceneKey::Menu)
    }
}

impl Scene for GameplayScene {
    fn load(&mut self, ctx: &mut SceneContext<'_>, world: &mut EntityWorld) {
        self.survival_seconds = 0.0;
        self.embers_collected = 0;
        self.haste_remaining_seconds = 0.0;
        self.husk_wave_timer = HUSK_WAVE_INTERVAL_SECONDS;
        self.pickup_timer = PICKUP_INTERVAL_SECONDS;
        self.spawned_husks = 0;
        self.spawned_pickups = 0;

        let player = self.spawn_player(world);
        self.player = Some(player);
        for _ in 0..INITIAL_HUSK_COUNT {
            self.spawn_husk(world);
        }

        self.schedule.clear();
        self.schedule
            .push(Box::new(MovementSystem::new(ARENA_BOUNDS)));
        self.schedule.push(Box::new(CollisionSystem));
        self.schedule.push(Box::new(CombatSystem::new(player)));
        self.schedule.push(Box::new(RegenerationSystem));
        self.schedule.push(Box::new(ItemLifetimeSystem));

        let hud_status = ctx.ui.add(Widget::label(
            UiRect::new(8.0, 8.0, 200.0, 12.0),
            "HP 30 / EMBERS 0",
        ));
        let hud_timer = ctx.ui.add(Widget::label(
            UiRect::new(UI_WIDTH as f32 - 96.0, 8.0, 88.0, 12.0),
            "TIME 0S",
        ));
        let hint = ctx.ui.add(Widget::label(
            UiRect::new(8.0, UI_HEIGHT as f32 - 18.0, 200.0, 12.0),
            "ESC TO RETREAT",
        ));
        self.widgets.extend([hud_status, hud_timer, hint]);
        self.hud_status = Some(hud_status);
        self.hud_timer = Some(hud_timer);
    }

    fn update(
        &mut self,
        dt_seconds: f32,
        input: &InputSnapshot,
        ctx: &mut SceneContext<'_>,
        world: &mut EntityWorld,
    ) -> SceneCommand {
        if input.cancel_pressed() {
            return self.finish_run(ctx);
        }

        self.survival_seconds += dt_seconds;
        self.haste_remaining_seconds = (self.haste_remaining_seconds - dt_seconds).max(0.0);

        if let Some(player_id) = self.player {
            let (move_x, move_y) = input.move_axes();
            let speed = self.player_speed();
            if let Some(player) = world.entity_mut(player_id) {
                player.add_component(Component::Velocity {
                    x: move_x * speed,
                    y: move_y * speed,
                });
            }
        }
        self.steer_husks(world);

        self.schedule.run(dt_seconds, world);
        self.collect_pickups(world);

        self.husk_wave_timer -= dt_seconds;
        if self.husk_wave_timer <= 0.0 {
            self.husk_wave_timer = HUSK_WAVE_INTERVAL_SECONDS;
            self.spawn_husk(world);
        }
        self.pickup_timer -= dt_seconds;
        if self.pickup_timer <= 0.0 {
            self.pickup_timer = PICKUP_INTERVAL_SECONDS;
            self.spawn_pickup(world);
        }

        self.refresh_hud(ctx, world);

        if self.player_health(world) <= 0.0 {
            return self.finish_run(ctx);
        }
        SceneCommand::None
    }

    fn render(&mut self, world: &EntityWorld, frame: &mut DrawFrame<'_>) {
        for entity in world.entities() {
            let Some((x, y)) = entity.position() else {
                continue;
            };
            let radius = match entity.component(ComponentKind::Collider) {
                Some(Component::Collider { radius }) => *radius,
                _ => 4.0,
            };
            let color = if Some(entity.id()) == self.player {
                PLAYER_COLOR
            } else if let Some(Component::Item { kind, .. }) =
                entity.component(ComponentKind::Item)
            {
                match kind {
                    ItemKind::Ember => EMBER_COLOR,
                    ItemKind::Salve => SALVE_COLOR,
                    ItemKind::Quicken => QUICKEN_COLOR,
                }
            } else {
                HUSK_COLOR
            };
            frame.fill_circle(x, y, radius, color);
        }
    }

    fn unload(&mut self, ctx: &mut SceneContext<'_>, _world: &mut EntityWorld) {
        for id in self.widgets.drain(..) {
            ctx.ui.remove(id);
        }
        self.hud_status = None;
        self.hud_timer = None;
        self.player = None;
        self.schedule.clear();
    }
}
